//! Patrons repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::patron::{CreatePatron, Patron, UpdatePatron},
};

#[derive(Clone)]
pub struct PatronsRepository {
    pool: Pool<Postgres>,
}

impl PatronsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get patron by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Patron> {
        sqlx::query_as::<_, Patron>("SELECT * FROM patrons WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Patron with id {} not found", id)))
    }

    /// Check if email already exists, optionally excluding one patron
    pub async fn email_exists(&self, email: &str, exclude_id: Option<i64>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM patrons WHERE LOWER(email) = LOWER($1) AND id != $2)",
            )
            .bind(email)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM patrons WHERE LOWER(email) = LOWER($1))")
                .bind(email)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    /// Count open borrowing records for a patron
    pub async fn count_open_loans(&self, id: i64) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM borrowing_records WHERE patron_id = $1 AND return_date IS NULL",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Create a new patron
    pub async fn create(&self, patron: &CreatePatron) -> AppResult<Patron> {
        let created = sqlx::query_as::<_, Patron>(
            r#"
            INSERT INTO patrons (name, email, phone_number, address, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&patron.name)
        .bind(&patron.email)
        .bind(&patron.phone_number)
        .bind(&patron.address)
        .bind(patron.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update an existing patron
    pub async fn update(&self, id: i64, patron: &UpdatePatron) -> AppResult<Patron> {
        sqlx::query_as::<_, Patron>(
            r#"
            UPDATE patrons
            SET name = $1, email = $2, phone_number = $3, address = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&patron.name)
        .bind(&patron.email)
        .bind(&patron.phone_number)
        .bind(&patron.address)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Patron with id {} not found", id)))
    }

    /// Delete a patron
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM patrons WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Patron with id {} not found", id)));
        }

        Ok(())
    }
}
