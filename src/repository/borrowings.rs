//! Borrowing records repository for database operations
//!
//! Owns the borrow/return transactions: each one runs inside a single
//! database transaction with the book (or open record) row locked, so the
//! record write and the book status flip are atomic and concurrent borrows
//! of the same book serialize on the row lock.

use chrono::{Duration, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookStatus},
        borrowing::BorrowingRecord,
        patron::Patron,
    },
};

/// Fixed borrowing period
const BORROW_PERIOD_DAYS: i64 = 14;

#[derive(Clone)]
pub struct BorrowingsRepository {
    pool: Pool<Postgres>,
}

impl BorrowingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Borrow a book for a patron. Creates an open borrowing record and
    /// marks the book BORROWED in one transaction.
    pub async fn borrow(&self, book_id: i64, patron_id: i64) -> AppResult<BorrowingRecord> {
        let mut tx = self.pool.begin().await?;

        // Lock the book row so concurrent borrow attempts serialize here
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1 FOR UPDATE")
            .bind(book_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        let _patron = sqlx::query_as::<_, Patron>("SELECT * FROM patrons WHERE id = $1")
            .bind(patron_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Patron with id {} not found", patron_id)))?;

        if book.status != BookStatus::Available {
            return Err(AppError::InvalidState(format!(
                "Book {} is not available for borrowing",
                book_id
            )));
        }

        let borrow_date = Utc::now();
        let due_date = borrow_date + Duration::days(BORROW_PERIOD_DAYS);

        let record = sqlx::query_as::<_, BorrowingRecord>(
            r#"
            INSERT INTO borrowing_records (book_id, patron_id, borrow_date, due_date)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(patron_id)
        .bind(borrow_date)
        .bind(due_date)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE books SET status = $1 WHERE id = $2")
            .bind(BookStatus::Borrowed)
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    /// Return a borrowed book. Closes the open record for (book, patron) and
    /// marks the book AVAILABLE in one transaction.
    pub async fn return_book(&self, book_id: i64, patron_id: i64) -> AppResult<BorrowingRecord> {
        let mut tx = self.pool.begin().await?;

        let open = sqlx::query_as::<_, BorrowingRecord>(
            r#"
            SELECT * FROM borrowing_records
            WHERE book_id = $1 AND patron_id = $2 AND return_date IS NULL
            FOR UPDATE
            "#,
        )
        .bind(book_id)
        .bind(patron_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No active borrowing record found for book {} and patron {}",
                book_id, patron_id
            ))
        })?;

        let record = sqlx::query_as::<_, BorrowingRecord>(
            r#"
            UPDATE borrowing_records
            SET return_date = $1
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(Utc::now())
        .bind(open.id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE books SET status = $1 WHERE id = $2")
            .bind(BookStatus::Available)
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(record)
    }
}
