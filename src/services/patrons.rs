//! Patron management service

use crate::{
    error::{AppError, AppResult},
    models::patron::{CreatePatron, Patron, UpdatePatron},
    repository::Repository,
};

#[derive(Clone)]
pub struct PatronsService {
    repository: Repository,
}

impl PatronsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new patron linked to an existing credential record
    pub async fn create_patron(&self, patron: CreatePatron) -> AppResult<Patron> {
        // The credential must already exist; patron creation does not create it
        self.repository.users.get_by_id(patron.user_id).await?;

        if self.repository.patrons.email_exists(&patron.email, None).await? {
            return Err(AppError::Conflict(format!(
                "Patron with email {} already exists",
                patron.email
            )));
        }

        self.repository.patrons.create(&patron).await
    }

    /// Get patron by ID
    pub async fn get_patron(&self, id: i64) -> AppResult<Patron> {
        self.repository.patrons.get_by_id(id).await
    }

    /// Update an existing patron
    pub async fn update_patron(&self, id: i64, patron: UpdatePatron) -> AppResult<Patron> {
        let existing = self.repository.patrons.get_by_id(id).await?;

        if existing.email != patron.email
            && self.repository.patrons.email_exists(&patron.email, Some(id)).await?
        {
            return Err(AppError::Conflict(format!(
                "Patron with email {} already exists",
                patron.email
            )));
        }

        self.repository.patrons.update(id, &patron).await
    }

    /// Delete a patron. Patrons with an open loan cannot be deleted.
    pub async fn delete_patron(&self, id: i64) -> AppResult<()> {
        self.repository.patrons.get_by_id(id).await?;

        let open_loans = self.repository.patrons.count_open_loans(id).await?;
        if open_loans > 0 {
            return Err(AppError::Conflict(format!(
                "Patron {} has {} book(s) still borrowed",
                id, open_loans
            )));
        }

        self.repository.patrons.delete(id).await
    }
}
