//! Borrowing lifecycle service

use crate::{
    error::AppResult,
    models::borrowing::BorrowingRecord,
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowingsService {
    repository: Repository,
}

impl BorrowingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow a book for a patron
    pub async fn borrow(&self, book_id: i64, patron_id: i64) -> AppResult<BorrowingRecord> {
        let record = self.repository.borrowings.borrow(book_id, patron_id).await?;
        tracing::info!(
            "Book {} borrowed by patron {} until {}",
            book_id,
            patron_id,
            record.due_date
        );
        Ok(record)
    }

    /// Return a borrowed book
    pub async fn return_book(&self, book_id: i64, patron_id: i64) -> AppResult<BorrowingRecord> {
        let record = self
            .repository
            .borrowings
            .return_book(book_id, patron_id)
            .await?;
        tracing::info!("Book {} returned by patron {}", book_id, patron_id);
        Ok(record)
    }
}
