//! Borrowing record model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Borrowing record from database. A record with `return_date = NULL` is an
/// open loan; setting `return_date` closes it permanently.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BorrowingRecord {
    pub id: i64,
    pub book_id: i64,
    pub patron_id: i64,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}
