//! Borrow and return endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{error::AppResult, models::borrowing::BorrowingRecord};

use super::AuthenticatedUser;

/// Borrow a book for a patron
#[utoipa::path(
    post,
    path = "/api/borrow/{book_id}/patron/{patron_id}",
    tag = "borrowings",
    security(("bearer_auth" = [])),
    params(
        ("book_id" = i64, Path, description = "Book ID"),
        ("patron_id" = i64, Path, description = "Patron ID")
    ),
    responses(
        (status = 201, description = "Borrowing record created", body = BorrowingRecord),
        (status = 400, description = "Book not available"),
        (status = 404, description = "Book or patron not found")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path((book_id, patron_id)): Path<(i64, i64)>,
) -> AppResult<(StatusCode, Json<BorrowingRecord>)> {
    let record = state.services.borrowings.borrow(book_id, patron_id).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Return a borrowed book
#[utoipa::path(
    put,
    path = "/api/return/{book_id}/patron/{patron_id}",
    tag = "borrowings",
    security(("bearer_auth" = [])),
    params(
        ("book_id" = i64, Path, description = "Book ID"),
        ("patron_id" = i64, Path, description = "Patron ID")
    ),
    responses(
        (status = 200, description = "Borrowing record closed", body = BorrowingRecord),
        (status = 404, description = "No active loan for this book and patron")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path((book_id, patron_id)): Path<(i64, i64)>,
) -> AppResult<Json<BorrowingRecord>> {
    let record = state
        .services
        .borrowings
        .return_book(book_id, patron_id)
        .await?;
    Ok(Json(record))
}
