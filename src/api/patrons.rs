//! Patron management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::patron::{CreatePatron, Patron, UpdatePatron},
};

use super::AuthenticatedUser;

/// Register a new patron
#[utoipa::path(
    post,
    path = "/api/patrons",
    tag = "patrons",
    security(("bearer_auth" = [])),
    request_body = CreatePatron,
    responses(
        (status = 201, description = "Patron created", body = Patron),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Referenced user not found"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn create_patron(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Json(request): Json<CreatePatron>,
) -> AppResult<(StatusCode, Json<Patron>)> {
    request.validate()?;

    let patron = state.services.patrons.create_patron(request).await?;
    Ok((StatusCode::CREATED, Json(patron)))
}

/// Get patron details by ID
#[utoipa::path(
    get,
    path = "/api/patrons/{id}",
    tag = "patrons",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Patron ID")
    ),
    responses(
        (status = 200, description = "Patron details", body = Patron),
        (status = 404, description = "Patron not found")
    )
)]
pub async fn get_patron(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Patron>> {
    let patron = state.services.patrons.get_patron(id).await?;
    Ok(Json(patron))
}

/// Update an existing patron
#[utoipa::path(
    put,
    path = "/api/patrons/{id}",
    tag = "patrons",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Patron ID")
    ),
    request_body = UpdatePatron,
    responses(
        (status = 200, description = "Patron updated", body = Patron),
        (status = 404, description = "Patron not found"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn update_patron(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePatron>,
) -> AppResult<Json<Patron>> {
    request.validate()?;

    let patron = state.services.patrons.update_patron(id, request).await?;
    Ok(Json(patron))
}

/// Delete a patron
#[utoipa::path(
    delete,
    path = "/api/patrons/{id}",
    tag = "patrons",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Patron ID")
    ),
    responses(
        (status = 204, description = "Patron deleted"),
        (status = 404, description = "Patron not found"),
        (status = 409, description = "Patron has open loans")
    )
)]
pub async fn delete_patron(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.patrons.delete_patron(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
