//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::user::{Role, SignInRequest, SignUpRequest, TokenResponse},
};

use super::AuthenticatedUser;

/// Identity attached to the current request
#[derive(Serialize, ToSchema)]
pub struct IdentityResponse {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "auth",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "User registered, token issued", body = TokenResponse),
        (status = 400, description = "Invalid fields or role"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn signup(
    State(state): State<crate::AppState>,
    Json(request): Json<SignUpRequest>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    request.validate()?;

    let response = state.services.auth.sign_up(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Sign in with username and password
#[utoipa::path(
    post,
    path = "/auth/signin",
    tag = "auth",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Authenticated, token issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn signin(
    State(state): State<crate::AppState>,
    Json(request): Json<SignInRequest>,
) -> AppResult<Json<TokenResponse>> {
    request.validate()?;

    let response = state.services.auth.sign_in(request).await?;
    Ok(Json(response))
}

/// Get the authenticated user's identity
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current identity", body = IdentityResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(AuthenticatedUser(user): AuthenticatedUser) -> Json<IdentityResponse> {
    Json(IdentityResponse {
        id: user.id,
        username: user.username,
        role: user.role,
    })
}
