//! API handlers for Libris REST endpoints

pub mod auth;
pub mod books;
pub mod borrowings;
pub mod health;
pub mod openapi;
pub mod patrons;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{error::AppError, services::auth::CurrentUser, AppState};

/// Extractor for the authenticated user behind a bearer token. Handlers on
/// protected routes take this as an argument; requests without a valid token
/// are rejected with 401 before the handler body runs.
pub struct AuthenticatedUser(pub CurrentUser);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Get the Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        // Check for Bearer token
        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Authentication(
                "Invalid authorization header format".to_string(),
            ));
        }

        let token = &auth_header[7..];

        // Validate the token and resolve the credential behind its subject
        let user = state.services.auth.authenticate_token(token).await?;

        Ok(AuthenticatedUser(user))
    }
}
