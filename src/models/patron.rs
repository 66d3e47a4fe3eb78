//! Patron model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Patron model from database
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Patron {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    /// One-to-one reference to the patron's credential record
    pub user_id: i64,
}

/// Create patron request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePatron {
    #[validate(length(min = 1, max = 255, message = "Name is required, at most 255 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(max = 20, message = "Phone number must be at most 20 characters"))]
    pub phone_number: Option<String>,
    #[validate(length(max = 1000, message = "Address must be at most 1000 characters"))]
    pub address: Option<String>,
    /// Credential record this patron belongs to
    pub user_id: i64,
}

/// Update patron request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePatron {
    #[validate(length(min = 1, max = 255, message = "Name is required, at most 255 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(max = 20, message = "Phone number must be at most 20 characters"))]
    pub phone_number: Option<String>,
    #[validate(length(max = 1000, message = "Address must be at most 1000 characters"))]
    pub address: Option<String>,
}
