//! User model and related types

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use validator::Validate;

/// User roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Librarian,
    Patron,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Librarian => "LIBRARIAN",
            Role::Patron => "PATRON",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LIBRARIAN" => Ok(Role::Librarian),
            "PATRON" => Ok(Role::Patron),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

// SQLx conversion for Role (stored as TEXT)
impl sqlx::Type<Postgres> for Role {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for Role {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for Role {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// User (credential) model from database
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Hashed password (argon2), never serialized and never compared directly
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
}

/// Signup request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignUpRequest {
    #[validate(length(min = 3, max = 255, message = "Username must be 3-255 characters"))]
    pub username: String,
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: String,
    /// Role name (LIBRARIAN or PATRON)
    pub role: String,
}

/// Signin request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignInRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token response returned by signup and signin
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn role_round_trips_through_strings() {
        assert_eq!("LIBRARIAN".parse::<Role>().unwrap(), Role::Librarian);
        assert_eq!("patron".parse::<Role>().unwrap(), Role::Patron);
        assert_eq!(Role::Librarian.to_string(), "LIBRARIAN");
        assert!("ADMIN".parse::<Role>().is_err());
    }

    #[test]
    fn signup_request_rejects_short_credentials() {
        let request = SignUpRequest {
            username: "ab".to_string(),
            password: "pw".to_string(),
            role: "PATRON".to_string(),
        };
        assert!(request.validate().is_err());

        let request = SignUpRequest {
            username: "alice".to_string(),
            password: "password".to_string(),
            role: "PATRON".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
