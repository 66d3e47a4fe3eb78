//! Book model and related types

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// ISBN-10/13 pattern, 13 significant characters
pub static ISBN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:ISBN(?:-1[03])?:? )?[0-9X-]{13}$").expect("valid ISBN regex"));

/// Book availability status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookStatus {
    Available,
    Borrowed,
    Lost,
    UnderMaintenance,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "AVAILABLE",
            BookStatus::Borrowed => "BORROWED",
            BookStatus::Lost => "LOST",
            BookStatus::UnderMaintenance => "UNDER_MAINTENANCE",
        }
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "AVAILABLE" => Ok(BookStatus::Available),
            "BORROWED" => Ok(BookStatus::Borrowed),
            "LOST" => Ok(BookStatus::Lost),
            "UNDER_MAINTENANCE" => Ok(BookStatus::UnderMaintenance),
            _ => Err(format!("Invalid book status: {}", s)),
        }
    }
}

// SQLx conversion for BookStatus (stored as TEXT)
impl sqlx::Type<Postgres> for BookStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for BookStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for BookStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Book model from database
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub publication_date: NaiveDate,
    pub isbn: String,
    pub description: Option<String>,
    pub status: BookStatus,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 255, message = "Title is required, at most 255 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "Author is required, at most 255 characters"))]
    pub author: String,
    #[validate(custom(
        function = validate_past_or_present,
        message = "Publication date must be in the past or present"
    ))]
    pub publication_date: NaiveDate,
    #[validate(regex(path = *ISBN_PATTERN, message = "Invalid ISBN format"))]
    pub isbn: String,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
    /// Status name (AVAILABLE, BORROWED, LOST, or UNDER_MAINTENANCE)
    pub status: String,
}

fn validate_past_or_present(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date > Utc::now().date_naive() {
        return Err(ValidationError::new("past_or_present"));
    }
    Ok(())
}
