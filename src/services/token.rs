//! Bearer token issuance and validation

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{config::AuthConfig, error::AppError};

/// Token validation failures
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token")]
    Invalid,

    #[error("Token has expired")]
    Expired,

    #[error("Token subject mismatch")]
    SubjectMismatch,
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        AppError::Authentication(err.to_string())
    }
}

/// Signed token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and validates HS512-signed bearer tokens. Holds the process-wide
/// secret and TTL; validation is a pure function of the token and the clock.
#[derive(Clone)]
pub struct TokenService {
    config: AuthConfig,
}

impl TokenService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Issue a signed token for the given subject, expiring after the
    /// configured TTL.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now + self.config.jwt_ttl_seconds as i64,
        };

        encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|_| TokenError::Invalid)
    }

    /// Extract the subject after verifying the signature. Does not check
    /// expiry; `validate` does.
    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        Ok(self.decode_claims(token)?.sub)
    }

    /// Whether the token's expiration has passed
    pub fn is_expired(&self, token: &str) -> Result<bool, TokenError> {
        let claims = self.decode_claims(token)?;
        Ok(Utc::now().timestamp() >= claims.exp)
    }

    /// Full validation: signature verifies, subject matches, and the token
    /// is not expired.
    pub fn validate(&self, token: &str, expected_subject: &str) -> Result<(), TokenError> {
        let claims = self.decode_claims(token)?;

        if claims.sub != expected_subject {
            return Err(TokenError::SubjectMismatch);
        }
        if Utc::now().timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(())
    }

    // Expiry is checked by the callers against the raw claim so the TTL
    // window is exact (no decoder leeway).
    fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS512);
        validation.validate_exp = false;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|_| TokenError::Invalid)
    }
}
