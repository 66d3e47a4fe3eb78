//! Authentication and signup service

use crate::{
    error::{AppError, AppResult},
    models::user::{Role, SignInRequest, SignUpRequest, TokenResponse},
    repository::Repository,
    services::{password, token::TokenService},
};

/// Identity resolved from a validated bearer token, attached to the request
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

impl CurrentUser {
    /// Capability hook for per-route role checks. No route enforces a role
    /// yet; handlers that need one call this.
    pub fn require_role(&self, role: Role) -> AppResult<()> {
        if self.role == role {
            Ok(())
        } else {
            Err(AppError::Authorization(format!("{} role required", role)))
        }
    }
}

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(repository: Repository, tokens: TokenService) -> Self {
        Self { repository, tokens }
    }

    /// Register a new user and return a freshly issued token
    pub async fn sign_up(&self, request: SignUpRequest) -> AppResult<TokenResponse> {
        let role: Role = request
            .role
            .parse()
            .map_err(|_| AppError::Validation(format!("Invalid role: {}", request.role)))?;

        if self.repository.users.username_exists(&request.username).await? {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let password_hash = password::hash(&request.password)?;
        let user = self
            .repository
            .users
            .create(&request.username, &password_hash, role)
            .await?;

        tracing::info!("Registered user {} with role {}", user.username, user.role);

        let token = self.tokens.issue(&user.username)?;
        Ok(TokenResponse { token })
    }

    /// Authenticate by username and password and return a token. Unknown
    /// username and wrong password are indistinguishable to the caller.
    pub async fn sign_in(&self, request: SignInRequest) -> AppResult<TokenResponse> {
        let user = self
            .repository
            .users
            .get_by_username(&request.username)
            .await?
            .ok_or_else(|| {
                AppError::Authentication("Invalid username or password".to_string())
            })?;

        if !password::verify(&request.password, &user.password)? {
            return Err(AppError::Authentication(
                "Invalid username or password".to_string(),
            ));
        }

        let token = self.tokens.issue(&user.username)?;
        Ok(TokenResponse { token })
    }

    /// Resolve the identity behind a bearer token: verify the signature,
    /// look up the credential for its subject, then validate expiry against
    /// the resolved username.
    pub async fn authenticate_token(&self, token: &str) -> AppResult<CurrentUser> {
        let subject = self.tokens.extract_subject(token)?;

        let user = self
            .repository
            .users
            .get_by_username(&subject)
            .await?
            .ok_or_else(|| AppError::Authentication("Unknown token subject".to_string()))?;

        self.tokens.validate(token, &user.username)?;

        Ok(CurrentUser {
            id: user.id,
            username: user.username,
            role: user.role,
        })
    }
}
