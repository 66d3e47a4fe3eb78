//! Business logic services

pub mod auth;
pub mod borrowings;
pub mod catalog;
pub mod password;
pub mod patrons;
pub mod token;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub patrons: patrons::PatronsService,
    pub borrowings: borrowings::BorrowingsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        let tokens = token::TokenService::new(auth_config);
        Self {
            auth: auth::AuthService::new(repository.clone(), tokens),
            catalog: catalog::CatalogService::new(repository.clone()),
            patrons: patrons::PatronsService::new(repository.clone()),
            borrowings: borrowings::BorrowingsService::new(repository),
        }
    }
}
