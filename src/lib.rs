//! Libris Library Management System
//!
//! A Rust implementation of the Libris library management backend,
//! providing a REST JSON API for registering users, authenticating them
//! with bearer tokens, and tracking books, patrons, and borrowing records.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
