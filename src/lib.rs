//! Bookworm Personal Library Inventory
//!
//! A Rust implementation of the Bookworm inventory server, providing a
//! REST JSON API for managing books, the people credited on them, and
//! the collections they are shelved in.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod language;
pub mod models;
pub mod projection;
pub mod repository;
pub mod services;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub repository: repository::Repository,
    pub services: Arc<services::Services>,
}
