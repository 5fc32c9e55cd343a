//! # Infrastructure Layer
//!
//! Concrete storage behind the calendar token core:
//! - **Database**: MySQL token store using SQLx
//! - **Cache**: Redis client and the refresh gate counter store
//! - **Logging**: `tracing-subscriber` setup driven by `LoggingConfig`
//! - **Config**: `.env`, file and environment configuration loading
//!
//! [`bootstrap::initialize`] wires everything into ready-to-use services.

// Re-export core types for convenience
pub use cal_core::errors::*;

pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod database;
pub mod logging;

pub use bootstrap::{initialize, CalendarServices};
pub use config::load_config;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration source could not be read or deserialized
    #[error("Settings error: {0}")]
    Settings(#[from] ::config::ConfigError),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Config(_) | InfrastructureError::Settings(_) => {
                DomainError::Internal {
                    message: err.to_string(),
                }
            }
            _ => DomainError::Unavailable {
                message: err.to_string(),
            },
        }
    }
}
