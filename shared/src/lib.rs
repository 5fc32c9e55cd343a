//! Shared configuration types for the calendar token workspace
//!
//! This crate holds the configuration used by both the core services and the
//! infrastructure layer:
//! - Database connection settings
//! - Redis counter store settings
//! - Refresh gate window settings
//! - Environment detection and logging configuration

pub mod config;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, DatabaseConfig, Environment, GateConfig, LogFormat, LoggingConfig,
};
