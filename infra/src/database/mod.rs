//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management
//! - Token store schema bootstrap
//! - Calendar token repository

pub mod connection;
pub mod mysql;
pub mod schema;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::MySqlCalendarTokenRepository;
pub use schema::ensure_schema;
