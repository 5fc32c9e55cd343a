//! Configuration module
//!
//! - `cache` - Redis counter store configuration
//! - `database` - Relational store connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `gate` - Refresh gate window configuration

pub mod cache;
pub mod database;
pub mod environment;
pub mod gate;

use serde::{Deserialize, Serialize};

pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use gate::GateConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Token store database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Counter store configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Refresh gate configuration
    #[serde(default)]
    pub gate: GateConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            gate: GateConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            gate: GateConfig::from_env(),
            logging: LoggingConfig::for_environment(environment).with_env_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_development() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.gate.window_seconds, 3600);
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let json = r#"{ "environment": "production", "cache": { "url": "redis://cache:6379" } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.cache.url, "redis://cache:6379");
        assert_eq!(config.cache.key_prefix, "calendar");
        assert_eq!(config.gate.credits, 2);
    }
}
