//! Configuration loading
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults plus the plain environment variables read by
//!    `AppConfig::from_env` (after loading `.env`)
//! 2. The environment's TOML file (`config.<env>.toml`) or the file named by
//!    `CALENDAR_CONFIG`, if present
//! 3. `CALENDAR__*` variables, e.g. `CALENDAR__GATE__CREDITS=3`

use ::config::{Config, Environment as EnvSource, File};
use cal_shared::AppConfig;
use tracing::debug;

use crate::InfrastructureError;

/// Load the application configuration
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok();

    let defaults = AppConfig::from_env();
    let file = std::env::var("CALENDAR_CONFIG")
        .unwrap_or_else(|_| defaults.environment.config_file());
    debug!(file = %file, environment = %defaults.environment, "Loading configuration");

    let settings = Config::builder()
        .add_source(Config::try_from(&defaults)?)
        .add_source(File::with_name(&file).required(false))
        .add_source(
            EnvSource::with_prefix("CALENDAR")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &AppConfig) -> Result<(), InfrastructureError> {
    if config.gate.window_seconds <= 0 {
        return Err(InfrastructureError::Config(
            "gate.window_seconds must be positive".to_string(),
        ));
    }
    if config.gate.credits < 1 {
        return Err(InfrastructureError::Config(
            "gate.credits must be at least 1".to_string(),
        ));
    }
    if config.database.max_connections == 0 {
        return Err(InfrastructureError::Config(
            "database.max_connections must be at least 1".to_string(),
        ));
    }
    Ok(())
}
