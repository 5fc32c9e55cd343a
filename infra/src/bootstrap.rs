//! Service wiring
//!
//! Connects to MySQL and Redis, makes sure the token table exists and hands
//! back the two services ready for use.

use anyhow::Context;
use cal_core::{CalendarTokenService, RefreshGate};
use cal_shared::AppConfig;
use tracing::info;

use crate::cache::RedisCounterStore;
use crate::database::{ensure_schema, DatabasePool, MySqlCalendarTokenRepository};

/// Calendar token store and refresh gate backed by real storage
pub struct CalendarServices {
    pub tokens: CalendarTokenService<MySqlCalendarTokenRepository>,
    pub gate: RefreshGate<RedisCounterStore>,
    pub pool: DatabasePool,
}

/// Build the services from configuration
pub async fn initialize(config: &AppConfig) -> anyhow::Result<CalendarServices> {
    info!(environment = %config.environment, "Initializing calendar services");

    let pool = DatabasePool::new(&config.database)
        .await
        .context("failed to create database pool")?;
    pool.health_check()
        .await
        .context("calendar token store is not reachable")?;
    ensure_schema(pool.get_pool())
        .await
        .context("failed to prepare calendar token schema")?;

    let store = RedisCounterStore::connect(config.cache.clone())
        .await
        .context("failed to connect to the counter store")?;

    let tokens = CalendarTokenService::new(MySqlCalendarTokenRepository::new(pool.get_pool().clone()));
    let gate = RefreshGate::new(store, config.gate.clone());

    info!(
        window_seconds = config.gate.window_seconds,
        credits = config.gate.credits,
        "Calendar services ready"
    );

    Ok(CalendarServices { tokens, gate, pool })
}
