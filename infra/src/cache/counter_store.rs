//! Redis-backed counter store for the refresh gate

use async_trait::async_trait;
use cal_core::{CounterStore, DomainError};
use cal_shared::CacheConfig;

use super::redis_client::RedisClient;
use crate::InfrastructureError;

/// `CounterStore` over Redis plain string keys
///
/// Every key is namespaced with the configured prefix and stored without
/// expiry.
#[derive(Clone)]
pub struct RedisCounterStore {
    client: RedisClient,
    config: CacheConfig,
}

impl RedisCounterStore {
    pub fn new(client: RedisClient, config: CacheConfig) -> Self {
        Self { client, config }
    }

    /// Connect to Redis and build the store
    pub async fn connect(config: CacheConfig) -> Result<Self, InfrastructureError> {
        let client = RedisClient::new(&config).await?;
        Ok(Self::new(client, config))
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }

    /// Full Redis key for a gate key
    pub fn redis_key(&self, key: &str) -> String {
        self.config.make_key(key)
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let value = self.client.get(&self.redis_key(key)).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.client.set(&self.redis_key(key), value).await?;
        Ok(())
    }
}
