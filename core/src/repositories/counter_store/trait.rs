//! Key-value store holding refresh gate counters.

use async_trait::async_trait;

use crate::errors::DomainError;

/// Plain get/set key-value store
///
/// Keys passed in are relative; implementations may namespace them. Values
/// are written without expiry. Failures to reach the store are reported as
/// `DomainError::Unavailable`.
#[async_trait]
pub trait CounterStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;
}
