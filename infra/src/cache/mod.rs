//! Cache module for Redis-backed state
//!
//! Provides the Redis client with retry logic and the counter store used by
//! the export refresh gate.

pub mod counter_store;
pub mod redis_client;

pub use counter_store::RedisCounterStore;
pub use redis_client::RedisClient;

// Re-export commonly used types
pub use cal_shared::CacheConfig;
