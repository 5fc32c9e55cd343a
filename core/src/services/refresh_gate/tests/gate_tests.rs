//! Unit tests for the refresh gate

use std::sync::Arc;

use cal_shared::GateConfig;
use chrono::{Duration, TimeZone, Utc};

use crate::clock::{Clock, ManualClock};
use crate::errors::DomainError;
use crate::repositories::{CounterStore, MemoryCounterStore};
use crate::services::refresh_gate::RefreshGate;

const FILE: &str = "2020001-2023-Fall.ics";

fn gate() -> (RefreshGate<MemoryCounterStore>, MemoryCounterStore, Arc<ManualClock>) {
    let store = MemoryCounterStore::new();
    let clock = Arc::new(ManualClock::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap()));
    let gate = RefreshGate::with_clock(store.clone(), GateConfig::default(), clock.clone());
    (gate, store, clock)
}

fn key() -> String {
    RefreshGate::<MemoryCounterStore>::key_for(FILE)
}

#[tokio::test]
async fn test_third_access_in_window_forces_regeneration() {
    let (gate, _store, clock) = gate();

    assert!(gate.should_use_cache(FILE).await.unwrap());
    clock.advance(Duration::minutes(10));
    assert!(gate.should_use_cache(FILE).await.unwrap());
    clock.advance(Duration::minutes(10));
    assert!(!gate.should_use_cache(FILE).await.unwrap());
    // a new window starts right away
    assert!(gate.should_use_cache(FILE).await.unwrap());
}

#[tokio::test]
async fn test_state_transitions() {
    let (gate, store, clock) = gate();
    let start = clock.now().timestamp();

    gate.should_use_cache(FILE).await.unwrap();
    assert_eq!(store.raw(&key()).await, Some(format!("{},2", start)));

    clock.advance(Duration::minutes(1));
    gate.should_use_cache(FILE).await.unwrap();
    assert_eq!(store.raw(&key()).await, Some(format!("{},1", start)));

    clock.advance(Duration::minutes(1));
    let reset_at = clock.now().timestamp();
    gate.should_use_cache(FILE).await.unwrap();
    assert_eq!(store.raw(&key()).await, Some(format!("{},2", reset_at)));

    gate.should_use_cache(FILE).await.unwrap();
    assert_eq!(store.raw(&key()).await, Some(format!("{},1", reset_at)));
}

#[tokio::test]
async fn test_expired_window_leaves_state_untouched() {
    let (gate, store, clock) = gate();

    assert!(gate.should_use_cache(FILE).await.unwrap());
    let stored = store.raw(&key()).await;
    let writes = store.write_count();

    clock.advance(Duration::minutes(61));
    assert!(gate.should_use_cache(FILE).await.unwrap());
    assert!(gate.should_use_cache(FILE).await.unwrap());

    assert_eq!(store.raw(&key()).await, stored);
    assert_eq!(store.write_count(), writes);
}

#[tokio::test]
async fn test_window_boundary_is_exclusive() {
    let (gate, store, clock) = gate();

    gate.should_use_cache(FILE).await.unwrap();
    let writes = store.write_count();

    clock.advance(Duration::seconds(3600));
    assert!(gate.should_use_cache(FILE).await.unwrap());
    assert_eq!(store.write_count(), writes);
}

#[tokio::test]
async fn test_keys_are_independent() {
    let (gate, _store, _clock) = gate();

    assert!(gate.should_use_cache("a.ics").await.unwrap());
    assert!(gate.should_use_cache("a.ics").await.unwrap());
    assert!(gate.should_use_cache("b.ics").await.unwrap());
    assert!(!gate.should_use_cache("a.ics").await.unwrap());
    assert!(gate.should_use_cache("b.ics").await.unwrap());
}

#[tokio::test]
async fn test_custom_credits() {
    let store = MemoryCounterStore::new();
    let config = GateConfig {
        window_seconds: 600,
        credits: 3,
    };
    let gate = RefreshGate::with_clock(store, config, Arc::new(ManualClock::default()));

    let decisions = [
        gate.should_use_cache(FILE).await.unwrap(),
        gate.should_use_cache(FILE).await.unwrap(),
        gate.should_use_cache(FILE).await.unwrap(),
        gate.should_use_cache(FILE).await.unwrap(),
    ];
    assert_eq!(decisions, [true, true, true, false]);
}

#[tokio::test]
async fn test_zero_remaining_is_treated_as_exhausted() {
    let (gate, store, clock) = gate();
    let now = clock.now().timestamp();
    store.set(&key(), &format!("{},0", now)).await.unwrap();

    assert!(!gate.should_use_cache(FILE).await.unwrap());
    assert_eq!(store.raw(&key()).await, Some(format!("{},2", now)));
}

#[tokio::test]
async fn test_store_outage_is_reported() {
    let (gate, store, _clock) = gate();
    store.set_unavailable(true);

    let err = gate.should_use_cache(FILE).await.unwrap_err();
    assert!(matches!(err, DomainError::Unavailable { .. }));

    store.set_unavailable(false);
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn test_corrupt_value_is_not_reset() {
    let (gate, store, _clock) = gate();
    store.set(&key(), "garbage").await.unwrap();

    let err = gate.should_use_cache(FILE).await.unwrap_err();
    assert!(matches!(err, DomainError::Internal { .. }));
    assert_eq!(store.raw(&key()).await.as_deref(), Some("garbage"));
}

#[tokio::test]
async fn test_out_of_range_window_start_is_reported() {
    let (gate, store, _clock) = gate();
    store.set(&key(), "-9223372036854775808,2").await.unwrap();
    let writes = store.write_count();

    let err = gate.should_use_cache(FILE).await.unwrap_err();
    assert!(matches!(err, DomainError::Internal { .. }));
    assert_eq!(store.write_count(), writes);
    assert_eq!(
        store.raw(&key()).await.as_deref(),
        Some("-9223372036854775808,2")
    );
}

#[test]
fn test_key_namespace() {
    assert_eq!(key(), "cal_tkn:2020001-2023-Fall.ics");
}
