//! # Calendar Token Core
//!
//! Domain layer for calendar subscription tokens. It contains the token
//! entity, the lookup value objects, the error taxonomy, the repository and
//! counter store interfaces, and the two services built on them:
//!
//! - [`CalendarTokenService`] issues, resolves and revokes the bearer tokens
//!   that expose a personal `.ics` feed.
//! - [`RefreshGate`] decides whether a cached export may be served or must be
//!   regenerated.
//!
//! Storage is injected; see the `cal_infra` crate for the MySQL and Redis
//! implementations.

pub mod clock;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use domain::entities::{
    mask_token, parse_token, CalendarToken, GateState, ResourceKind, MAX_IDENTIFIER_LENGTH,
    MAX_SEMESTER_LENGTH,
};
pub use domain::value_objects::{LookupRequest, TokenLookup};
pub use errors::{DomainError, DomainResult};
pub use repositories::{CalendarTokenRepository, CounterStore};
pub use services::{CalendarTokenService, RefreshGate, GATE_KEY_NAMESPACE};

#[cfg(any(test, feature = "mock-services"))]
pub use repositories::{MemoryCounterStore, MockCalendarTokenRepository};
