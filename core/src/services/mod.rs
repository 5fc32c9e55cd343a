//! Business services containing domain logic and use cases.

pub mod calendar_token;
pub mod refresh_gate;

// Re-export commonly used types
pub use calendar_token::CalendarTokenService;
pub use refresh_gate::{RefreshGate, GATE_KEY_NAMESPACE};
