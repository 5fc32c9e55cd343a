//! Export refresh gate
//!
//! Decides per resource key (an export filename) whether a cached artifact
//! may be served or must be regenerated. With the default settings the third
//! access inside one hour forces a regeneration and opens a new window.

mod service;

#[cfg(test)]
mod tests;

pub use service::{RefreshGate, GATE_KEY_NAMESPACE};
