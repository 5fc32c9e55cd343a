//! Value objects representing immutable domain concepts.

pub mod token_lookup;

// Re-export commonly used types
pub use token_lookup::{LookupRequest, TokenLookup};
