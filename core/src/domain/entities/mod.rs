//! Domain entities representing stored records.

pub mod calendar_token;
pub mod gate_state;

// Re-export commonly used types
pub use calendar_token::{
    mask_token, parse_token, validate_identifier, validate_semester, CalendarToken,
    ResourceKind, MAX_IDENTIFIER_LENGTH, MAX_SEMESTER_LENGTH,
};
pub use gate_state::GateState;
