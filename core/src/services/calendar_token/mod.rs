//! Calendar token service module
//!
//! Issues the bearer tokens behind calendar subscription links and resolves
//! them when an export is requested:
//! - Issuance and get-or-issue for a calendar
//! - Lookup by token or by calendar identity
//! - Last-use tracking
//! - Bulk revocation for a user

mod service;


pub use service::CalendarTokenService;
