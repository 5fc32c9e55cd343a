//! MySQL repository implementations

mod calendar_token_repository_impl;

pub use calendar_token_repository_impl::MySqlCalendarTokenRepository;
