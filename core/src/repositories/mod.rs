//! Storage interfaces consumed by the services.

pub mod calendar_token;
pub mod counter_store;

pub use calendar_token::CalendarTokenRepository;
pub use counter_store::CounterStore;

#[cfg(any(test, feature = "mock-services"))]
pub use calendar_token::MockCalendarTokenRepository;
#[cfg(any(test, feature = "mock-services"))]
pub use counter_store::MemoryCounterStore;
