pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

pub use r#trait::CounterStore;

#[cfg(any(test, feature = "mock-services"))]
pub mod memory;
#[cfg(any(test, feature = "mock-services"))]
pub use memory::MemoryCounterStore;
