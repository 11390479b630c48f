//! Target registry backends.

pub mod memory;

pub use memory::InMemoryTargetRegistry;
