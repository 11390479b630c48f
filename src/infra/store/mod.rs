//! Resource store backends.

pub mod memory;

pub use memory::InMemoryProjectStore;
