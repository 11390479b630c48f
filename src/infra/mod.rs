//! Infrastructure adapters for queues, target registries and resource stores.

pub mod queue;
pub mod registry;
pub mod store;

pub use queue::InMemoryQueue;
pub use registry::InMemoryTargetRegistry;
pub use store::InMemoryProjectStore;
