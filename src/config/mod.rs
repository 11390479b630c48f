//! Configuration models for the dispatch and delivery pools and the HTTP client.

pub mod hooks;

pub use hooks::{DeliveryConfig, HooksConfig, PoolConfig};
