//! Builders to construct the webhook pipeline from configuration.

pub mod pipeline_builder;

pub use pipeline_builder::{DeliveryPool, DispatchPool, PipelineBuilder, PipelineStats, WebhookPipeline};
