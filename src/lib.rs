//! # Project Hooks
//!
//! Asynchronous webhook fan-out for newly created project records.
//!
//! When a project is created, every registered webhook target receives one
//! HTTP POST carrying a snapshot of the project. The creating request never
//! waits for those POSTs, and one slow or broken target never affects the
//! others.
//!
//! ## Flow
//!
//! ```text
//! create_project ──commit──▶ WebhookNotifier::notify_resource_created
//!                                   │ submit(ResourceCreatedEvent)
//!                                   ▼
//!                            dispatch pool ── Dispatcher::on_resource_created
//!                                                 │ list targets, build payload once
//!                                                 │ submit(DeliveryTask) × N
//!                                                 ▼
//!                            delivery pool ── DeliveryWorker::deliver (one POST each)
//! ```
//!
//! ## Failure policy
//!
//! - **Resource gone** before the payload is built: the dispatch is abandoned.
//! - **Delivery failure** (timeout, refused connection, DNS, non-2xx): never
//!   retried and never propagated. The pool logs it at `warn`, counts it in
//!   [`core::PoolStats`] and records it in the audit sink.
//! - **Submission failure** (queue full, pool shut down): logged at `error`,
//!   counted as `rejected` and returned to the submitter.
//!
//! ## Wire format
//!
//! ```json
//! { "data": { "type": "Project", "id": 7, "attributes": { "rating": "4.97", ... } } }
//! ```
//!
//! sent with `Content-Type: application/vnd.api+json` and an
//! `X-Webhook-Delivery` id header.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use project_hooks::builders::PipelineBuilder;
//! use project_hooks::config::HooksConfig;
//! use project_hooks::infra::{InMemoryProjectStore, InMemoryTargetRegistry};
//! use project_hooks::runtime::{create_project, TokioSpawner};
//!
//! let registry = Arc::new(InMemoryTargetRegistry::new());
//! let store = Arc::new(InMemoryProjectStore::new());
//! let pipeline = PipelineBuilder::new(HooksConfig::from_env()?, TokioSpawner::current())
//!     .registry(registry.clone())
//!     .store(store.clone())
//!     .build()?;
//!
//! let project = create_project(store.as_ref(), pipeline.notifier(), new_project).await?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core scheduling abstractions, ports and error types.
pub mod core;
/// Configuration models for pools and the HTTP client.
pub mod config;
/// Builders to construct the pipeline from configuration.
pub mod builders;
/// Payload building, dispatch and delivery.
pub mod hooks;
/// Infrastructure adapters for queues, registries and stores.
pub mod infra;
/// Resources, events and webhook targets.
pub mod model;
/// Runtime adapters and API surface.
pub mod runtime;
/// Shared utilities.
pub mod util;
