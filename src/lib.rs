//! # Composite Content
//!
//! > **Import and render multi-component application templates.**
//!
//! A template (native Composite Template YAML/JSON, Docker Compose, or raw Kubernetes
//! manifests) is classified, converted, and materialized into one persisted description
//! per component plus a composite descriptor that links them. The read path rebuilds a
//! template (or the merged manifests) from a stored descriptor.
//!
//! ## Architecture Notes
//!
//! ### 1. Factories are actors
//! Every factory endpoint is a [`ResourceActor`](framework::ResourceActor) owning its
//! documents in a Tokio task. Description factories share one entity type and receive
//! their [`ResourceType`](model::ResourceType) as context, which selects the validation
//! rule applied in `on_create`.
//!
//! ### 2. Fan-out and join
//! Materialization and retrieval issue their requests concurrently through
//! [`join_all`](framework::join_all): a full join whose result order follows input
//! order. The first failure is returned and the rest are logged.
//!
//! ### 3. No compensation
//! A failed import leaves already-created children in their factories. Nothing in this
//! crate removes them.
//!
//! ### 4. Type-Safe Error Handling
//! Each factory has its own error type (`DescriptionError`, `CompositeError`). The
//! pipeline reports [`ContentError`](content::ContentError), which carries the HTTP
//! status and the machine-readable error code.
//!
//! ## Module Tour
//!
//! - [`framework`]: generic actor, client, mock client and join combinator.
//! - [`model`]: templates, Compose files, resource kinds, stored documents.
//! - [`description_actor`], [`composite_actor`]: the factories.
//! - [`clients`]: typed clients and the [`FactoryRegistry`](clients::FactoryRegistry).
//! - [`content`]: classifier, converter, Kubernetes adapter, orchestrator, renderer.
//! - [`http`]: axum routes.
//! - [`lifecycle`]: [`ContentSystem`](lifecycle::ContentSystem) and tracing setup.
//! - [`config`]: command-line and environment settings.

pub mod clients;
pub mod composite_actor;
pub mod config;
pub mod content;
pub mod description_actor;
pub mod framework;
pub mod http;
pub mod lifecycle;
pub mod model;
