//! Generic actor framework backing the document store.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that persisted document types implement
//! - [`ResourceActor`] - Generic factory actor that owns documents
//! - [`ResourceClient`] - Type-safe client for a factory actor
//! - [`FrameworkError`] - Common error types
//! - [`join_all`](join::join_all) - Fan-out/join combinator for batches of requests
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod core;
pub mod join;
pub mod mock;

pub use self::core::*;
pub use self::join::join_all;
pub use self::mock::{create_mock_client, expect_create, expect_get, MockClient};
