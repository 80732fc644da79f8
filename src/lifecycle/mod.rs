//! Actor wiring, shutdown and tracing setup.

pub mod content_system;
pub mod tracing;

pub use self::content_system::ContentSystem;
pub use self::tracing::setup_tracing;
