//! Error types for the composite description factory.

use thiserror::Error;

/// Errors that can occur during composite description operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CompositeError {
    /// The requested composite description was not found.
    #[error("Composite description not found: {0}")]
    NotFound(String),

    /// The composite description data provided is invalid.
    #[error("Composite description validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CompositeError {
    fn from(msg: String) -> Self {
        CompositeError::ActorCommunicationError(msg)
    }
}
