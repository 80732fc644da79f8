//! Error types for the description factories.

use crate::model::ResourceType;
use thiserror::Error;

/// Errors that can occur during resource description operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DescriptionError {
    /// The requested description was not found.
    #[error("Description not found: {0}")]
    NotFound(String),

    /// The payload failed the kind's validation rule.
    #[error("{kind} description validation error: {message}")]
    ValidationError { kind: ResourceType, message: String },

    /// The request was sent to another kind's factory.
    #[error("{actual} description sent to the {expected} factory")]
    WrongFactory {
        expected: ResourceType,
        actual: ResourceType,
    },

    /// No factory is registered for the kind or link.
    #[error("No factory registered for {0}")]
    NoFactory(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for DescriptionError {
    fn from(msg: String) -> Self {
        DescriptionError::ActorCommunicationError(msg)
    }
}
