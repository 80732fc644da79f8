//! Error taxonomy of the content pipeline.

use crate::composite_actor::CompositeError;
use crate::description_actor::DescriptionError;
use crate::framework::FrameworkError;
use axum::http::StatusCode;
use thiserror::Error;

pub const BODY_REQUIRED: &str = "compute.body.required";
pub const SELF_LINK_REQUIRED: &str = "compute.self-link.required";
pub const UNKNOWN_YAML_TYPE: &str = "compute.content.unknown.yaml.type";
pub const DESERIALIZE_TEMPLATE: &str = "compute.content.deserialize.template";
pub const DESERIALIZE_COMPOSE: &str = "compute.content.deserialize.compose";
pub const COMPONENTS_NOT_SUPPORTED: &str = "compute.template.components.not.supported";
pub const TEMPLATE_INVALID: &str = "compute.template.invalid";
pub const CREATE_FAILED: &str = "compute.composite-description.create.failed";

/// Errors surfaced by import and render.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Malformed input, reported before any request is issued.
    #[error("{message}")]
    Validation { message: String, code: &'static str },

    /// The text is not a recognized template format.
    #[error("Unknown YAML content type! Only Blueprint and Docker Compose v2 formats are supported.")]
    Classification,

    /// A child description could not be created. Only the first failure of a batch.
    #[error("Failed to create CompositeDescription: {0}")]
    Creation(String),

    /// Every child was created but the descriptor itself was not.
    #[error("Failed to create CompositeDescription: {0}")]
    Persistence(String),

    /// The manifest materializer failed.
    #[error("Failed to create CompositeDescription: {0}")]
    Kubernetes(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A fetch on the read path failed.
    #[error("Retrieval failed: {0}")]
    Retrieval(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error(transparent)]
    Framework(#[from] FrameworkError),
}

impl ContentError {
    pub fn validation(message: impl Into<String>, code: &'static str) -> Self {
        ContentError::Validation {
            message: message.into(),
            code,
        }
    }

    /// Machine-readable code for the response body.
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            ContentError::Validation { code, .. } => Some(*code),
            ContentError::Classification => Some(UNKNOWN_YAML_TYPE),
            ContentError::Creation(_)
            | ContentError::Persistence(_)
            | ContentError::Kubernetes(_) => Some(CREATE_FAILED),
            _ => None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ContentError::Validation { .. }
            | ContentError::Classification
            | ContentError::Creation(_)
            | ContentError::Persistence(_)
            | ContentError::Kubernetes(_) => StatusCode::BAD_REQUEST,
            ContentError::NotFound(_) => StatusCode::NOT_FOUND,
            ContentError::Retrieval(_)
            | ContentError::Serialization(_)
            | ContentError::Framework(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A failed fetch on the read path. A missing child is a retrieval failure of the
/// descriptor that references it, not a 404 of the request.
impl From<DescriptionError> for ContentError {
    fn from(e: DescriptionError) -> Self {
        ContentError::Retrieval(e.to_string())
    }
}

impl From<CompositeError> for ContentError {
    fn from(e: CompositeError) -> Self {
        match e {
            CompositeError::NotFound(link) => ContentError::NotFound(link),
            other => ContentError::Retrieval(other.to_string()),
        }
    }
}
