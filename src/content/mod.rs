//! The template content pipeline.
//!
//! Write: [`classifier`] -> [`converter`] (or [`kubernetes`]) -> [`orchestrator`].
//! Read: [`renderer`], which reuses the converter and the Kubernetes merge.
//! [`service`] ties both directions behind one type.

pub mod classifier;
pub mod converter;
pub mod error;
pub mod kubernetes;
pub mod orchestrator;
pub mod renderer;
pub mod service;

pub use classifier::{classify, is_yaml_content_type, YamlType};
pub use error::ContentError;
pub use kubernetes::{ManifestMaterializer, StoreMaterializer};
pub use orchestrator::Orchestrator;
pub use renderer::{Disposition, RenderedTemplate, Renderer, TargetFormat};
pub use service::CompositeContentService;
