//! The composite-template content resource: import (write) and render (read), free of
//! any transport.

use crate::clients::{CompositeDescriptionClient, FactoryRegistry};
use crate::content::classifier::{classify, is_yaml_content_type, YamlType};
use crate::content::converter::{
    compose_from_yaml, compose_to_template, template_from_json, template_from_yaml,
};
use crate::content::error::{ContentError, BODY_REQUIRED};
use crate::content::kubernetes::{import_manifest, ManifestMaterializer};
use crate::content::orchestrator::Orchestrator;
use crate::content::renderer::{Disposition, RenderedTemplate, Renderer, TargetFormat};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

#[derive(Clone)]
pub struct CompositeContentService {
    orchestrator: Orchestrator,
    renderer: Renderer,
    composites: CompositeDescriptionClient,
    materializer: Arc<dyn ManifestMaterializer>,
}

impl CompositeContentService {
    pub fn new(
        registry: FactoryRegistry,
        composites: CompositeDescriptionClient,
        materializer: Arc<dyn ManifestMaterializer>,
    ) -> Self {
        Self {
            orchestrator: Orchestrator::new(registry.clone(), composites.clone()),
            renderer: Renderer::new(registry, composites.clone()),
            composites,
            materializer,
        }
    }

    /// Imports a template body and returns the created descriptor's self link.
    ///
    /// YAML bodies are classified and converted; any other content type must be a
    /// serialized template.
    #[instrument(skip(self, body), fields(len = body.len()))]
    pub async fn import(
        &self,
        body: &str,
        content_type: Option<&str>,
    ) -> Result<String, ContentError> {
        if body.trim().is_empty() {
            return Err(ContentError::validation("body is required", BODY_REQUIRED));
        }

        let is_yaml = content_type.is_some_and(is_yaml_content_type);
        let result = if is_yaml {
            let kind = classify(body, content_type);
            debug!(?kind, "Classified body");
            match kind {
                YamlType::CompositeTemplate => {
                    let template = template_from_yaml(body)?;
                    self.orchestrator.materialize(&template).await
                }
                YamlType::DockerCompose => {
                    let template = compose_to_template(&compose_from_yaml(body)?, None)?;
                    self.orchestrator.materialize(&template).await
                }
                YamlType::Kubernetes => {
                    import_manifest(self.materializer.as_ref(), &self.composites, body).await
                }
                YamlType::Unknown => Err(ContentError::Classification),
            }
        } else {
            let template = template_from_json(body)?;
            self.orchestrator.materialize(&template).await
        };

        if let Err(e) = &result {
            warn!(error = %e, "Import failed");
        }
        result
    }

    /// Renders the descriptor named by the `selfLink`, `format` and `disposition` query
    /// parameters.
    #[instrument(skip(self))]
    pub async fn render(
        &self,
        self_link: Option<&str>,
        format: Option<&str>,
        disposition: Option<&str>,
    ) -> Result<RenderedTemplate, ContentError> {
        self.renderer
            .render(
                self_link.unwrap_or_default(),
                TargetFormat::from_param(format),
                Disposition::from_param(disposition),
            )
            .await
    }
}
