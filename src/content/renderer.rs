//! Read path: descriptor reference in, YAML document out.

use crate::clients::{ActorClient, CompositeDescriptionClient, FactoryRegistry};
use crate::content::converter::{
    compose_to_yaml, description_to_template, template_to_compose, template_to_yaml,
    COMPOSE_VERSION,
};
use crate::content::error::{ContentError, SELF_LINK_REQUIRED};
use crate::content::kubernetes::merge_manifests;
use crate::model::COMPOSITE_DESCRIPTIONS_LINK;
use tracing::{debug, instrument};

pub const YAML_CONTENT_TYPE: &str = "application/yaml";
pub const TEMPLATE_FILENAME: &str = "template.yaml";

/// Output schema for a non-Kubernetes descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetFormat {
    #[default]
    CompositeTemplate,
    DockerCompose,
}

impl TargetFormat {
    /// `Docker` (any case) selects Compose; anything else the native template.
    pub fn from_param(format: Option<&str>) -> Self {
        match format {
            Some(format) if format.eq_ignore_ascii_case("docker") => TargetFormat::DockerCompose,
            _ => TargetFormat::CompositeTemplate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disposition {
    Inline,
    #[default]
    Attachment,
}

impl Disposition {
    /// `inline` (any case) selects inline; anything else is a download.
    pub fn from_param(disposition: Option<&str>) -> Self {
        match disposition {
            Some(d) if d.eq_ignore_ascii_case("inline") => Disposition::Inline,
            _ => Disposition::Attachment,
        }
    }

    /// Value of the `Content-Disposition` header.
    pub fn header_value(self) -> String {
        let kind = match self {
            Disposition::Inline => "inline",
            Disposition::Attachment => "attachment",
        };
        format!("{kind}; filename=\"{TEMPLATE_FILENAME}\"")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedTemplate {
    pub body: String,
    pub content_type: &'static str,
    pub content_disposition: String,
}

/// Rewrites a bare id under the composite-description factory. References that already
/// start with `/` are used as given.
pub fn normalize_self_link(self_link: &str) -> Result<String, ContentError> {
    let self_link = self_link.trim();
    if self_link.is_empty() {
        return Err(ContentError::validation(
            "selfLink is required",
            SELF_LINK_REQUIRED,
        ));
    }
    if self_link.starts_with('/') {
        return Ok(self_link.to_string());
    }
    Ok(format!("{COMPOSITE_DESCRIPTIONS_LINK}/{self_link}"))
}

#[derive(Clone)]
pub struct Renderer {
    registry: FactoryRegistry,
    composites: CompositeDescriptionClient,
}

impl Renderer {
    pub fn new(registry: FactoryRegistry, composites: CompositeDescriptionClient) -> Self {
        Self {
            registry,
            composites,
        }
    }

    /// Renders the descriptor at `self_link`.
    ///
    /// A descriptor whose children are all Kubernetes descriptions renders as the merged
    /// manifests, whatever `format` asks for.
    #[instrument(skip(self))]
    pub async fn render(
        &self,
        self_link: &str,
        format: TargetFormat,
        disposition: Disposition,
    ) -> Result<RenderedTemplate, ContentError> {
        let link = normalize_self_link(self_link)?;
        let descriptor = self
            .composites
            .get(link.clone())
            .await?
            .ok_or_else(|| ContentError::NotFound(link.clone()))?;

        let body = if descriptor.is_all_kubernetes() {
            debug!(%link, "Merging Kubernetes manifests");
            merge_manifests(&descriptor, &self.registry).await?
        } else {
            let mut template = description_to_template(&descriptor, &self.registry).await?;
            match format {
                TargetFormat::CompositeTemplate => template_to_yaml(&template)?,
                TargetFormat::DockerCompose => {
                    template
                        .compose_version
                        .get_or_insert_with(|| COMPOSE_VERSION.to_string());
                    compose_to_yaml(&template_to_compose(&template)?)?
                }
            }
        };

        Ok(RenderedTemplate {
            body,
            content_type: YAML_CONTENT_TYPE,
            content_disposition: disposition.header_value(),
        })
    }
}
