//! Kubernetes manifests bypass the template converter in both directions.
//!
//! On write the raw manifest goes to a [`ManifestMaterializer`] and the returned links are
//! wrapped in a timestamp-named descriptor. On read the stored manifests are concatenated
//! back in link order.

use crate::clients::{CompositeDescriptionClient, DescriptionClient, FactoryRegistry};
use crate::content::classifier::split_documents;
use crate::content::error::ContentError;
use crate::framework::join_all;
use crate::model::{CompositeDescription, KubernetesDescription};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Turns raw (possibly multi-document) manifest text into persisted Kubernetes
/// descriptions and returns their links.
#[async_trait]
pub trait ManifestMaterializer: Send + Sync {
    async fn materialize(&self, manifest: &str) -> Result<Vec<String>, ContentError>;
}

/// Persists one Kubernetes description per manifest document through the Kubernetes
/// factory.
#[derive(Clone)]
pub struct StoreMaterializer {
    factory: DescriptionClient,
}

impl StoreMaterializer {
    pub fn new(factory: DescriptionClient) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl ManifestMaterializer for StoreMaterializer {
    #[instrument(skip_all)]
    async fn materialize(&self, manifest: &str) -> Result<Vec<String>, ContentError> {
        let documents = split_documents(manifest);
        if documents.is_empty() {
            return Err(ContentError::Kubernetes(
                "manifest contains no documents".to_string(),
            ));
        }
        debug!(count = documents.len(), "Materializing manifest");

        let creations: Vec<_> = documents
            .into_iter()
            .map(|document| {
                let factory = self.factory.clone();
                async move {
                    let data = serde_yaml::to_value(KubernetesDescription::from_manifest(document))
                        .map_err(|e| ContentError::Kubernetes(e.to_string()))?;
                    factory
                        .create_description(data, BTreeMap::new())
                        .await
                        .map_err(|e| ContentError::Kubernetes(e.to_string()))
                }
            })
            .collect();
        join_all("kubernetes-manifest", creations).await
    }
}

/// Name given to descriptors created from a manifest.
pub fn application_name() -> String {
    format!(
        "Kubernetes Application {}",
        Utc::now().format("%Y-%m-%d-%H-%M-%S")
    )
}

/// Write path: materialize the manifest, then persist a descriptor over its links.
#[instrument(skip_all)]
pub async fn import_manifest(
    materializer: &dyn ManifestMaterializer,
    composites: &CompositeDescriptionClient,
    manifest: &str,
) -> Result<String, ContentError> {
    let links = materializer.materialize(manifest).await?;
    let link = composites
        .create_composite(application_name(), links)
        .await
        .map_err(|e| ContentError::Persistence(e.to_string()))?;
    info!(%link, "Kubernetes application created");
    Ok(link)
}

/// Read path: fetch every child and join the raw manifests, trimmed, one per line, in
/// link order.
#[instrument(skip_all, fields(link = %descriptor.document_self_link))]
pub async fn merge_manifests(
    descriptor: &CompositeDescription,
    registry: &FactoryRegistry,
) -> Result<String, ContentError> {
    let mut fetches = Vec::with_capacity(descriptor.description_links.len());
    for link in &descriptor.description_links {
        let client = registry.route(link)?.clone();
        let link = link.clone();
        fetches.push(async move {
            client
                .fetch_description(link)
                .await
                .map_err(ContentError::from)
        });
    }
    let descriptions = join_all("kubernetes-merge", fetches).await?;

    let mut entities = Vec::with_capacity(descriptions.len());
    for description in &descriptions {
        let entity = description.kubernetes_entity().ok_or_else(|| {
            ContentError::Retrieval(format!(
                "{} has no kubernetes entity",
                description.document_self_link
            ))
        })?;
        entities.push(entity.trim());
    }
    Ok(entities.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_name() {
        let name = application_name();
        let stamp = name
            .strip_prefix("Kubernetes Application ")
            .expect("prefix");
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d-%H-%M-%S").is_ok());
    }
}
