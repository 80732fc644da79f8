//! Kubernetes manifest payload.

use crate::model::resource_type::Payload;
use serde::{Deserialize, Serialize};

/// One Kubernetes object, kept as its raw manifest text.
///
/// `kind` and `name` are lifted out of the manifest on validation so the object can be
/// identified without reparsing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesDescription {
    #[serde(default)]
    pub kubernetes_entity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl KubernetesDescription {
    pub fn from_manifest(manifest: impl Into<String>) -> Self {
        Self {
            kubernetes_entity: manifest.into(),
            ..Self::default()
        }
    }
}

impl Payload for KubernetesDescription {
    fn validate(&mut self) -> Result<(), String> {
        if self.kubernetes_entity.trim().is_empty() {
            return Err("kubernetes entity is required".to_string());
        }
        let manifest: serde_yaml::Value = serde_yaml::from_str(&self.kubernetes_entity)
            .map_err(|e| format!("invalid kubernetes entity: {e}"))?;

        let kind = manifest
            .get("kind")
            .and_then(serde_yaml::Value::as_str)
            .ok_or_else(|| "kubernetes entity has no kind".to_string())?;
        self.kind = Some(kind.to_string());

        if let Some(name) = manifest
            .get("metadata")
            .and_then(|metadata| metadata.get("name"))
            .and_then(serde_yaml::Value::as_str)
        {
            self.name = Some(name.to_string());
        }
        Ok(())
    }
}
