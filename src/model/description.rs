//! Persisted documents: child resource descriptions and the composite descriptor that
//! links them together.

use crate::model::{ComponentTemplate, ResourceType};
use std::collections::BTreeMap;

/// One materialized component, as stored by its kind's factory.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDescription {
    pub document_self_link: String,
    pub resource_type: ResourceType,
    /// Normalized payload (store-shaped, camelCase keys).
    pub data: serde_yaml::Value,
    pub children: BTreeMap<String, ComponentTemplate>,
}

/// Payload for creating a [`ResourceDescription`].
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptionCreate {
    /// The kind the caller believes it is creating. The factory rejects a mismatch.
    pub resource_type: ResourceType,
    pub data: serde_yaml::Value,
    pub children: BTreeMap<String, ComponentTemplate>,
}

impl ResourceDescription {
    /// The payload's `name`, when it has one.
    pub fn name(&self) -> Option<&str> {
        self.data
            .get("name")
            .and_then(serde_yaml::Value::as_str)
            .filter(|name| !name.trim().is_empty())
    }

    /// Raw manifest text of a Kubernetes description.
    pub fn kubernetes_entity(&self) -> Option<&str> {
        match self.resource_type {
            ResourceType::Kubernetes => self
                .data
                .get("kubernetesEntity")
                .and_then(serde_yaml::Value::as_str),
            _ => None,
        }
    }
}

impl DescriptionCreate {
    pub fn new(resource_type: ResourceType, data: serde_yaml::Value) -> Self {
        Self {
            resource_type,
            data,
            children: BTreeMap::new(),
        }
    }

    pub fn with_children(mut self, children: BTreeMap<String, ComponentTemplate>) -> Self {
        self.children = children;
        self
    }
}

/// Durable record linking the persisted identities of a composite's children.
///
/// `description_links` is the only membership record; children hold no pointer back.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeDescription {
    pub document_self_link: String,
    pub name: String,
    pub description_links: Vec<String>,
}

/// Payload for creating a [`CompositeDescription`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeDescriptionCreate {
    pub name: String,
    pub description_links: Vec<String>,
}

impl CompositeDescription {
    /// True when every child routes to the Kubernetes factory. An empty descriptor is not
    /// a Kubernetes application.
    pub fn is_all_kubernetes(&self) -> bool {
        !self.description_links.is_empty()
            && self
                .description_links
                .iter()
                .all(|link| ResourceType::from_link(link) == Some(ResourceType::Kubernetes))
    }
}
