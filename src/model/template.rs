//! The canonical Composite Template model.
//!
//! ```yaml
//! name: wordpress
//! components:
//!   db:
//!     type: App.Container
//!     data:
//!       image: mysql:5.7
//!   wordpress:
//!     type: App.Container
//!     data:
//!       image: wordpress:4
//!       links: [db]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire-format description of a multi-component application, keyed by component id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeTemplate {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The `version` of the Compose file this template was converted from.
    #[serde(
        default,
        rename = "composeVersion",
        skip_serializing_if = "Option::is_none"
    )]
    pub compose_version: Option<String>,
    #[serde(default)]
    pub components: BTreeMap<String, ComponentTemplate>,
}

/// One declared unit within a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentTemplate {
    /// Resource-kind tag, see [`ResourceType::tag`](crate::model::ResourceType::tag).
    #[serde(rename = "type")]
    pub component_type: String,
    /// Kind-specific payload, opaque to the template itself.
    #[serde(default)]
    pub data: serde_yaml::Value,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<String, ComponentTemplate>,
}

impl CompositeTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            compose_version: None,
            components: BTreeMap::new(),
        }
    }

    pub fn with_component(mut self, id: impl Into<String>, component: ComponentTemplate) -> Self {
        self.components.insert(id.into(), component);
        self
    }
}

impl ComponentTemplate {
    pub fn new(component_type: impl Into<String>, data: serde_yaml::Value) -> Self {
        Self {
            component_type: component_type.into(),
            data,
            children: BTreeMap::new(),
        }
    }
}
