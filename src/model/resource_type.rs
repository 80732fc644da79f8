//! Closed set of resource kinds a template component can declare.
//!
//! Each kind carries its wire tag (the component `type`), the factory link its
//! documents are created under, and the validation rule applied by that factory.

use crate::model::{ComputeDescription, ContainerDescription, KubernetesDescription};
use crate::model::{NetworkDescription, VolumeDescription};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;

pub const CONTAINER_DESCRIPTIONS_LINK: &str = "/resources/container-descriptions";
pub const NETWORK_DESCRIPTIONS_LINK: &str = "/resources/container-network-descriptions";
pub const VOLUME_DESCRIPTIONS_LINK: &str = "/resources/container-volume-descriptions";
pub const COMPUTE_DESCRIPTIONS_LINK: &str = "/resources/compute-descriptions";
pub const KUBERNETES_DESCRIPTIONS_LINK: &str = "/resources/kubernetes-descriptions";
pub const COMPOSITE_DESCRIPTIONS_LINK: &str = "/resources/composite-descriptions";

/// A resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceType {
    Container,
    Network,
    Volume,
    Compute,
    Kubernetes,
}

impl ResourceType {
    pub const ALL: [ResourceType; 5] = [
        ResourceType::Container,
        ResourceType::Network,
        ResourceType::Volume,
        ResourceType::Compute,
        ResourceType::Kubernetes,
    ];

    /// The component `type` tag used in templates.
    pub fn tag(self) -> &'static str {
        match self {
            ResourceType::Container => "App.Container",
            ResourceType::Network => "App.Network",
            ResourceType::Volume => "App.Volume",
            ResourceType::Compute => "Compute",
            ResourceType::Kubernetes => "Kubernetes",
        }
    }

    /// Resolves a component `type` tag. Matching is exact.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// The factory link documents of this kind are created under.
    pub fn factory_link(self) -> &'static str {
        match self {
            ResourceType::Container => CONTAINER_DESCRIPTIONS_LINK,
            ResourceType::Network => NETWORK_DESCRIPTIONS_LINK,
            ResourceType::Volume => VOLUME_DESCRIPTIONS_LINK,
            ResourceType::Compute => COMPUTE_DESCRIPTIONS_LINK,
            ResourceType::Kubernetes => KUBERNETES_DESCRIPTIONS_LINK,
        }
    }

    /// Routes a document link to the kind whose factory owns it.
    pub fn from_link(link: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| {
            link.strip_prefix(kind.factory_link())
                .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /// Containers, networks and volumes: the kinds a container-only template may hold
    /// and the kinds Docker Compose can express.
    pub fn is_container_family(self) -> bool {
        matches!(
            self,
            ResourceType::Container | ResourceType::Network | ResourceType::Volume
        )
    }

    /// Validates a component payload against this kind's rule and returns it normalized.
    ///
    /// Keys the typed view does not model are kept as given; modeled keys take their
    /// normalized form.
    pub fn normalize(self, data: serde_yaml::Value) -> Result<serde_yaml::Value, String> {
        match self {
            ResourceType::Container => normalize_as::<ContainerDescription>(data),
            ResourceType::Network => normalize_as::<NetworkDescription>(data),
            ResourceType::Volume => normalize_as::<VolumeDescription>(data),
            ResourceType::Compute => normalize_as::<ComputeDescription>(data),
            ResourceType::Kubernetes => normalize_as::<KubernetesDescription>(data),
        }
    }
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// A typed component payload with a validation rule.
pub trait Payload: Serialize + DeserializeOwned {
    fn validate(&mut self) -> Result<(), String>;
}

fn normalize_as<P: Payload>(data: serde_yaml::Value) -> Result<serde_yaml::Value, String> {
    let mut payload: P = serde_yaml::from_value(data.clone()).map_err(|e| e.to_string())?;
    payload.validate()?;
    let normalized = serde_yaml::to_value(&payload).map_err(|e| e.to_string())?;

    match (data, normalized) {
        (serde_yaml::Value::Mapping(mut source), serde_yaml::Value::Mapping(typed)) => {
            source.extend(typed);
            Ok(serde_yaml::Value::Mapping(source))
        }
        (_, normalized) => Ok(normalized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for kind in ResourceType::ALL {
            assert_eq!(ResourceType::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(ResourceType::from_tag("App.Closure"), None);
        assert_eq!(ResourceType::from_tag("app.container"), None);
    }

    #[test]
    fn test_link_routing() {
        assert_eq!(
            ResourceType::from_link("/resources/kubernetes-descriptions/abc"),
            Some(ResourceType::Kubernetes)
        );
        assert_eq!(
            ResourceType::from_link("/resources/container-descriptions/abc"),
            Some(ResourceType::Container)
        );
        // Shared prefix with the container factory must not be misrouted
        assert_eq!(
            ResourceType::from_link("/resources/container-network-descriptions/n1"),
            Some(ResourceType::Network)
        );
        assert_eq!(ResourceType::from_link("/resources/kubernetes-descriptions"), None);
        assert_eq!(ResourceType::from_link("/resources/composite-descriptions/x"), None);
    }

    #[test]
    fn test_container_family() {
        assert!(ResourceType::Container.is_container_family());
        assert!(ResourceType::Network.is_container_family());
        assert!(ResourceType::Volume.is_container_family());
        assert!(!ResourceType::Compute.is_container_family());
        assert!(!ResourceType::Kubernetes.is_container_family());
    }

    #[test]
    fn test_normalize_rejects_container_without_image() {
        let data: serde_yaml::Value = serde_yaml::from_str("name: web").unwrap();
        let err = ResourceType::Container.normalize(data).unwrap_err();
        assert!(err.contains("image"));
    }

    #[test]
    fn test_normalize_keeps_unmodeled_keys() {
        let data: serde_yaml::Value =
            serde_yaml::from_str("name: vm
cpuCount: 4
customProperties:
  zone: eu
").unwrap();
        let normalized = ResourceType::Compute.normalize(data).unwrap();
        assert_eq!(normalized["name"].as_str(), Some("vm"));
        assert_eq!(normalized["cpuCount"].as_u64(), Some(4));
        assert_eq!(normalized["customProperties"]["zone"].as_str(), Some("eu"));
    }
}
