//! Docker Compose (v2/v3 file format) surface schema.
//!
//! Keys that map onto container, network and volume descriptions are typed. Any other
//! key is kept in the `extra` map and written back unchanged.

use crate::model::{CommandLine, Environment, OneOrMany, PortBinding, ServiceNetworks};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DockerCompose {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "version_string"
    )]
    pub version: Option<String>,
    #[serde(default)]
    pub services: BTreeMap<String, ComposeService>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub networks: BTreeMap<String, Option<ComposeNetwork>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub volumes: BTreeMap<String, Option<ComposeVolume>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComposeService {
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<CommandLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrypoint: Option<CommandLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_file: Option<OneOrMany>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Environment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<PortBinding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expose: Vec<PortBinding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub networks: Option<ServiceNetworks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns: Option<OneOrMany>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_hosts: Option<Environment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privileged: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restart: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComposeNetwork {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<bool>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComposeVolume {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<bool>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// `version: 2` and `version: "2"` both mean the same file format.
fn version_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_yaml::Value::String(s)) => Some(s),
        Some(serde_yaml::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_version_is_read_as_string() {
        let compose: DockerCompose =
            serde_yaml::from_str("version: 2\nservices:\n  web:\n    image: nginx\n").unwrap();
        assert_eq!(compose.version.as_deref(), Some("2"));
    }

    #[test]
    fn test_bare_network_entries() {
        let compose: DockerCompose = serde_yaml::from_str(
            "services:\n  web:\n    image: nginx\nnetworks:\n  front:\n  back:\n    driver: overlay\n",
        )
        .unwrap();
        assert_eq!(compose.networks.get("front"), Some(&None));
        assert_eq!(
            compose.networks["back"].as_ref().and_then(|n| n.driver.as_deref()),
            Some("overlay")
        );
    }

    #[test]
    fn test_common_service_keys_are_accepted() {
        let compose: DockerCompose = serde_yaml::from_str(
            "services:\n  web:\n    image: nginx\n    expose: [\"80\"]\n    container_name: web1\n    labels:\n      tier: front\n    networks:\n      front:\n        aliases: [www]\n",
        )
        .unwrap();
        let web = &compose.services["web"];
        assert_eq!(web.container_name.as_deref(), Some("web1"));
        assert_eq!(web.expose, vec![PortBinding::Mapping("80".to_string())]);
        assert!(matches!(web.networks, Some(ServiceNetworks::Map(_))));
        assert!(web.extra.is_empty());
    }

    #[test]
    fn test_unmodeled_service_keys_are_kept() {
        let compose: DockerCompose = serde_yaml::from_str(
            "services:\n  web:\n    image: nginx\n    build: .\n    mem_limit: 512m\n",
        )
        .unwrap();
        let web = &compose.services["web"];
        assert_eq!(web.extra["build"].as_str(), Some("."));
        assert_eq!(web.extra["mem_limit"].as_str(), Some("512m"));

        let rendered = serde_yaml::to_string(&compose).unwrap();
        let reparsed: DockerCompose = serde_yaml::from_str(&rendered).unwrap();
        assert_eq!(reparsed, compose);
    }
}
