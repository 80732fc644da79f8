//! Conversions between the template model, Docker Compose and stored descriptions.
//!
//! `compose -> template -> compose` is the identity for Compose files. The source
//! `version` rides along on the template; templates read back from the store carry none
//! and are rendered with [`COMPOSE_VERSION`].

use crate::clients::FactoryRegistry;
use crate::content::error::{
    ContentError, COMPONENTS_NOT_SUPPORTED, DESERIALIZE_COMPOSE, DESERIALIZE_TEMPLATE,
    TEMPLATE_INVALID,
};
use crate::framework::join_all;
use crate::model::{
    ComponentTemplate, ComposeNetwork, ComposeService, ComposeVolume, CompositeDescription,
    CompositeTemplate, ContainerDescription, DockerCompose, NetworkDescription, ResourceType,
    VolumeDescription,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

pub const COMPOSE_VERSION: &str = "2";
pub const DEFAULT_COMPOSE_TEMPLATE_NAME: &str = "Docker Compose";

// =============================================================================
// COMPOSE -> TEMPLATE
// =============================================================================

/// Each service becomes an `App.Container` component keyed by the service name; top-level
/// networks and volumes become `App.Network` and `App.Volume` components.
pub fn compose_to_template(
    compose: &DockerCompose,
    name: Option<&str>,
) -> Result<CompositeTemplate, ContentError> {
    let mut template = CompositeTemplate::new(name.unwrap_or(DEFAULT_COMPOSE_TEMPLATE_NAME));
    template.compose_version = compose.version.clone();

    for (id, service) in &compose.services {
        let data = to_data(&service_to_container(service))?;
        add_component(&mut template, id, ResourceType::Container, data)?;
    }
    for (id, network) in &compose.networks {
        let network = network.clone().unwrap_or_default();
        let data = to_data(&NetworkDescription {
            name: None,
            driver: network.driver,
            external: network.external,
            extra: network.extra,
        })?;
        add_component(&mut template, id, ResourceType::Network, data)?;
    }
    for (id, volume) in &compose.volumes {
        let volume = volume.clone().unwrap_or_default();
        let data = to_data(&VolumeDescription {
            name: None,
            driver: volume.driver,
            external: volume.external,
            extra: volume.extra,
        })?;
        add_component(&mut template, id, ResourceType::Volume, data)?;
    }
    Ok(template)
}

fn add_component(
    template: &mut CompositeTemplate,
    id: &str,
    kind: ResourceType,
    data: serde_yaml::Value,
) -> Result<(), ContentError> {
    if template.components.contains_key(id) {
        return Err(ContentError::validation(
            format!("Duplicate component id '{id}'"),
            TEMPLATE_INVALID,
        ));
    }
    template
        .components
        .insert(id.to_string(), ComponentTemplate::new(kind.tag(), data));
    Ok(())
}

fn service_to_container(service: &ComposeService) -> ContainerDescription {
    let service = service.clone();
    ContainerDescription {
        name: None,
        image: service.image,
        container_name: service.container_name,
        command: service.command,
        entry_point: service.entrypoint,
        env: service.environment,
        env_file: service.env_file,
        labels: service.labels,
        port_bindings: service.ports,
        expose: service.expose,
        links: service.links,
        depends_on: service.depends_on,
        volumes: service.volumes,
        networks: service.networks,
        dns: service.dns,
        extra_hosts: service.extra_hosts,
        user: service.user,
        privileged: service.privileged,
        restart_policy: service.restart,
        hostname: service.hostname,
        working_dir: service.working_dir,
        extra: service.extra,
    }
}

// =============================================================================
// TEMPLATE -> COMPOSE
// =============================================================================

/// Resolves every component's kind and requires all of them to be container-family.
///
/// Unknown tags fail with `compute.template.invalid`; kinds Compose cannot express fail
/// with `compute.template.components.not.supported`, naming every offending component.
pub fn container_components(
    template: &CompositeTemplate,
) -> Result<Vec<(&String, ResourceType, &ComponentTemplate)>, ContentError> {
    let mut resolved = Vec::with_capacity(template.components.len());
    let mut unsupported = Vec::new();

    for (id, component) in &template.components {
        let kind = ResourceType::from_tag(&component.component_type).ok_or_else(|| {
            ContentError::validation(
                format!(
                    "Component '{id}' has unknown type '{}'",
                    component.component_type
                ),
                TEMPLATE_INVALID,
            )
        })?;
        if !kind.is_container_family() {
            unsupported.push(format!("{id} ({kind})"));
        }
        resolved.push((id, kind, component));
    }

    if !unsupported.is_empty() {
        return Err(ContentError::validation(
            format!("Components not supported: {}", unsupported.join(", ")),
            COMPONENTS_NOT_SUPPORTED,
        ));
    }
    Ok(resolved)
}

/// Writes the template's recorded `composeVersion` as the Compose `version`, and no
/// `version` key when none was recorded.
pub fn template_to_compose(template: &CompositeTemplate) -> Result<DockerCompose, ContentError> {
    let mut compose = DockerCompose {
        version: template.compose_version.clone(),
        ..DockerCompose::default()
    };

    for (id, kind, component) in container_components(template)? {
        match kind {
            ResourceType::Container => {
                let container: ContainerDescription = from_data(id, &component.data)?;
                compose
                    .services
                    .insert(id.clone(), container_to_service(container));
            }
            ResourceType::Network => {
                let network: NetworkDescription = from_data(id, &component.data)?;
                let bare = network.driver.is_none()
                    && network.external.is_none()
                    && network.extra.is_empty();
                let entry = (!bare).then(|| ComposeNetwork {
                    driver: network.driver,
                    external: network.external,
                    extra: network.extra,
                });
                compose.networks.insert(id.clone(), entry);
            }
            ResourceType::Volume => {
                let volume: VolumeDescription = from_data(id, &component.data)?;
                let bare = volume.driver.is_none()
                    && volume.external.is_none()
                    && volume.extra.is_empty();
                let entry = (!bare).then(|| ComposeVolume {
                    driver: volume.driver,
                    external: volume.external,
                    extra: volume.extra,
                });
                compose.volumes.insert(id.clone(), entry);
            }
            // container_components admits only the container family
            ResourceType::Compute | ResourceType::Kubernetes => {}
        }
    }
    Ok(compose)
}

fn container_to_service(container: ContainerDescription) -> ComposeService {
    ComposeService {
        image: container.image,
        container_name: container.container_name,
        command: container.command,
        entrypoint: container.entry_point,
        environment: container.env,
        env_file: container.env_file,
        labels: container.labels,
        ports: container.port_bindings,
        expose: container.expose,
        links: container.links,
        depends_on: container.depends_on,
        volumes: container.volumes,
        networks: container.networks,
        dns: container.dns,
        extra_hosts: container.extra_hosts,
        user: container.user,
        privileged: container.privileged,
        restart: container.restart_policy,
        hostname: container.hostname,
        working_dir: container.working_dir,
        extra: container.extra,
    }
}

// =============================================================================
// DESCRIPTION -> TEMPLATE
// =============================================================================

/// Rebuilds a template from a stored descriptor.
///
/// Every child is fetched concurrently; any failed or missing child aborts the whole
/// reconstruction. Component ids come from the payload `name`, falling back to the last
/// segment of the link, with `_2`, `_3`, ... appended to repeated ids.
pub async fn description_to_template(
    descriptor: &CompositeDescription,
    registry: &FactoryRegistry,
) -> Result<CompositeTemplate, ContentError> {
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
    let descriptions = join_all("description-to-template", fetches).await?;

    let mut template = CompositeTemplate::new(descriptor.name.clone());
    for (link, description) in descriptor.description_links.iter().zip(descriptions) {
        let base = description
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| last_segment(link).to_string());
        let id = unique_id(&base, &template.components);
        debug!(%link, %id, "Component reconstructed");

        let mut component =
            ComponentTemplate::new(description.resource_type.tag(), description.data);
        component.children = description.children;
        template.components.insert(id, component);
    }
    Ok(template)
}

fn last_segment(link: &str) -> &str {
    link.trim_end_matches('/').rsplit('/').next().unwrap_or(link)
}

fn unique_id(base: &str, taken: &BTreeMap<String, ComponentTemplate>) -> String {
    if !taken.contains_key(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}_{n}"))
        .find(|candidate| !taken.contains_key(candidate))
        .unwrap_or_else(|| base.to_string())
}

// =============================================================================
// (DE)SERIALIZATION
// =============================================================================

pub fn template_from_yaml(text: &str) -> Result<CompositeTemplate, ContentError> {
    serde_yaml::from_str(text).map_err(|e| {
        ContentError::validation(
            format!("Failed to deserialize template: {e}"),
            DESERIALIZE_TEMPLATE,
        )
    })
}

pub fn template_from_json(text: &str) -> Result<CompositeTemplate, ContentError> {
    serde_json::from_str(text).map_err(|e| {
        ContentError::validation(
            format!("Failed to deserialize template: {e}"),
            DESERIALIZE_TEMPLATE,
        )
    })
}

pub fn template_to_yaml(template: &CompositeTemplate) -> Result<String, ContentError> {
    serde_yaml::to_string(template).map_err(|e| ContentError::Serialization(e.to_string()))
}

pub fn template_to_json(template: &CompositeTemplate) -> Result<String, ContentError> {
    serde_json::to_string_pretty(template).map_err(|e| ContentError::Serialization(e.to_string()))
}

pub fn compose_from_yaml(text: &str) -> Result<DockerCompose, ContentError> {
    serde_yaml::from_str(text).map_err(|e| {
        ContentError::validation(
            format!("Failed to deserialize Docker Compose: {e}"),
            DESERIALIZE_COMPOSE,
        )
    })
}

pub fn compose_to_yaml(compose: &DockerCompose) -> Result<String, ContentError> {
    serde_yaml::to_string(compose).map_err(|e| ContentError::Serialization(e.to_string()))
}

fn to_data<P: Serialize>(payload: &P) -> Result<serde_yaml::Value, ContentError> {
    serde_yaml::to_value(payload).map_err(|e| ContentError::Serialization(e.to_string()))
}

fn from_data<P: DeserializeOwned + Default>(
    id: &str,
    data: &serde_yaml::Value,
) -> Result<P, ContentError> {
    if data.is_null() {
        return Ok(P::default());
    }
    serde_yaml::from_value(data.clone()).map_err(|e| {
        ContentError::validation(format!("Component '{id}': {e}"), TEMPLATE_INVALID)
    })
}
