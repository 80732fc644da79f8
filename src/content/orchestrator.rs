//! Materialization: one creation per component, joined, then the descriptor.
//!
//! No compensation is attempted. Children created before a sibling or the descriptor
//! failed stay in their factories, unreferenced.

use crate::clients::{CompositeDescriptionClient, FactoryRegistry};
use crate::content::converter::container_components;
use crate::content::error::{ContentError, TEMPLATE_INVALID};
use crate::framework::join_all;
use crate::model::CompositeTemplate;
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct Orchestrator {
    registry: FactoryRegistry,
    composites: CompositeDescriptionClient,
}

impl Orchestrator {
    pub fn new(registry: FactoryRegistry, composites: CompositeDescriptionClient) -> Self {
        Self {
            registry,
            composites,
        }
    }

    /// Materializes `template` and returns the new descriptor's self link.
    ///
    /// Every precondition is checked before the first request is sent. Children are
    /// created concurrently; the descriptor lists their links in component-id order.
    #[instrument(skip_all, fields(template = %template.name))]
    pub async fn materialize(&self, template: &CompositeTemplate) -> Result<String, ContentError> {
        if template.name.trim().is_empty() {
            return Err(ContentError::validation(
                "Template name is required",
                TEMPLATE_INVALID,
            ));
        }
        if template.components.is_empty() {
            return Err(ContentError::validation(
                "Template has no components",
                TEMPLATE_INVALID,
            ));
        }

        let mut creations = Vec::with_capacity(template.components.len());
        for (id, kind, component) in container_components(template)? {
            let factory = self
                .registry
                .factory(kind)
                .map_err(|e| ContentError::Creation(e.to_string()))?
                .clone();
            let data = with_default_name(component.data.clone(), id);
            let children = component.children.clone();
            let id = id.clone();
            creations.push(async move {
                debug!(%id, %kind, "Creating component");
                factory
                    .create_description(data, children)
                    .await
                    .map_err(|e| ContentError::Creation(e.to_string()))
            });
        }

        let links = join_all("materialize", creations).await?;
        let count = links.len();

        let link = self
            .composites
            .create_composite(template.name.clone(), links)
            .await
            .map_err(|e| ContentError::Persistence(e.to_string()))?;
        info!(%link, count, "Composite description created");
        Ok(link)
    }
}

/// Fills in `name` with the component id when the payload has none.
fn with_default_name(data: serde_yaml::Value, id: &str) -> serde_yaml::Value {
    let mut mapping = match data {
        serde_yaml::Value::Null => serde_yaml::Mapping::new(),
        serde_yaml::Value::Mapping(mapping) => mapping,
        other => return other,
    };
    let missing = mapping
        .get("name")
        .map_or(true, |name| name.is_null() || name.as_str() == Some(""));
    if missing {
        mapping.insert("name".into(), id.into());
    }
    serde_yaml::Value::Mapping(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::DescriptionClient;
    use crate::composite_actor::CompositeError;
    use crate::description_actor::DescriptionError;
    use crate::framework::{create_mock_client, expect_create, FrameworkError, MockClient};
    use crate::model::{
        ComponentTemplate, CompositeDescription, ResourceDescription, ResourceType,
    };

    fn container(image: &str) -> ComponentTemplate {
        ComponentTemplate::new(
            "App.Container",
            serde_yaml::from_str(&format!("image: {image}")).unwrap(),
        )
    }

    #[test]
    fn test_default_name() {
        let data = with_default_name(serde_yaml::from_str("image: nginx").unwrap(), "web");
        assert_eq!(data["name"].as_str(), Some("web"));

        let data = with_default_name(serde_yaml::from_str("name: front").unwrap(), "net");
        assert_eq!(data["name"].as_str(), Some("front"));

        let data = with_default_name(serde_yaml::Value::Null, "vol");
        assert_eq!(data["name"].as_str(), Some("vol"));
    }

    #[tokio::test]
    async fn test_links_follow_component_order() {
        let (container_client, mut container_rx) = create_mock_client::<ResourceDescription>(10);
        let (composite_client, mut composite_rx) = create_mock_client::<CompositeDescription>(10);
        let mut registry = FactoryRegistry::new();
        registry.register(DescriptionClient::new(ResourceType::Container, container_client));
        let orchestrator = Orchestrator::new(registry, CompositeDescriptionClient::new(composite_client));

        let template = CompositeTemplate::new("app")
            .with_component("b", container("redis"))
            .with_component("a", container("nginx"));

        let task = tokio::spawn(async move { orchestrator.materialize(&template).await });

        // Answer in reverse order of arrival so completion order differs from input order
        let (first, first_tx) = expect_create(&mut container_rx).await.unwrap();
        let (second, second_tx) = expect_create(&mut container_rx).await.unwrap();
        let link_for = |params: &crate::model::DescriptionCreate| {
            format!(
                "/resources/container-descriptions/{}",
                params.data["name"].as_str().unwrap()
            )
        };
        second_tx.send(Ok(link_for(&second))).unwrap();
        first_tx.send(Ok(link_for(&first))).unwrap();

        let (params, composite_tx) = expect_create(&mut composite_rx).await.unwrap();
        assert_eq!(params.name, "app");
        assert_eq!(
            params.description_links,
            vec![
                "/resources/container-descriptions/a".to_string(),
                "/resources/container-descriptions/b".to_string(),
            ]
        );
        composite_tx
            .send(Ok("/resources/composite-descriptions/c1".to_string()))
            .unwrap();

        assert_eq!(
            task.await.unwrap().unwrap(),
            "/resources/composite-descriptions/c1"
        );
    }

    #[tokio::test]
    async fn test_mixed_template_sends_nothing() {
        let (container_client, mut container_rx) = create_mock_client::<ResourceDescription>(10);
        let (compute_client, mut compute_rx) = create_mock_client::<ResourceDescription>(10);
        let (composite_client, mut composite_rx) = create_mock_client::<CompositeDescription>(10);
        let mut registry = FactoryRegistry::new();
        registry.register(DescriptionClient::new(ResourceType::Container, container_client));
        registry.register(DescriptionClient::new(ResourceType::Compute, compute_client));
        let orchestrator = Orchestrator::new(registry, CompositeDescriptionClient::new(composite_client));

        let template = CompositeTemplate::new("mixed")
            .with_component("web", container("nginx"))
            .with_component(
                "vm",
                ComponentTemplate::new("Compute", serde_yaml::from_str("name: vm").unwrap()),
            );

        let err = orchestrator.materialize(&template).await.unwrap_err();
        assert!(matches!(err, ContentError::Validation { .. }));

        assert!(container_rx.try_recv().is_err());
        assert!(compute_rx.try_recv().is_err());
        assert!(composite_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_child_failure_skips_descriptor() {
        let mut containers = MockClient::<ResourceDescription>::new();
        containers
            .expect_create()
            .return_ok("/resources/container-descriptions/a".to_string());
        containers
            .expect_create()
            .return_err(FrameworkError::EntityError(Box::new(
                DescriptionError::ValidationError {
                    kind: ResourceType::Container,
                    message: "container image is required".to_string(),
                },
            )));
        containers
            .expect_create()
            .return_ok("/resources/container-descriptions/c".to_string());
        let (composite_client, mut composite_rx) = create_mock_client::<CompositeDescription>(10);

        let mut registry = FactoryRegistry::new();
        registry.register(DescriptionClient::new(ResourceType::Container, containers.client()));
        let orchestrator = Orchestrator::new(registry, CompositeDescriptionClient::new(composite_client));

        let template = CompositeTemplate::new("app")
            .with_component("a", container("nginx"))
            .with_component("b", container("redis"))
            .with_component("c", container("mysql"));

        let err = orchestrator.materialize(&template).await.unwrap_err();
        match err {
            ContentError::Creation(message) => assert!(message.contains("image is required")),
            other => panic!("expected creation error, got {other:?}"),
        }
        assert!(composite_rx.try_recv().is_err());
        containers.verify();
    }

    #[tokio::test]
    async fn test_descriptor_failure_is_persistence_error() {
        let mut containers = MockClient::<ResourceDescription>::new();
        containers
            .expect_create()
            .return_ok("/resources/container-descriptions/a".to_string());
        let mut composites = MockClient::<CompositeDescription>::new();
        composites.expect_create().return_err(FrameworkError::EntityError(Box::new(
            CompositeError::ValidationError("name is required".to_string()),
        )));

        let mut registry = FactoryRegistry::new();
        registry.register(DescriptionClient::new(ResourceType::Container, containers.client()));
        let orchestrator =
            Orchestrator::new(registry, CompositeDescriptionClient::new(composites.client()));

        let template = CompositeTemplate::new("app").with_component("a", container("nginx"));
        let err = orchestrator.materialize(&template).await.unwrap_err();
        assert!(matches!(err, ContentError::Persistence(_)));
        containers.verify();
        composites.verify();
    }

    #[tokio::test]
    async fn test_empty_template_is_rejected() {
        let (composite_client, _rx) = create_mock_client::<CompositeDescription>(1);
        let orchestrator =
            Orchestrator::new(FactoryRegistry::new(), CompositeDescriptionClient::new(composite_client));

        let err = orchestrator
            .materialize(&CompositeTemplate::new("empty"))
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Validation { code: TEMPLATE_INVALID, .. }));

        let err = orchestrator
            .materialize(&CompositeTemplate::new(" ").with_component("a", container("nginx")))
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Validation { .. }));
    }
}
