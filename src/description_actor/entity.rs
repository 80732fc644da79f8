//! [`ActorEntity`] implementation for [`ResourceDescription`].
//!
//! One factory actor runs per [`ResourceType`]; the kind is the actor's context, so the
//! same entity type is validated by a different rule in each factory.

use crate::description_actor::DescriptionError;
use crate::framework::ActorEntity;
use crate::model::{DescriptionCreate, ResourceDescription, ResourceType};
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for ResourceDescription {
    type Id = String;
    type Create = DescriptionCreate;
    type Context = ResourceType;
    type Error = DescriptionError;

    fn from_create_params(id: String, params: DescriptionCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            document_self_link: id,
            resource_type: params.resource_type,
            data: params.data,
            children: params.children,
        })
    }

    /// Rejects payloads addressed to the wrong factory, then validates and normalizes
    /// the payload with the factory kind's rule.
    async fn on_create(&mut self, kind: &ResourceType) -> Result<(), Self::Error> {
        if self.resource_type != *kind {
            return Err(DescriptionError::WrongFactory {
                expected: *kind,
                actual: self.resource_type,
            });
        }
        let data = std::mem::take(&mut self.data);
        self.data = kind
            .normalize(data)
            .map_err(|message| DescriptionError::ValidationError {
                kind: *kind,
                message,
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(kind: ResourceType, yaml: &str) -> ResourceDescription {
        ResourceDescription::from_create_params(
            format!("{}/1", kind.factory_link()),
            DescriptionCreate::new(kind, serde_yaml::from_str(yaml).unwrap()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_on_create_normalizes_payload() {
        let mut description = create(ResourceType::Container, "image: nginx\nmemoryLimit: 1000\n");
        description.on_create(&ResourceType::Container).await.unwrap();
        assert_eq!(
            description.data.get("image").and_then(|v| v.as_str()),
            Some("nginx")
        );
        assert_eq!(
            description.data.get("memoryLimit").and_then(|v| v.as_u64()),
            Some(1000)
        );
    }

    #[tokio::test]
    async fn test_on_create_rejects_wrong_factory() {
        let mut description = create(ResourceType::Container, "image: nginx\n");
        let err = description.on_create(&ResourceType::Volume).await.unwrap_err();
        assert_eq!(
            err,
            DescriptionError::WrongFactory {
                expected: ResourceType::Volume,
                actual: ResourceType::Container,
            }
        );
    }

    #[tokio::test]
    async fn test_on_create_applies_kind_rule() {
        let mut description = create(ResourceType::Network, "driver: bridge\n");
        let err = description.on_create(&ResourceType::Network).await.unwrap_err();
        assert!(matches!(err, DescriptionError::ValidationError { .. }));
    }
}
