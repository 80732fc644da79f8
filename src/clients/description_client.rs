use crate::clients::actor_client::{entity_error, ActorClient};
use crate::description_actor::DescriptionError;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{ComponentTemplate, DescriptionCreate, ResourceDescription, ResourceType};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Client for one resource kind's description factory.
#[derive(Clone)]
pub struct DescriptionClient {
    kind: ResourceType,
    inner: ResourceClient<ResourceDescription>,
}

impl DescriptionClient {
    pub fn new(kind: ResourceType, inner: ResourceClient<ResourceDescription>) -> Self {
        Self { kind, inner }
    }

    /// The kind this factory creates.
    pub fn kind(&self) -> ResourceType {
        self.kind
    }

    /// Creates a description and returns its self link.
    #[instrument(skip(self, data, children), fields(kind = %self.kind))]
    pub async fn create_description(
        &self,
        data: serde_yaml::Value,
        children: BTreeMap<String, ComponentTemplate>,
    ) -> Result<String, DescriptionError> {
        debug!(?data, "create_description called");
        let payload = DescriptionCreate::new(self.kind, data).with_children(children);
        self.inner.create(payload).await.map_err(Self::map_error)
    }

    /// Fetches a description, treating a missing document as an error.
    #[instrument(skip(self), fields(kind = %self.kind))]
    pub async fn fetch_description(&self, link: String) -> Result<ResourceDescription, DescriptionError> {
        match self.get(link.clone()).await? {
            Some(description) => Ok(description),
            None => Err(DescriptionError::NotFound(link)),
        }
    }
}

#[async_trait]
impl ActorClient<ResourceDescription> for DescriptionClient {
    type Error = DescriptionError;

    fn inner(&self) -> &ResourceClient<ResourceDescription> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        entity_error::<DescriptionError>(e)
            .unwrap_or_else(|e| DescriptionError::ActorCommunicationError(e.to_string()))
    }
}
