use crate::clients::actor_client::{entity_error, ActorClient};
use crate::composite_actor::CompositeError;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{CompositeDescription, CompositeDescriptionCreate};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the composite description factory.
#[derive(Clone)]
pub struct CompositeDescriptionClient {
    inner: ResourceClient<CompositeDescription>,
}

impl CompositeDescriptionClient {
    pub fn new(inner: ResourceClient<CompositeDescription>) -> Self {
        Self { inner }
    }

    /// Persists a descriptor over already-created children and returns its self link.
    #[instrument(skip(self, description_links), fields(count = description_links.len()))]
    pub async fn create_composite(
        &self,
        name: String,
        description_links: Vec<String>,
    ) -> Result<String, CompositeError> {
        debug!(?description_links, "create_composite called");
        self.inner
            .create(CompositeDescriptionCreate {
                name,
                description_links,
            })
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<CompositeDescription> for CompositeDescriptionClient {
    type Error = CompositeError;

    fn inner(&self) -> &ResourceClient<CompositeDescription> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        entity_error::<CompositeError>(e)
            .unwrap_or_else(|e| CompositeError::ActorCommunicationError(e.to_string()))
    }
}
