use crate::framework::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for factory-specific clients to inherit the standard read operation.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The factory-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific factory error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a document by its self link.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }
}

/// Recovers the entity's own error from a rejected create, so callers see the
/// validation failure rather than a generic framework error.
pub(crate) fn entity_error<E>(e: FrameworkError) -> Result<E, FrameworkError>
where
    E: std::error::Error + Send + Sync + 'static,
{
    match e {
        FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
            Ok(entity) => Ok(*entity),
            Err(other) => Err(FrameworkError::EntityError(other)),
        },
        other => Err(other),
    }
}
