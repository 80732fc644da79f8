use crate::clients::{CompositeDescriptionClient, FactoryRegistry};
use crate::config::{ContentConfig, DEFAULT_CHANNEL_CAPACITY};
use crate::content::{CompositeContentService, StoreMaterializer};
use crate::framework::FrameworkError;
use crate::model::ResourceType;
use std::sync::Arc;
use tracing::{error, info};

/// Runtime that owns every factory actor and the content service wired on top of them.
///
/// `ContentSystem` is responsible for:
/// - **Lifecycle Management**: starting one description factory per [`ResourceType`] plus
///   the composite description factory, and stopping them all
/// - **Dependency Wiring**: building the [`FactoryRegistry`], the Kubernetes
///   [`StoreMaterializer`] and the [`CompositeContentService`]
///
/// # Example
///
/// ```ignore
/// let system = ContentSystem::new();
///
/// let link = system.service.import(compose_yaml, Some("application/yaml")).await?;
/// let rendered = system.service.render(Some(&link), Some("Docker"), None).await?;
///
/// system.shutdown().await?;
/// ```
pub struct ContentSystem {
    /// Import and render, over the factories below
    pub service: CompositeContentService,

    /// Description factories by kind
    pub registry: FactoryRegistry,

    /// Composite description factory
    pub composites: CompositeDescriptionClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Default for ContentSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentSystem {
    /// Starts every actor with the default channel capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn with_config(config: &ContentConfig) -> Self {
        Self::with_capacity(config.channel_capacity)
    }

    fn with_capacity(capacity: usize) -> Self {
        let mut handles = Vec::with_capacity(ResourceType::ALL.len() + 1);

        // 1. Kubernetes factory, shared by the registry and the manifest materializer
        let mut registry = FactoryRegistry::new();
        let (kubernetes_actor, kubernetes) =
            crate::description_actor::new(ResourceType::Kubernetes, capacity);
        handles.push(tokio::spawn(kubernetes_actor.run(ResourceType::Kubernetes)));
        registry.register(kubernetes.clone());
        let materializer = Arc::new(StoreMaterializer::new(kubernetes));

        // 2. One factory for every other kind, each validating with its own kind's rule
        for kind in ResourceType::ALL {
            if kind == ResourceType::Kubernetes {
                continue;
            }
            let (actor, client) = crate::description_actor::new(kind, capacity);
            handles.push(tokio::spawn(actor.run(kind)));
            registry.register(client);
        }

        // 3. Composite descriptors (no dependencies)
        let (composite_actor, composites) = crate::composite_actor::new(capacity);
        handles.push(tokio::spawn(composite_actor.run(())));

        let service =
            CompositeContentService::new(registry.clone(), composites.clone(), materializer);

        info!(factories = handles.len(), capacity, "Content system started");
        Self {
            service,
            registry,
            composites,
            handles,
        }
    }

    /// Gracefully shuts down every actor.
    ///
    /// Dropping the clients closes the actor channels; each actor drains its queue and
    /// exits. Clones handed out earlier (e.g. to an HTTP router) must be dropped first or
    /// the wait does not finish.
    pub async fn shutdown(self) -> Result<(), FrameworkError> {
        info!("Shutting down content system...");

        drop(self.service);
        drop(self.registry);
        drop(self.composites);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(FrameworkError::TaskFailed(e.to_string()));
            }
        }

        info!("Content system shutdown complete.");
        Ok(())
    }
}
