use crate::clients::DescriptionClient;
use crate::description_actor::DescriptionError;
use crate::model::ResourceType;
use std::collections::HashMap;

/// Maps each resource kind to its factory client, and document links back to the
/// factory that owns them.
#[derive(Clone, Default)]
pub struct FactoryRegistry {
    factories: HashMap<ResourceType, DescriptionClient>,
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a client under its own kind, replacing any earlier one.
    pub fn register(&mut self, client: DescriptionClient) {
        self.factories.insert(client.kind(), client);
    }

    pub fn factory(&self, kind: ResourceType) -> Result<&DescriptionClient, DescriptionError> {
        self.factories
            .get(&kind)
            .ok_or_else(|| DescriptionError::NoFactory(kind.to_string()))
    }

    /// The factory owning `link`.
    pub fn route(&self, link: &str) -> Result<&DescriptionClient, DescriptionError> {
        let kind = ResourceType::from_link(link)
            .ok_or_else(|| DescriptionError::NoFactory(link.to_string()))?;
        self.factory(kind)
    }
}
