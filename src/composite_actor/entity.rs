use crate::composite_actor::CompositeError;
use crate::framework::ActorEntity;
use crate::model::{CompositeDescription, CompositeDescriptionCreate};
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for CompositeDescription {
    type Id = String;
    type Create = CompositeDescriptionCreate;
    type Context = ();
    type Error = CompositeError;

    fn from_create_params(id: String, params: CompositeDescriptionCreate) -> Result<Self, Self::Error> {
        if params.name.trim().is_empty() {
            return Err(CompositeError::ValidationError("name is required".to_string()));
        }
        Ok(Self {
            document_self_link: id,
            name: params.name,
            description_links: params.description_links,
        })
    }
}
