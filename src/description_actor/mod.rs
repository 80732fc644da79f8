//! Resource description factories, one per [`ResourceType`].

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::DescriptionClient;
use crate::framework::ResourceActor;
use crate::model::{ResourceDescription, ResourceType};

/// Creates the factory actor for `kind` and its client.
///
/// Documents are identified by `<factory link>/<uuid>`. Start the actor with
/// `actor.run(kind)`.
pub fn new(
    kind: ResourceType,
    capacity: usize,
) -> (ResourceActor<ResourceDescription>, DescriptionClient) {
    let factory_link = kind.factory_link();
    let next_link = move || format!("{}/{}", factory_link, uuid::Uuid::new_v4());

    let (actor, generic_client) = ResourceActor::new(capacity, next_link);
    let client = DescriptionClient::new(kind, generic_client);

    (actor, client)
}
