//! Composite description factory.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::CompositeDescriptionClient;
use crate::framework::ResourceActor;
use crate::model::{CompositeDescription, COMPOSITE_DESCRIPTIONS_LINK};

/// Creates the composite description actor and its client. Start it with `actor.run(())`.
pub fn new(capacity: usize) -> (ResourceActor<CompositeDescription>, CompositeDescriptionClient) {
    let next_link = || format!("{}/{}", COMPOSITE_DESCRIPTIONS_LINK, uuid::Uuid::new_v4());

    let (actor, generic_client) = ResourceActor::new(capacity, next_link);
    let client = CompositeDescriptionClient::new(generic_client);

    (actor, client)
}
