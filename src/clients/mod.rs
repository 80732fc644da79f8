//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod actor_client;
pub mod composite_client;
pub mod description_client;
pub mod registry;

pub use actor_client::ActorClient;
pub use composite_client::*;
pub use description_client::*;
pub use registry::*;
