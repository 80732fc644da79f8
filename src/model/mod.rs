//! Data model: wire-shaped templates and Compose files, store-shaped payloads and the
//! persisted documents.

pub mod compose;
pub mod compute;
pub mod container;
pub mod description;
pub mod kubernetes;
pub mod resource_type;
pub mod template;

pub use compose::*;
pub use compute::*;
pub use container::*;
pub use description::*;
pub use kubernetes::*;
pub use resource_type::*;
pub use template::*;
