use crate::model::container::require_name;
use crate::model::resource_type::Payload;
use serde::{Deserialize, Serialize};

/// A virtual machine description. Compose cannot express it, so it is accepted by the
/// store but rejected by the container-only template path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_memory_bytes: Option<u64>,
}

impl Payload for ComputeDescription {
    fn validate(&mut self) -> Result<(), String> {
        require_name(&self.name, "compute")
    }
}
