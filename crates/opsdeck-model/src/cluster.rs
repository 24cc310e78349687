use crate::common::{Money, Region, StatusHistoryItem};
use opsdeck_types::prelude::Id;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterStatus {
    Creating,
    Running,
    Updating,
    Deleting,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    Pending,
    Ready,
    NotReady,
    Draining,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstanceType {
    #[serde(rename = "Standard-2vCPU-8GB")]
    Standard2Vcpu8Gb,
    #[serde(rename = "Performance-4vCPU-16GB")]
    Performance4Vcpu16Gb,
    #[serde(rename = "HighMem-8vCPU-32GB")]
    HighMem8Vcpu32Gb,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClusterNode {
    pub id: Id,
    pub status: NodeStatus,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePool {
    pub id: Id,
    pub name: String,
    pub instance_type: InstanceType,
    pub desired_nodes: i64,
    pub nodes: Vec<ClusterNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cordoned: Option<bool>,
}

impl NodePool {
    pub fn is_cordoned(&self) -> bool {
        self.cordoned.unwrap_or(false)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub id: Id,
    pub name: String,
    pub region: Region,
    pub monthly_cost: Money,
    pub status_history: Vec<StatusHistoryItem>,
    pub status: ClusterStatus,
    pub kubernetes_version: String,
    pub node_pools: Vec<NodePool>,
}
