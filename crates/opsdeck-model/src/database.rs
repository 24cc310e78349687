use crate::common::{Money, Region, StatusHistoryItem};
use opsdeck_types::prelude::{Id, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DbStatus {
    Creating,
    Available,
    Updating,
    Maintenance,
    BackupInProgress,
    Stopped,
    Deleting,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PgVersion {
    #[serde(rename = "14")]
    V14,
    #[serde(rename = "15")]
    V15,
    #[serde(rename = "16")]
    V16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DbTier {
    #[serde(rename = "Small-2vCPU-4GB")]
    Small2Vcpu4Gb,
    #[serde(rename = "Medium-4vCPU-8GB")]
    Medium4Vcpu8Gb,
    #[serde(rename = "Large-8vCPU-16GB")]
    Large8Vcpu16Gb,
}

impl DbTier {
    pub const fn as_str(self) -> &'static str {
        match self {
            DbTier::Small2Vcpu4Gb => "Small-2vCPU-4GB",
            DbTier::Medium4Vcpu8Gb => "Medium-4vCPU-8GB",
            DbTier::Large8Vcpu16Gb => "Large-8vCPU-16GB",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HaMode {
    PrimaryOnly,
    PrimaryReadReplica,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplicaStatus {
    Healthy,
    Replicating,
    Lagging,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupItem {
    pub id: Id,
    pub at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_gb: Option<i64>,
}

/// Retained manual/scheduled backups are capped at this bound; older
/// entries fall off the end.
pub const MAX_RETAINED_BACKUPS: usize = 10;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    pub id: Id,
    pub name: String,
    pub region: Region,
    pub monthly_cost: Money,
    pub status_history: Vec<StatusHistoryItem>,
    pub status: DbStatus,
    pub version: PgVersion,
    pub tier: DbTier,
    pub ha_mode: HaMode,
    pub allocated_storage_gb: i64,
    pub used_storage_gb: i64,
    pub host: String,
    pub port: u16,
    pub db_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub backups: Vec<BackupItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replica_status: Option<ReplicaStatus>,
}
