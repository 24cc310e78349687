use opsdeck_model::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KubernetesVersion {
    #[serde(rename = "1.28")]
    V1_28,
    #[serde(rename = "1.29")]
    V1_29,
    #[serde(rename = "1.30")]
    V1_30,
}

impl KubernetesVersion {
    pub const fn as_str(self) -> &'static str {
        match self {
            KubernetesVersion::V1_28 => "1.28",
            KubernetesVersion::V1_29 => "1.29",
            KubernetesVersion::V1_30 => "1.30",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSpec {
    pub pool_name: String,
    pub instance_type: InstanceType,
    pub desired_nodes: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    pub name: String,
    pub region: Region,
    pub kubernetes_version: KubernetesVersion,
    pub node_pools: Vec<PoolSpec>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSpec {
    pub name: String,
    pub protocol: RuleProtocol,
    pub external_port: i64,
    /// `host:port`, e.g. `backend:8080`.
    pub target: String,
    pub path_prefix: String,
    pub tls_enabled: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewaySpec {
    pub name: String,
    pub region: Region,
    pub vpc_id: String,
    #[serde(default)]
    pub public_endpoint_url: Option<String>,
    pub rules: Vec<RuleSpec>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseSpec {
    pub name: String,
    pub region: Region,
    pub pg_version: PgVersion,
    pub tier: DbTier,
    pub storage_allocated_gb: i64,
    pub ha_mode: HaMode,
}

/// Kind-discriminated provisioning request, mirroring the resource wire
/// tags.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProvisionPayload {
    #[serde(rename = "kubernetes")]
    Cluster(ClusterSpec),
    #[serde(rename = "gateway")]
    Gateway(GatewaySpec),
    #[serde(rename = "postgres")]
    Database(DatabaseSpec),
}

impl ProvisionPayload {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ProvisionPayload::Cluster(_) => ResourceKind::Kubernetes,
            ProvisionPayload::Gateway(_) => ResourceKind::Gateway,
            ProvisionPayload::Database(_) => ResourceKind::Postgres,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ProvisionPayload::Cluster(s) => &s.name,
            ProvisionPayload::Gateway(s) => &s.name,
            ProvisionPayload::Database(s) => &s.name,
        }
    }

    pub fn region(&self) -> Region {
        match self {
            ProvisionPayload::Cluster(s) => s.region,
            ProvisionPayload::Gateway(s) => s.region,
            ProvisionPayload::Database(s) => s.region,
        }
    }
}
