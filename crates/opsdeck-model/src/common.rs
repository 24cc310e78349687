use opsdeck_types::prelude::{Id, Role, TenantId, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: i64,
    pub currency: Currency,
}

impl Money {
    pub const fn usd(amount: i64) -> Self {
        Self {
            amount,
            currency: Currency::Usd,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "EU-West-1")]
    EuWest1,
    #[serde(rename = "US-East-1")]
    UsEast1,
    #[serde(rename = "EU-Central-1")]
    EuCentral1,
}

impl Region {
    pub const fn as_str(self) -> &'static str {
        match self {
            Region::EuWest1 => "EU-West-1",
            Region::UsEast1 => "US-East-1",
            Region::EuCentral1 => "EU-Central-1",
        }
    }
}

/// One line of a resource's append-only lifecycle narrative.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusHistoryItem {
    pub id: Id,
    pub message: String,
    pub at: Timestamp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Kubernetes,
    Gateway,
    Postgres,
}

impl ResourceKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Kubernetes => "kubernetes",
            ResourceKind::Gateway => "gateway",
            ResourceKind::Postgres => "postgres",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "kubernetes" => Some(ResourceKind::Kubernetes),
            "gateway" => Some(ResourceKind::Gateway),
            "postgres" => Some(ResourceKind::Postgres),
            _ => None,
        }
    }
}

/// Immutable tenant-scoped audit record. Never mutated or removed once
/// written, even after the referenced resource is deleted.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: Id,
    pub at: Timestamp,
    pub actor_role: Role,
    pub tenant: TenantId,
    pub action: String,
    pub entity_kind: ResourceKind,
    pub entity_id: Id,
    pub entity_name: String,
    pub message: String,
}
