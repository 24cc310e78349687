use crate::cluster::Cluster;
use crate::common::{Money, Region, ResourceKind, StatusHistoryItem};
use crate::database::Database;
use crate::gateway::Gateway;
use opsdeck_types::prelude::{Id, Timestamp};
use serde::{Deserialize, Serialize};

/// One managed resource. The `type` tag is the wire discriminator; the
/// `(id, kind)` pair is the sole lookup key within a tenant.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Resource {
    #[serde(rename = "kubernetes")]
    Cluster(Cluster),
    #[serde(rename = "gateway")]
    Gateway(Gateway),
    #[serde(rename = "postgres")]
    Database(Database),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Cluster(_) => ResourceKind::Kubernetes,
            Resource::Gateway(_) => ResourceKind::Gateway,
            Resource::Database(_) => ResourceKind::Postgres,
        }
    }

    pub fn id(&self) -> &Id {
        match self {
            Resource::Cluster(c) => &c.id,
            Resource::Gateway(g) => &g.id,
            Resource::Database(d) => &d.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Resource::Cluster(c) => &c.name,
            Resource::Gateway(g) => &g.name,
            Resource::Database(d) => &d.name,
        }
    }

    pub fn set_name(&mut self, name: String) {
        match self {
            Resource::Cluster(c) => c.name = name,
            Resource::Gateway(g) => g.name = name,
            Resource::Database(d) => d.name = name,
        }
    }

    pub fn region(&self) -> Region {
        match self {
            Resource::Cluster(c) => c.region,
            Resource::Gateway(g) => g.region,
            Resource::Database(d) => d.region,
        }
    }

    pub fn monthly_cost(&self) -> Money {
        match self {
            Resource::Cluster(c) => c.monthly_cost,
            Resource::Gateway(g) => g.monthly_cost,
            Resource::Database(d) => d.monthly_cost,
        }
    }

    pub fn status_history(&self) -> &[StatusHistoryItem] {
        match self {
            Resource::Cluster(c) => &c.status_history,
            Resource::Gateway(g) => &g.status_history,
            Resource::Database(d) => &d.status_history,
        }
    }

    /// Appends one narrative line with a fresh id and the given instant.
    pub fn push_history(&mut self, message: impl Into<String>, at: Timestamp) {
        let item = StatusHistoryItem {
            id: Id::new_random(),
            message: message.into(),
            at,
        };
        match self {
            Resource::Cluster(c) => c.status_history.push(item),
            Resource::Gateway(g) => g.status_history.push(item),
            Resource::Database(d) => d.status_history.push(item),
        }
    }

    pub fn last_history_message(&self) -> Option<&str> {
        self.status_history().last().map(|item| item.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::ClusterStatus;

    fn cluster() -> Resource {
        Resource::Cluster(Cluster {
            id: Id("c-1".into()),
            name: "edge".into(),
            region: Region::EuWest1,
            monthly_cost: Money::usd(70),
            status_history: Vec::new(),
            status: ClusterStatus::Running,
            kubernetes_version: "1.29".into(),
            node_pools: Vec::new(),
        })
    }

    #[test]
    fn wire_tag_matches_kind() {
        let value = serde_json::to_value(cluster()).unwrap();
        assert_eq!(value["type"], "kubernetes");
        assert_eq!(value["monthlyCost"]["currency"], "USD");
    }

    #[test]
    fn history_appends_in_order() {
        let mut resource = cluster();
        resource.push_history("first", Timestamp(1));
        resource.push_history("second", Timestamp(2));
        assert_eq!(resource.last_history_message(), Some("second"));
        assert_eq!(resource.status_history().len(), 2);
    }
}
