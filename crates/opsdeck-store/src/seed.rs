//! Demo fixtures. Two tenants, each with two clusters, two gateways
//! and two databases, plus a handful of pre-baked audit entries so the
//! ledger is never empty on first load.

use opsdeck_model::prelude::*;
use opsdeck_types::prelude::{Id, Role, TenantId, Timestamp};

use crate::memory::{MemoryStore, TenantPartition};

// 2024-06-01T12:00:00Z, the shared birth instant of every seeded resource.
const HISTORY_BASE: Timestamp = Timestamp(1_717_243_200_000);

pub fn seeded_store() -> MemoryStore {
    MemoryStore::new([
        (
            TenantId("acme".into()),
            TenantPartition::new(acme_resources(), acme_audit()),
        ),
        (
            TenantId("globex".into()),
            TenantPartition::new(globex_resources(), globex_audit()),
        ),
    ])
}

fn status_history(prefix: &str) -> Vec<StatusHistoryItem> {
    [
        "Resource created",
        "Validation passed",
        "Provisioning started",
        "Infrastructure ready",
        "Operational",
    ]
    .iter()
    .enumerate()
    .map(|(i, message)| StatusHistoryItem {
        id: Id(format!("{prefix}-h{}", i + 1)),
        message: (*message).to_string(),
        at: HISTORY_BASE,
    })
    .collect()
}

fn node(id: &str, status: NodeStatus) -> ClusterNode {
    ClusterNode {
        id: Id::from(id),
        status,
    }
}

fn audit(
    id: &str,
    at: i64,
    actor_role: Role,
    tenant: &str,
    action: &str,
    entity_kind: ResourceKind,
    entity_id: &str,
    entity_name: &str,
    message: &str,
) -> AuditEntry {
    AuditEntry {
        id: Id::from(id),
        at: Timestamp(at),
        actor_role,
        tenant: TenantId::from(tenant),
        action: action.to_string(),
        entity_kind,
        entity_id: Id::from(entity_id),
        entity_name: entity_name.to_string(),
        message: message.to_string(),
    }
}

fn acme_resources() -> Vec<Resource> {
    vec![
        Resource::Cluster(Cluster {
            id: Id::from("acme-kubernetes-1"),
            name: "acme-prod-cluster".into(),
            region: Region::EuWest1,
            monthly_cost: Money::usd(420),
            status_history: status_history("acme-k8s-1"),
            status: ClusterStatus::Running,
            kubernetes_version: "1.29".into(),
            node_pools: vec![
                NodePool {
                    id: Id::from("acme-np-1a"),
                    name: "default-pool".into(),
                    instance_type: InstanceType::Standard2Vcpu8Gb,
                    desired_nodes: 3,
                    nodes: vec![
                        node("acme-n-1", NodeStatus::Ready),
                        node("acme-n-2", NodeStatus::Ready),
                        node("acme-n-3", NodeStatus::Ready),
                    ],
                    cordoned: None,
                },
                NodePool {
                    id: Id::from("acme-np-1b"),
                    name: "compute-pool".into(),
                    instance_type: InstanceType::Performance4Vcpu16Gb,
                    desired_nodes: 2,
                    nodes: vec![
                        node("acme-n-4", NodeStatus::Ready),
                        node("acme-n-5", NodeStatus::Ready),
                    ],
                    cordoned: None,
                },
            ],
        }),
        Resource::Cluster(Cluster {
            id: Id::from("acme-kubernetes-2"),
            name: "acme-staging".into(),
            region: Region::EuWest1,
            monthly_cost: Money::usd(180),
            status_history: status_history("acme-k8s-2"),
            status: ClusterStatus::Running,
            kubernetes_version: "1.28".into(),
            node_pools: vec![NodePool {
                id: Id::from("acme-np-2a"),
                name: "workers".into(),
                instance_type: InstanceType::Standard2Vcpu8Gb,
                desired_nodes: 2,
                nodes: vec![
                    node("acme-n-6", NodeStatus::Ready),
                    node("acme-n-7", NodeStatus::Pending),
                ],
                cordoned: None,
            }],
        }),
        Resource::Gateway(Gateway {
            id: Id::from("acme-gateway-1"),
            name: "acme-public-api".into(),
            region: Region::EuWest1,
            monthly_cost: Money::usd(95),
            status_history: status_history("acme-gw-1"),
            status: GatewayStatus::Active,
            public_endpoint_url: "https://api.acme.example.com".into(),
            vpc_id: "vpc-acme-0a1b2c3d".into(),
            rules: vec![
                ForwardingRule {
                    id: Id::from("acme-r-1"),
                    name: Some("API".into()),
                    protocol: RuleProtocol::Https,
                    status: RuleStatus::Enabled,
                    path: Some("/api".into()),
                    target_url: Some("https://backend.acme.internal".into()),
                    external_port: Some(443),
                    tls_enabled: Some(true),
                },
                ForwardingRule {
                    id: Id::from("acme-r-2"),
                    name: Some("Webhooks".into()),
                    protocol: RuleProtocol::Http,
                    status: RuleStatus::Enabled,
                    path: Some("/webhooks".into()),
                    target_url: None,
                    external_port: Some(80),
                    tls_enabled: Some(false),
                },
                ForwardingRule {
                    id: Id::from("acme-r-3"),
                    name: Some("TCP".into()),
                    protocol: RuleProtocol::Tcp,
                    status: RuleStatus::Disabled,
                    path: None,
                    target_url: None,
                    external_port: Some(50051),
                    tls_enabled: None,
                },
            ],
        }),
        Resource::Gateway(Gateway {
            id: Id::from("acme-gateway-2"),
            name: "acme-internal-gw".into(),
            region: Region::EuCentral1,
            monthly_cost: Money::usd(60),
            status_history: status_history("acme-gw-2"),
            status: GatewayStatus::Active,
            public_endpoint_url: "https://internal.acme.example.com".into(),
            vpc_id: "vpc-acme-eu-4e5f6g7h".into(),
            rules: vec![ForwardingRule {
                id: Id::from("acme-r-4"),
                name: Some("Default".into()),
                protocol: RuleProtocol::Https,
                status: RuleStatus::Enabled,
                path: None,
                target_url: None,
                external_port: Some(443),
                tls_enabled: Some(true),
            }],
        }),
        Resource::Database(Database {
            id: Id::from("acme-postgres-1"),
            name: "acme-primary-db".into(),
            region: Region::EuWest1,
            monthly_cost: Money::usd(250),
            status_history: status_history("acme-pg-1"),
            status: DbStatus::Available,
            version: PgVersion::V16,
            tier: DbTier::Medium4Vcpu8Gb,
            ha_mode: HaMode::PrimaryReadReplica,
            allocated_storage_gb: 200,
            used_storage_gb: 87,
            host: "acme-primary.xxxx.eu-west-1.rds.local".into(),
            port: 5432,
            db_name: "acme_prod".into(),
            backups: vec![BackupItem {
                id: Id::from("acme-b-1"),
                // 2024-06-10T03:00:00Z
                at: Timestamp(1_717_988_400_000),
                size_gb: Some(85),
            }],
            replica_status: Some(ReplicaStatus::Healthy),
        }),
        Resource::Database(Database {
            id: Id::from("acme-postgres-2"),
            name: "acme-analytics-db".into(),
            region: Region::EuWest1,
            monthly_cost: Money::usd(120),
            status_history: status_history("acme-pg-2"),
            status: DbStatus::Available,
            version: PgVersion::V16,
            tier: DbTier::Small2Vcpu4Gb,
            ha_mode: HaMode::PrimaryOnly,
            allocated_storage_gb: 50,
            used_storage_gb: 12,
            host: "acme-analytics.xxxx.eu-west-1.rds.local".into(),
            port: 5432,
            db_name: "acme_analytics".into(),
            backups: Vec::new(),
            replica_status: None,
        }),
    ]
}

fn globex_resources() -> Vec<Resource> {
    vec![
        Resource::Cluster(Cluster {
            id: Id::from("globex-kubernetes-1"),
            name: "globex-us-prod".into(),
            region: Region::UsEast1,
            monthly_cost: Money::usd(720),
            status_history: status_history("globex-k8s-1"),
            status: ClusterStatus::Running,
            kubernetes_version: "1.30".into(),
            node_pools: vec![NodePool {
                id: Id::from("globex-np-1a"),
                name: "high-mem-pool".into(),
                instance_type: InstanceType::HighMem8Vcpu32Gb,
                desired_nodes: 4,
                nodes: vec![
                    node("globex-n-1", NodeStatus::Ready),
                    node("globex-n-2", NodeStatus::Ready),
                    node("globex-n-3", NodeStatus::NotReady),
                    node("globex-n-4", NodeStatus::Ready),
                ],
                cordoned: None,
            }],
        }),
        Resource::Cluster(Cluster {
            id: Id::from("globex-kubernetes-2"),
            name: "globex-eu-cluster".into(),
            region: Region::EuCentral1,
            monthly_cost: Money::usd(0),
            status_history: status_history("globex-k8s-2"),
            status: ClusterStatus::Creating,
            kubernetes_version: "1.29".into(),
            node_pools: vec![NodePool {
                id: Id::from("globex-np-2a"),
                name: "workers".into(),
                instance_type: InstanceType::Performance4Vcpu16Gb,
                desired_nodes: 2,
                nodes: Vec::new(),
                cordoned: None,
            }],
        }),
        Resource::Gateway(Gateway {
            id: Id::from("globex-gateway-1"),
            name: "globex-edge".into(),
            region: Region::UsEast1,
            monthly_cost: Money::usd(140),
            status_history: status_history("globex-gw-1"),
            status: GatewayStatus::Active,
            public_endpoint_url: "https://edge.globex.io".into(),
            vpc_id: "vpc-globex-us-9a8b7c6d".into(),
            rules: vec![
                ForwardingRule {
                    id: Id::from("globex-r-1"),
                    name: Some("API".into()),
                    protocol: RuleProtocol::Https,
                    status: RuleStatus::Enabled,
                    path: None,
                    target_url: None,
                    external_port: Some(443),
                    tls_enabled: Some(true),
                },
                ForwardingRule {
                    id: Id::from("globex-r-2"),
                    name: Some("Admin".into()),
                    protocol: RuleProtocol::Https,
                    status: RuleStatus::Enabled,
                    path: None,
                    target_url: None,
                    external_port: Some(443),
                    tls_enabled: Some(true),
                },
                ForwardingRule {
                    id: Id::from("globex-r-3"),
                    name: Some("TCP".into()),
                    protocol: RuleProtocol::Tcp,
                    status: RuleStatus::Enabled,
                    path: None,
                    target_url: None,
                    external_port: Some(50051),
                    tls_enabled: None,
                },
            ],
        }),
        Resource::Gateway(Gateway {
            id: Id::from("globex-gateway-2"),
            name: "globex-legacy-api".into(),
            region: Region::EuCentral1,
            monthly_cost: Money::usd(45),
            status_history: status_history("globex-gw-2"),
            status: GatewayStatus::Updating,
            public_endpoint_url: "https://legacy.globex.io".into(),
            vpc_id: "vpc-globex-eu-1a2b3c4d".into(),
            rules: vec![ForwardingRule {
                id: Id::from("globex-r-4"),
                name: Some("Legacy".into()),
                protocol: RuleProtocol::Http,
                status: RuleStatus::Disabled,
                path: None,
                target_url: None,
                external_port: Some(80),
                tls_enabled: Some(false),
            }],
        }),
        Resource::Database(Database {
            id: Id::from("globex-postgres-1"),
            name: "globex-core-db".into(),
            region: Region::UsEast1,
            monthly_cost: Money::usd(480),
            status_history: status_history("globex-pg-1"),
            status: DbStatus::Available,
            version: PgVersion::V15,
            tier: DbTier::Large8Vcpu16Gb,
            ha_mode: HaMode::PrimaryReadReplica,
            allocated_storage_gb: 500,
            used_storage_gb: 412,
            host: "globex-core.xxxx.us-east-1.rds.local".into(),
            port: 5432,
            db_name: "globex_core".into(),
            backups: vec![
                BackupItem {
                    id: Id::from("globex-b-1"),
                    // 2024-06-11T02:00:00Z
                    at: Timestamp(1_718_071_200_000),
                    size_gb: Some(400),
                },
                BackupItem {
                    id: Id::from("globex-b-2"),
                    // 2024-06-09T02:00:00Z
                    at: Timestamp(1_717_898_400_000),
                    size_gb: Some(398),
                },
            ],
            replica_status: Some(ReplicaStatus::Healthy),
        }),
        Resource::Database(Database {
            id: Id::from("globex-postgres-2"),
            name: "globex-reporting".into(),
            region: Region::EuCentral1,
            monthly_cost: Money::usd(85),
            status_history: status_history("globex-pg-2"),
            status: DbStatus::Creating,
            version: PgVersion::V15,
            tier: DbTier::Small2Vcpu4Gb,
            ha_mode: HaMode::PrimaryOnly,
            allocated_storage_gb: 30,
            used_storage_gb: 0,
            host: "globex-reporting.xxxx.eu-central-1.rds.local".into(),
            port: 5432,
            db_name: "globex_reporting".into(),
            backups: Vec::new(),
            replica_status: None,
        }),
    ]
}

// Entries are dated 2024-06-02 (acme) and 2024-06-03 (globex).
fn acme_audit() -> Vec<AuditEntry> {
    vec![
        audit(
            "acme-a1",
            1_717_322_400_000,
            Role::Admin,
            "acme",
            "provision",
            ResourceKind::Kubernetes,
            "acme-kubernetes-1",
            "acme-prod-cluster",
            "Provision confirmed",
        ),
        audit(
            "acme-a2",
            1_717_327_800_000,
            Role::Admin,
            "acme",
            "restart",
            ResourceKind::Gateway,
            "acme-gateway-1",
            "acme-public-api",
            "Gateway restarted",
        ),
        audit(
            "acme-a3",
            1_717_336_800_000,
            Role::Viewer,
            "acme",
            "view",
            ResourceKind::Postgres,
            "acme-postgres-1",
            "acme-primary-db",
            "Details viewed",
        ),
    ]
}

fn globex_audit() -> Vec<AuditEntry> {
    vec![
        audit(
            "globex-a1",
            1_717_405_200_000,
            Role::Admin,
            "globex",
            "provision",
            ResourceKind::Kubernetes,
            "globex-kubernetes-1",
            "globex-us-prod",
            "Provision confirmed",
        ),
        audit(
            "globex-a2",
            1_717_416_000_000,
            Role::Admin,
            "globex",
            "scale",
            ResourceKind::Kubernetes,
            "globex-kubernetes-1",
            "globex-us-prod",
            "Node pool scaled",
        ),
        audit(
            "globex-a3",
            1_717_426_800_000,
            Role::Admin,
            "globex",
            "edit_rule",
            ResourceKind::Gateway,
            "globex-gateway-1",
            "globex-edge",
            "Rule updated",
        ),
    ]
}
