use opsdeck_model::prelude::*;
use opsdeck_types::prelude::{Id, TenantId, Timestamp};

use crate::cost::estimate_monthly_cost;
use crate::payload::ProvisionPayload;

/// Client-facing progress narrative for a provisioning run.
pub fn progress_steps() -> Vec<String> {
    [
        "Provision requested",
        "Resources allocated",
        "Provisioning\u{2026}",
        "Service ready",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

fn initial_history(created_id: &str, at: Timestamp) -> Vec<StatusHistoryItem> {
    [
        "Provision requested",
        "Resources allocated",
        "Provisioning",
        "In progress",
        "Service ready",
    ]
    .iter()
    .enumerate()
    .map(|(i, message)| StatusHistoryItem {
        id: Id(format!("{created_id}-h{}", i + 1)),
        message: (*message).to_string(),
        at,
    })
    .collect()
}

fn db_slug(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Builds the concrete resource for a validated payload. The id embeds
/// the creation instant, so two runs in different milliseconds never
/// collide within a tenant.
pub fn synthesize(tenant: &TenantId, payload: &ProvisionPayload, now: Timestamp) -> Resource {
    let created_id = format!("{tenant}-{}-{}", payload.kind().as_str(), now.0);
    let status_history = initial_history(&created_id, now);
    let monthly_cost = estimate_monthly_cost(payload);

    match payload {
        ProvisionPayload::Cluster(spec) => Resource::Cluster(Cluster {
            id: Id(created_id.clone()),
            name: spec.name.clone(),
            region: spec.region,
            monthly_cost,
            status_history,
            status: ClusterStatus::Running,
            kubernetes_version: spec.kubernetes_version.as_str().to_string(),
            node_pools: spec
                .node_pools
                .iter()
                .enumerate()
                .map(|(i, pool)| NodePool {
                    id: Id(format!("{created_id}-pool-{}", i + 1)),
                    name: pool.pool_name.clone(),
                    instance_type: pool.instance_type,
                    desired_nodes: pool.desired_nodes,
                    nodes: Vec::new(),
                    cordoned: None,
                })
                .collect(),
        }),
        ProvisionPayload::Gateway(spec) => Resource::Gateway(Gateway {
            id: Id(created_id.clone()),
            name: spec.name.clone(),
            region: spec.region,
            monthly_cost,
            status_history,
            status: GatewayStatus::Active,
            public_endpoint_url: spec
                .public_endpoint_url
                .clone()
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| format!("https://{}.gateway.example.com", spec.name)),
            vpc_id: spec.vpc_id.clone(),
            rules: spec
                .rules
                .iter()
                .enumerate()
                .map(|(i, rule)| ForwardingRule {
                    id: Id(format!("{created_id}-rule-{}", i + 1)),
                    name: Some(rule.name.clone()),
                    protocol: rule.protocol,
                    status: RuleStatus::Enabled,
                    path: Some(rule.path_prefix.clone()),
                    target_url: Some(rule.target.clone()),
                    external_port: Some(rule.external_port),
                    tls_enabled: Some(rule.tls_enabled),
                })
                .collect(),
        }),
        ProvisionPayload::Database(spec) => {
            let slug = db_slug(&spec.name);
            Resource::Database(Database {
                id: Id(created_id.clone()),
                name: spec.name.clone(),
                region: spec.region,
                monthly_cost,
                status_history,
                status: DbStatus::Available,
                version: spec.pg_version,
                tier: spec.tier,
                ha_mode: spec.ha_mode,
                allocated_storage_gb: spec.storage_allocated_gb,
                used_storage_gb: 0,
                host: format!(
                    "{slug}.postgres.{}.internal",
                    spec.region.as_str().to_lowercase()
                ),
                port: 5432,
                db_name: slug,
                backups: Vec::new(),
                replica_status: match spec.ha_mode {
                    HaMode::PrimaryReadReplica => Some(ReplicaStatus::Healthy),
                    HaMode::PrimaryOnly => None,
                },
            })
        }
    }
}
