use opsdeck_model::prelude::*;
use opsdeck_types::prelude::{Id, Timestamp};
use serde::Deserialize;
use serde_json::Value;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub protocol: Option<RuleProtocol>,
    #[serde(default)]
    pub external_port: Option<i64>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub target_url: Option<String>,
    #[serde(default)]
    pub tls_enabled: Option<bool>,
}

/// Typed mutation vocabulary. Parsing is permissive on purpose: an
/// unknown action name or a payload that does not fit the expected
/// shape yields `None`, which the store treats as a no-op rather than
/// an error.
#[derive(Clone, Debug)]
pub enum ActionRequest {
    Rename { name: String },
    // cluster
    RestartCluster,
    AddNodePool { name: String, instance_type: InstanceType, desired_nodes: i64 },
    ScalePool { pool_id: String, desired_nodes: i64 },
    ToggleCordon { pool_id: String },
    // gateway
    ActivateGateway,
    DeactivateGateway,
    RegenerateTls,
    AddRule(RulePatch),
    EditRule { rule_id: String, patch: RulePatch },
    ToggleRule { rule_id: String },
    // database
    StartDb,
    StopDb,
    RestartDb,
    CreateBackup,
    ResizeDb { tier: DbTier, allocated_storage_gb: Option<i64> },
}

#[derive(Deserialize)]
struct RenamePayload {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddNodePoolPayload {
    name: String,
    instance_type: InstanceType,
    desired_nodes: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScalePoolPayload {
    pool_id: String,
    desired_nodes: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PoolIdPayload {
    pool_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RuleIdPayload {
    rule_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditRulePayload {
    rule_id: String,
    #[serde(flatten)]
    patch: RulePatch,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResizeDbPayload {
    tier: DbTier,
    #[serde(default)]
    allocated_storage_gb: Option<f64>,
}

fn floor_nodes(raw: f64) -> i64 {
    (raw.floor() as i64).max(1)
}

impl ActionRequest {
    pub fn parse(action: &str, payload: &Value) -> Option<Self> {
        match action {
            "updateName" => {
                let p: RenamePayload = from_value(payload)?;
                if p.name.is_empty() {
                    return None;
                }
                Some(ActionRequest::Rename { name: p.name })
            }
            "restartCluster" => Some(ActionRequest::RestartCluster),
            "addNodePool" => {
                let p: AddNodePoolPayload = from_value(payload)?;
                Some(ActionRequest::AddNodePool {
                    name: p.name,
                    instance_type: p.instance_type,
                    desired_nodes: floor_nodes(p.desired_nodes),
                })
            }
            "scalePool" => {
                let p: ScalePoolPayload = from_value(payload)?;
                Some(ActionRequest::ScalePool {
                    pool_id: p.pool_id,
                    desired_nodes: floor_nodes(p.desired_nodes),
                })
            }
            "toggleCordon" => {
                let p: PoolIdPayload = from_value(payload)?;
                Some(ActionRequest::ToggleCordon { pool_id: p.pool_id })
            }
            "activateGateway" => Some(ActionRequest::ActivateGateway),
            "deactivateGateway" => Some(ActionRequest::DeactivateGateway),
            "regenerateTls" => Some(ActionRequest::RegenerateTls),
            "addRule" => {
                if !payload.is_object() {
                    return None;
                }
                let patch: RulePatch = from_value(payload)?;
                Some(ActionRequest::AddRule(patch))
            }
            "editRule" => {
                let p: EditRulePayload = from_value(payload)?;
                Some(ActionRequest::EditRule {
                    rule_id: p.rule_id,
                    patch: p.patch,
                })
            }
            "toggleRule" => {
                let p: RuleIdPayload = from_value(payload)?;
                Some(ActionRequest::ToggleRule { rule_id: p.rule_id })
            }
            "startDb" => Some(ActionRequest::StartDb),
            "stopDb" => Some(ActionRequest::StopDb),
            "restartDb" => Some(ActionRequest::RestartDb),
            "createBackup" => Some(ActionRequest::CreateBackup),
            "resizeDb" => {
                let p: ResizeDbPayload = from_value(payload)?;
                Some(ActionRequest::ResizeDb {
                    tier: p.tier,
                    allocated_storage_gb: p.allocated_storage_gb.map(|gb| gb.floor() as i64),
                })
            }
            _ => None,
        }
    }
}

fn from_value<T: serde::de::DeserializeOwned>(payload: &Value) -> Option<T> {
    serde_json::from_value(payload.clone()).ok()
}

/// Applies one recognized action to the resource in place. A request
/// aimed at the wrong kind leaves the resource untouched and appends
/// no history; recognized mutations append exactly one narrative line.
pub fn apply(resource: &mut Resource, request: &ActionRequest, now: Timestamp) {
    if let ActionRequest::Rename { name } = request {
        resource.set_name(name.clone());
        resource.push_history(format!("Renamed to {name}"), now);
        return;
    }

    let message = match (&mut *resource, request) {
        (Resource::Cluster(cluster), ActionRequest::RestartCluster) => {
            cluster.status = ClusterStatus::Updating;
            Some("Cluster restart initiated".to_string())
        }
        (
            Resource::Cluster(cluster),
            ActionRequest::AddNodePool {
                name,
                instance_type,
                desired_nodes,
            },
        ) => {
            cluster.node_pools.push(NodePool {
                id: Id::new_random(),
                name: name.clone(),
                instance_type: *instance_type,
                desired_nodes: *desired_nodes,
                nodes: Vec::new(),
                cordoned: None,
            });
            Some(format!("Node pool \"{name}\" added"))
        }
        (
            Resource::Cluster(cluster),
            ActionRequest::ScalePool {
                pool_id,
                desired_nodes,
            },
        ) => {
            for pool in &mut cluster.node_pools {
                if pool.id.as_str() == pool_id {
                    pool.desired_nodes = *desired_nodes;
                }
            }
            Some(format!("Pool scaled to {desired_nodes} nodes"))
        }
        (Resource::Cluster(cluster), ActionRequest::ToggleCordon { pool_id }) => {
            let was_cordoned = cluster
                .node_pools
                .iter()
                .find(|pool| pool.id.as_str() == pool_id)
                .map(NodePool::is_cordoned)
                .unwrap_or(false);
            for pool in &mut cluster.node_pools {
                if pool.id.as_str() == pool_id {
                    pool.cordoned = Some(!pool.is_cordoned());
                }
            }
            Some(if was_cordoned {
                "Pool uncordoned".to_string()
            } else {
                "Pool cordoned".to_string()
            })
        }
        (Resource::Gateway(gateway), ActionRequest::ActivateGateway) => {
            gateway.status = GatewayStatus::Active;
            Some("Gateway activated".to_string())
        }
        (Resource::Gateway(gateway), ActionRequest::DeactivateGateway) => {
            gateway.status = GatewayStatus::Inactive;
            Some("Gateway deactivated".to_string())
        }
        (Resource::Gateway(_), ActionRequest::RegenerateTls) => {
            // History-only action; no modeled field changes.
            Some("TLS certificate regeneration started".to_string())
        }
        (Resource::Gateway(gateway), ActionRequest::AddRule(patch)) => {
            let name = patch.name.clone().unwrap_or_else(|| "Rule".to_string());
            gateway.rules.push(ForwardingRule {
                id: Id::new_random(),
                name: Some(name.clone()),
                protocol: patch.protocol.unwrap_or(RuleProtocol::Https),
                status: RuleStatus::Enabled,
                path: patch.path.clone(),
                target_url: patch.target_url.clone(),
                external_port: Some(patch.external_port.unwrap_or(443)),
                tls_enabled: Some(patch.tls_enabled.unwrap_or(false)),
            });
            Some(format!("Rule \"{name}\" added"))
        }
        (Resource::Gateway(gateway), ActionRequest::EditRule { rule_id, patch }) => {
            for rule in &mut gateway.rules {
                if rule.id.as_str() == rule_id {
                    if let Some(name) = &patch.name {
                        rule.name = Some(name.clone());
                    }
                    if let Some(protocol) = patch.protocol {
                        rule.protocol = protocol;
                    }
                    if let Some(port) = patch.external_port {
                        rule.external_port = Some(port);
                    }
                    if let Some(path) = &patch.path {
                        rule.path = Some(path.clone());
                    }
                    if let Some(target) = &patch.target_url {
                        rule.target_url = Some(target.clone());
                    }
                    if let Some(tls) = patch.tls_enabled {
                        rule.tls_enabled = Some(tls);
                    }
                }
            }
            Some("Rule updated".to_string())
        }
        (Resource::Gateway(gateway), ActionRequest::ToggleRule { rule_id }) => {
            let was_enabled = gateway
                .rules
                .iter()
                .find(|rule| rule.id.as_str() == rule_id)
                .map(|rule| rule.status == RuleStatus::Enabled)
                .unwrap_or(false);
            for rule in &mut gateway.rules {
                if rule.id.as_str() == rule_id {
                    rule.status = match rule.status {
                        RuleStatus::Enabled => RuleStatus::Disabled,
                        RuleStatus::Disabled => RuleStatus::Enabled,
                    };
                }
            }
            Some(if was_enabled {
                "Rule disabled".to_string()
            } else {
                "Rule enabled".to_string()
            })
        }
        (Resource::Database(db), ActionRequest::StartDb) => {
            db.status = DbStatus::Available;
            Some("Database started".to_string())
        }
        (Resource::Database(db), ActionRequest::StopDb) => {
            db.status = DbStatus::Stopped;
            Some("Database stopped".to_string())
        }
        (Resource::Database(db), ActionRequest::RestartDb) => {
            db.status = DbStatus::Updating;
            Some("Database restart initiated".to_string())
        }
        (Resource::Database(db), ActionRequest::CreateBackup) => {
            db.backups.insert(
                0,
                BackupItem {
                    id: Id::new_random(),
                    at: now,
                    size_gb: Some((db.used_storage_gb as f64 * 0.95).round() as i64),
                },
            );
            db.backups.truncate(MAX_RETAINED_BACKUPS);
            db.status = DbStatus::BackupInProgress;
            Some("Manual backup started".to_string())
        }
        (
            Resource::Database(db),
            ActionRequest::ResizeDb {
                tier,
                allocated_storage_gb,
            },
        ) => {
            db.tier = *tier;
            db.allocated_storage_gb = allocated_storage_gb
                .unwrap_or(db.allocated_storage_gb)
                .max(10);
            Some(format!(
                "Instance resized: tier {}, storage {} GB",
                tier.as_str(),
                db.allocated_storage_gb
            ))
        }
        // Kind/action mismatch: deliberate no-op, no history.
        _ => None,
    };

    if let Some(message) = message {
        resource.push_history(message, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_action_does_not_parse() {
        assert!(ActionRequest::parse("reticulateSplines", &json!({})).is_none());
    }

    #[test]
    fn malformed_payload_does_not_parse() {
        assert!(ActionRequest::parse("scalePool", &json!({"poolId": "p1"})).is_none());
        assert!(ActionRequest::parse("updateName", &json!({"name": ""})).is_none());
        assert!(ActionRequest::parse("editRule", &json!({"name": "x"})).is_none());
    }

    #[test]
    fn desired_nodes_are_floored_and_clamped() {
        let parsed =
            ActionRequest::parse("scalePool", &json!({"poolId": "p1", "desiredNodes": 0.9}))
                .unwrap();
        match parsed {
            ActionRequest::ScalePool { desired_nodes, .. } => assert_eq!(desired_nodes, 1),
            other => panic!("unexpected parse: {other:?}"),
        }
        let parsed =
            ActionRequest::parse("scalePool", &json!({"poolId": "p1", "desiredNodes": 5.7}))
                .unwrap();
        match parsed {
            ActionRequest::ScalePool { desired_nodes, .. } => assert_eq!(desired_nodes, 5),
            other => panic!("unexpected parse: {other:?}"),
        }
    }
}
