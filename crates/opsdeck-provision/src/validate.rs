use opsdeck_errors::prelude::FieldViolation;
use opsdeck_model::prelude::{DbTier, HaMode, InstanceType, PgVersion, Region, RuleProtocol};
use opsdeck_model::validate::is_valid_gateway_port;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::ProvisionError;
use crate::payload::{
    ClusterSpec, DatabaseSpec, GatewaySpec, KubernetesVersion, ProvisionPayload,
};

pub const NAME_MIN: usize = 3;
pub const NAME_MAX: usize = 40;
pub const MIN_STORAGE_GB: i64 = 10;

/// Lowercase-insensitive slug of dash-separated alphanumeric segments.
/// Leading/trailing/doubled dashes are rejected.
pub fn is_name_slug(name: &str) -> bool {
    !name.is_empty()
        && name
            .split('-')
            .all(|seg| !seg.is_empty() && seg.chars().all(|c| c.is_ascii_alphanumeric()))
}

fn is_host_port(target: &str) -> bool {
    match target.rsplit_once(':') {
        Some((host, port)) => {
            !host.is_empty()
                && !host.contains(':')
                && !port.is_empty()
                && port.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

fn check_name(name: &str, out: &mut Vec<FieldViolation>) {
    if name.len() < NAME_MIN {
        out.push(FieldViolation::new(
            "name",
            "Name must be at least 3 characters",
        ));
    } else if name.len() > NAME_MAX {
        out.push(FieldViolation::new(
            "name",
            "Name must be at most 40 characters",
        ));
    } else if !is_name_slug(name) {
        out.push(FieldViolation::new(
            "name",
            "Name can only contain letters, numbers, and dashes",
        ));
    }
}

fn check_cluster(spec: &ClusterSpec, out: &mut Vec<FieldViolation>) {
    if spec.node_pools.is_empty() {
        out.push(FieldViolation::new(
            "nodePools",
            "At least one node pool required",
        ));
    }
    for (i, pool) in spec.node_pools.iter().enumerate() {
        if pool.pool_name.is_empty() {
            out.push(FieldViolation::new(
                format!("nodePools[{i}].poolName"),
                "Pool name required",
            ));
        }
        if pool.desired_nodes < 1 {
            out.push(FieldViolation::new(
                format!("nodePools[{i}].desiredNodes"),
                "At least 1 node required",
            ));
        }
    }
    let mut seen = Vec::new();
    for pool in &spec.node_pools {
        if seen.contains(&pool.pool_name.as_str()) {
            out.push(FieldViolation::new("nodePools", "Pool names must be unique"));
            break;
        }
        seen.push(pool.pool_name.as_str());
    }
}

fn check_gateway(spec: &GatewaySpec, out: &mut Vec<FieldViolation>) {
    if spec.vpc_id.is_empty() {
        out.push(FieldViolation::new("vpcId", "VPC ID required"));
    }
    if let Some(url) = spec.public_endpoint_url.as_deref() {
        if !url.is_empty() && !url.contains("://") {
            out.push(FieldViolation::new("publicEndpointUrl", "Invalid URL"));
        }
    }
    if spec.rules.is_empty() {
        out.push(FieldViolation::new("rules", "At least one rule required"));
    }
    for (i, rule) in spec.rules.iter().enumerate() {
        if rule.name.is_empty() {
            out.push(FieldViolation::new(
                format!("rules[{i}].name"),
                "Rule name required",
            ));
        }
        if !is_valid_gateway_port(rule.external_port) {
            out.push(FieldViolation::new(
                format!("rules[{i}].externalPort"),
                "Port must be between 1 and 65535",
            ));
        }
        if !is_host_port(&rule.target) {
            out.push(FieldViolation::new(
                format!("rules[{i}].target"),
                "Target must be host:port (e.g. backend:8080)",
            ));
        }
        if rule.path_prefix.is_empty() {
            out.push(FieldViolation::new(
                format!("rules[{i}].pathPrefix"),
                "Path prefix required (e.g. /api/v1)",
            ));
        }
    }
}

fn check_database(spec: &DatabaseSpec, out: &mut Vec<FieldViolation>) {
    if spec.storage_allocated_gb < MIN_STORAGE_GB {
        out.push(FieldViolation::new(
            "storageAllocatedGb",
            "Storage must be at least 10 GB",
        ));
    }
}

fn enum_check<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    key: &str,
    path: impl Into<String>,
    message: &str,
    out: &mut Vec<FieldViolation>,
) {
    let ok = obj
        .get(key)
        .is_some_and(|v| serde_json::from_value::<T>(v.clone()).is_ok());
    if !ok {
        out.push(FieldViolation::new(path, message));
    }
}

fn string_check(
    obj: &Map<String, Value>,
    key: &str,
    path: impl Into<String>,
    message: &str,
    out: &mut Vec<FieldViolation>,
) {
    if !obj.get(key).is_some_and(Value::is_string) {
        out.push(FieldViolation::new(path, message));
    }
}

fn integer_check(
    obj: &Map<String, Value>,
    key: &str,
    path: impl Into<String>,
    message: &str,
    out: &mut Vec<FieldViolation>,
) {
    let ok = obj
        .get(key)
        .is_some_and(|v| v.is_i64() || v.is_u64());
    if !ok {
        out.push(FieldViolation::new(path, message));
    }
}

/// Field-by-field pass over the raw value for payloads the typed parse
/// rejected, so a bad enum value ("Mars-1" region, unknown tier) comes
/// back addressed by path instead of as a generic parse failure.
fn shape_violations(value: &Value) -> Vec<FieldViolation> {
    let mut out = Vec::new();
    let Some(obj) = value.as_object() else {
        return out;
    };
    let Some(kind) = obj.get("type").and_then(Value::as_str) else {
        return out;
    };
    // Unknown kind tags stay a generic bad request.
    if !matches!(kind, "kubernetes" | "gateway" | "postgres") {
        return out;
    }

    string_check(obj, "name", "name", "Name required", &mut out);
    enum_check::<Region>(obj, "region", "region", "Invalid region", &mut out);

    match kind {
        "kubernetes" => {
            enum_check::<KubernetesVersion>(
                obj,
                "kubernetesVersion",
                "kubernetesVersion",
                "Invalid Kubernetes version",
                &mut out,
            );
            match obj.get("nodePools").and_then(Value::as_array) {
                None => out.push(FieldViolation::new(
                    "nodePools",
                    "At least one node pool required",
                )),
                Some(pools) => {
                    for (i, pool) in pools.iter().enumerate() {
                        let Some(pool) = pool.as_object() else {
                            out.push(FieldViolation::new(
                                format!("nodePools[{i}]"),
                                "Invalid node pool",
                            ));
                            continue;
                        };
                        string_check(
                            pool,
                            "poolName",
                            format!("nodePools[{i}].poolName"),
                            "Pool name required",
                            &mut out,
                        );
                        enum_check::<InstanceType>(
                            pool,
                            "instanceType",
                            format!("nodePools[{i}].instanceType"),
                            "Invalid instance type",
                            &mut out,
                        );
                        integer_check(
                            pool,
                            "desiredNodes",
                            format!("nodePools[{i}].desiredNodes"),
                            "At least 1 node required",
                            &mut out,
                        );
                    }
                }
            }
        }
        "gateway" => {
            string_check(obj, "vpcId", "vpcId", "VPC ID required", &mut out);
            if let Some(url) = obj.get("publicEndpointUrl") {
                if !url.is_string() && !url.is_null() {
                    out.push(FieldViolation::new("publicEndpointUrl", "Invalid URL"));
                }
            }
            match obj.get("rules").and_then(Value::as_array) {
                None => out.push(FieldViolation::new("rules", "At least one rule required")),
                Some(rules) => {
                    for (i, rule) in rules.iter().enumerate() {
                        let Some(rule) = rule.as_object() else {
                            out.push(FieldViolation::new(format!("rules[{i}]"), "Invalid rule"));
                            continue;
                        };
                        string_check(
                            rule,
                            "name",
                            format!("rules[{i}].name"),
                            "Rule name required",
                            &mut out,
                        );
                        enum_check::<RuleProtocol>(
                            rule,
                            "protocol",
                            format!("rules[{i}].protocol"),
                            "Invalid protocol",
                            &mut out,
                        );
                        integer_check(
                            rule,
                            "externalPort",
                            format!("rules[{i}].externalPort"),
                            "Port must be between 1 and 65535",
                            &mut out,
                        );
                        string_check(
                            rule,
                            "target",
                            format!("rules[{i}].target"),
                            "Target must be host:port (e.g. backend:8080)",
                            &mut out,
                        );
                        string_check(
                            rule,
                            "pathPrefix",
                            format!("rules[{i}].pathPrefix"),
                            "Path prefix required (e.g. /api/v1)",
                            &mut out,
                        );
                        if !rule.get("tlsEnabled").is_some_and(Value::is_boolean) {
                            out.push(FieldViolation::new(
                                format!("rules[{i}].tlsEnabled"),
                                "TLS flag required",
                            ));
                        }
                    }
                }
            }
        }
        "postgres" => {
            enum_check::<PgVersion>(
                obj,
                "pgVersion",
                "pgVersion",
                "Invalid Postgres version",
                &mut out,
            );
            enum_check::<DbTier>(obj, "tier", "tier", "Invalid tier", &mut out);
            integer_check(
                obj,
                "storageAllocatedGb",
                "storageAllocatedGb",
                "Storage must be at least 10 GB",
                &mut out,
            );
            enum_check::<HaMode>(obj, "haMode", "haMode", "Invalid HA mode", &mut out);
        }
        _ => {}
    }
    out
}

/// Typed parse with addressable failures. Non-objects and unknown kind
/// tags stay a generic bad request; anything with a recognized tag
/// reports its broken fields by path.
pub fn parse_payload(value: &Value) -> Result<ProvisionPayload, ProvisionError> {
    match serde_json::from_value::<ProvisionPayload>(value.clone()) {
        Ok(payload) => Ok(payload),
        Err(_) => {
            let violations = shape_violations(value);
            if violations.is_empty() {
                Err(ProvisionError::invalid_payload())
            } else {
                Err(ProvisionError::validation(violations))
            }
        }
    }
}

/// Every rule is evaluated; violations are collected rather than
/// short-circuited so a form can surface them all at once.
pub fn validate(payload: &ProvisionPayload) -> Result<(), ProvisionError> {
    let mut violations = Vec::new();
    check_name(payload.name(), &mut violations);
    match payload {
        ProvisionPayload::Cluster(spec) => check_cluster(spec, &mut violations),
        ProvisionPayload::Gateway(spec) => check_gateway(spec, &mut violations),
        ProvisionPayload::Database(spec) => check_database(spec, &mut violations),
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ProvisionError::validation(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_rules() {
        assert!(is_name_slug("acme-prod-cluster"));
        assert!(is_name_slug("abc"));
        assert!(!is_name_slug("-leading"));
        assert!(!is_name_slug("trailing-"));
        assert!(!is_name_slug("double--dash"));
        assert!(!is_name_slug("under_score"));
        assert!(!is_name_slug("spa ce"));
    }

    #[test]
    fn host_port_rules() {
        assert!(is_host_port("backend:8080"));
        assert!(is_host_port("svc.internal:443"));
        assert!(!is_host_port("backend"));
        assert!(!is_host_port(":8080"));
        assert!(!is_host_port("backend:"));
        assert!(!is_host_port("backend:http"));
    }
}
