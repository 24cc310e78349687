use std::sync::Arc;

use opsdeck_model::prelude::*;
use opsdeck_provision::prelude::*;
use opsdeck_store::prelude::*;
use opsdeck_types::prelude::{Role, TenantId};
use serde_json::json;

fn acme() -> TenantId {
    TenantId::from("acme")
}

fn provisioner() -> (Arc<MemoryStore>, Provisioner) {
    let store = Arc::new(seeded_store());
    let pipeline = Provisioner::new(store.clone());
    (store, pipeline)
}

fn gateway_payload(port: i64) -> serde_json::Value {
    json!({
        "type": "gateway",
        "name": "edge-proxy",
        "region": "EU-West-1",
        "vpcId": "vpc-1234",
        "rules": [{
            "name": "API",
            "protocol": "https",
            "externalPort": port,
            "target": "backend:8080",
            "pathPrefix": "/api",
            "tlsEnabled": true
        }]
    })
}

#[tokio::test]
async fn provisions_a_gateway_end_to_end() {
    let (store, pipeline) = provisioner();
    let outcome = pipeline
        .provision(&acme(), Role::Admin, gateway_payload(443))
        .await
        .unwrap();

    assert!(outcome.created_id.starts_with("acme-gateway-"));
    assert_eq!(
        outcome.progress,
        vec![
            "Provision requested",
            "Resources allocated",
            "Provisioning\u{2026}",
            "Service ready"
        ]
    );

    let created = store
        .get_one(&acme(), ResourceKind::Gateway, &outcome.created_id)
        .await
        .unwrap()
        .expect("inserted");
    assert_eq!(created.name(), "edge-proxy");
    assert_eq!(created.status_history().len(), 5);
    assert_eq!(created.monthly_cost(), Money::usd(45));
    let Resource::Gateway(gw) = &created else {
        panic!("expected a gateway");
    };
    assert_eq!(gw.public_endpoint_url, "https://edge-proxy.gateway.example.com");
    assert_eq!(gw.rules[0].id.as_str(), format!("{}-rule-1", outcome.created_id));

    let entries = store.list_audit(&acme()).await.unwrap();
    let entry = entries
        .iter()
        .find(|e| e.action == "provision" && e.entity_id.as_str() == outcome.created_id)
        .expect("provision audited");
    assert_eq!(entry.message, "Provisioned gateway edge-proxy in EU-West-1");
}

#[tokio::test]
async fn out_of_range_port_fails_validation_without_side_effects() {
    let (store, pipeline) = provisioner();
    let before = store.list_all(&acme()).await.unwrap().len();

    let err = pipeline
        .provision(&acme(), Role::Admin, gateway_payload(70_000))
        .await
        .unwrap_err()
        .into_inner();
    assert_eq!(err.code, "schema.validation");
    assert_eq!(err.http_status, 422);
    assert_eq!(err.violations.len(), 1);
    assert_eq!(err.violations[0].path, "rules[0].externalPort");
    assert_eq!(err.violations[0].message, "Port must be between 1 and 65535");

    assert_eq!(store.list_all(&acme()).await.unwrap().len(), before);
}

#[tokio::test]
async fn violations_are_collected_not_short_circuited() {
    let (_, pipeline) = provisioner();
    let err = pipeline
        .provision(
            &acme(),
            Role::Admin,
            json!({
                "type": "kubernetes",
                "name": "x",
                "region": "EU-West-1",
                "kubernetesVersion": "1.29",
                "nodePools": [
                    {"poolName": "a", "instanceType": "Standard-2vCPU-8GB", "desiredNodes": 0},
                    {"poolName": "a", "instanceType": "Standard-2vCPU-8GB", "desiredNodes": 2}
                ]
            }),
        )
        .await
        .unwrap_err()
        .into_inner();
    let paths: Vec<&str> = err.violations.iter().map(|v| v.path.as_str()).collect();
    assert!(paths.contains(&"name"));
    assert!(paths.contains(&"nodePools[0].desiredNodes"));
    assert!(paths.contains(&"nodePools"));
}

#[tokio::test]
async fn viewer_cannot_provision() {
    let (store, pipeline) = provisioner();
    let err = pipeline
        .provision(&acme(), Role::Viewer, gateway_payload(443))
        .await
        .unwrap_err()
        .into_inner();
    assert_eq!(err.code, "auth.forbidden");
    assert_eq!(store.list_all(&acme()).await.unwrap().len(), 6);
}

#[tokio::test]
async fn malformed_payload_is_a_bad_request() {
    let (_, pipeline) = provisioner();
    let err = pipeline
        .provision(&acme(), Role::Admin, json!({"type": "mainframe"}))
        .await
        .unwrap_err()
        .into_inner();
    assert_eq!(err.code, "request.invalid");
    assert_eq!(err.http_status, 400);
}

#[tokio::test]
async fn invalid_region_reports_a_field_violation() {
    let (_, pipeline) = provisioner();
    let err = pipeline
        .provision(
            &acme(),
            Role::Admin,
            json!({
                "type": "postgres",
                "name": "orders-db",
                "region": "Mars-1",
                "pgVersion": "16",
                "tier": "Medium-4vCPU-8GB",
                "storageAllocatedGb": 200,
                "haMode": "primary_only"
            }),
        )
        .await
        .unwrap_err()
        .into_inner();
    assert_eq!(err.code, "schema.validation");
    assert_eq!(err.http_status, 422);
    assert_eq!(err.violations.len(), 1);
    assert_eq!(err.violations[0].path, "region");
    assert_eq!(err.violations[0].message, "Invalid region");
}

#[tokio::test]
async fn invalid_nested_enum_reports_its_path() {
    let (_, pipeline) = provisioner();
    let err = pipeline
        .provision(
            &acme(),
            Role::Admin,
            json!({
                "type": "kubernetes",
                "name": "batch-cluster",
                "region": "EU-West-1",
                "kubernetesVersion": "1.29",
                "nodePools": [
                    {"poolName": "workers", "instanceType": "Quantum-99", "desiredNodes": 3}
                ]
            }),
        )
        .await
        .unwrap_err()
        .into_inner();
    assert_eq!(err.code, "schema.validation");
    assert_eq!(err.violations.len(), 1);
    assert_eq!(err.violations[0].path, "nodePools[0].instanceType");
    assert_eq!(err.violations[0].message, "Invalid instance type");
}

#[tokio::test]
async fn database_synthesis_derives_host_and_replica() {
    let (store, pipeline) = provisioner();
    let outcome = pipeline
        .provision(
            &acme(),
            Role::Admin,
            json!({
                "type": "postgres",
                "name": "orders-db",
                "region": "US-East-1",
                "pgVersion": "16",
                "tier": "Medium-4vCPU-8GB",
                "storageAllocatedGb": 200,
                "haMode": "primary_read_replica"
            }),
        )
        .await
        .unwrap();

    let created = store
        .get_one(&acme(), ResourceKind::Postgres, &outcome.created_id)
        .await
        .unwrap()
        .expect("inserted");
    let Resource::Database(db) = created else {
        panic!("expected a database");
    };
    assert_eq!(db.host, "orders_db.postgres.us-east-1.internal");
    assert_eq!(db.db_name, "orders_db");
    assert_eq!(db.used_storage_gb, 0);
    assert_eq!(db.replica_status, Some(ReplicaStatus::Healthy));
    assert_eq!(db.monthly_cost, Money::usd(304));
}

#[tokio::test]
async fn name_uniqueness_is_case_insensitive() {
    let (store, _) = provisioner();
    assert!(!is_unique_resource_name(store.as_ref(), &acme(), " ACME-Prod-Cluster ")
        .await
        .unwrap());
    assert!(is_unique_resource_name(store.as_ref(), &acme(), "brand-new")
        .await
        .unwrap());
}
