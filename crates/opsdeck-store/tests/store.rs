use opsdeck_model::prelude::*;
use opsdeck_store::prelude::*;
use opsdeck_types::prelude::{Role, TenantId};
use serde_json::json;

fn acme() -> TenantId {
    TenantId::from("acme")
}

fn globex() -> TenantId {
    TenantId::from("globex")
}

#[tokio::test]
async fn partitions_never_leak_across_tenants() {
    let store = seeded_store();
    let acme_ids: Vec<String> = store
        .list_all(&acme())
        .await
        .unwrap()
        .iter()
        .map(|r| r.id().to_string())
        .collect();
    let globex_ids: Vec<String> = store
        .list_all(&globex())
        .await
        .unwrap()
        .iter()
        .map(|r| r.id().to_string())
        .collect();
    assert_eq!(acme_ids.len(), 6);
    assert_eq!(globex_ids.len(), 6);
    assert!(acme_ids.iter().all(|id| !globex_ids.contains(id)));

    // Looking up an acme id through the globex partition is plain absence.
    let cross = store
        .get_one(&globex(), ResourceKind::Kubernetes, "acme-kubernetes-1")
        .await
        .unwrap();
    assert!(cross.is_none());
}

#[tokio::test]
async fn absence_is_uniform_across_causes() {
    let store = seeded_store();
    // Missing id and wrong kind produce the same NotFound shape.
    let missing = store
        .apply_action(
            &acme(),
            ResourceKind::Kubernetes,
            "no-such-id",
            Role::Admin,
            "restartCluster",
            json!({}),
        )
        .await
        .unwrap_err()
        .into_inner();
    let wrong_kind = store
        .apply_action(
            &acme(),
            ResourceKind::Gateway,
            "acme-kubernetes-1",
            Role::Admin,
            "activateGateway",
            json!({}),
        )
        .await
        .unwrap_err()
        .into_inner();
    assert_eq!(missing.code, "storage.not_found");
    assert_eq!(wrong_kind.code, "storage.not_found");
    assert_eq!(missing.http_status, 404);
    assert_eq!(wrong_kind.http_status, 404);
}

#[tokio::test]
async fn scale_pool_updates_nodes_and_narrates() {
    let store = seeded_store();
    let updated = store
        .apply_action(
            &acme(),
            ResourceKind::Kubernetes,
            "acme-kubernetes-1",
            Role::Admin,
            "scalePool",
            json!({"poolId": "acme-np-1a", "desiredNodes": 5}),
        )
        .await
        .unwrap();
    let Resource::Cluster(cluster) = &updated else {
        panic!("expected a cluster");
    };
    assert_eq!(cluster.node_pools[0].desired_nodes, 5);
    assert_eq!(cluster.node_pools[1].desired_nodes, 2);
    assert_eq!(
        updated.last_history_message(),
        Some("Pool scaled to 5 nodes")
    );
}

#[tokio::test]
async fn fractional_and_low_node_counts_are_clamped() {
    let store = seeded_store();
    let updated = store
        .apply_action(
            &acme(),
            ResourceKind::Kubernetes,
            "acme-kubernetes-1",
            Role::Admin,
            "scalePool",
            json!({"poolId": "acme-np-1a", "desiredNodes": 0}),
        )
        .await
        .unwrap();
    let Resource::Cluster(cluster) = updated else {
        panic!("expected a cluster");
    };
    assert_eq!(cluster.node_pools[0].desired_nodes, 1);
}

#[tokio::test]
async fn rename_audits_the_previous_name() {
    let store = seeded_store();
    store
        .apply_action(
            &acme(),
            ResourceKind::Kubernetes,
            "acme-kubernetes-2",
            Role::Admin,
            "updateName",
            json!({"name": "acme-qa"}),
        )
        .await
        .unwrap();
    let entries = store.list_audit(&acme()).await.unwrap();
    let entry = entries
        .iter()
        .find(|e| e.action == "updateName")
        .expect("rename audited");
    assert_eq!(entry.entity_name, "acme-staging");
    assert_eq!(entry.message, "Renamed to acme-qa");

    let renamed = store
        .get_one(&acme(), ResourceKind::Kubernetes, "acme-kubernetes-2")
        .await
        .unwrap()
        .expect("still present");
    assert_eq!(renamed.name(), "acme-qa");
}

#[tokio::test]
async fn unrecognized_action_is_a_noop_yet_audited() {
    let store = seeded_store();
    let before = store
        .get_one(&acme(), ResourceKind::Gateway, "acme-gateway-1")
        .await
        .unwrap()
        .expect("seeded");
    let history_len = before.status_history().len();

    let after = store
        .apply_action(
            &acme(),
            ResourceKind::Gateway,
            "acme-gateway-1",
            Role::Admin,
            "defragmentFlux",
            json!({}),
        )
        .await
        .unwrap();
    assert_eq!(after.status_history().len(), history_len);

    let entries = store.list_audit(&acme()).await.unwrap();
    let entry = entries
        .iter()
        .find(|e| e.action == "defragmentFlux")
        .expect("no-op still audited");
    // Falls back to the last existing narrative line.
    assert_eq!(entry.message, "Operational");
}

#[tokio::test]
async fn viewer_is_rejected_before_any_side_effect() {
    let store = seeded_store();
    let err = store
        .apply_action(
            &acme(),
            ResourceKind::Kubernetes,
            "acme-kubernetes-1",
            Role::Viewer,
            "restartCluster",
            json!({}),
        )
        .await
        .unwrap_err()
        .into_inner();
    assert_eq!(err.code, "auth.forbidden");
    assert_eq!(err.http_status, 403);

    let untouched = store
        .get_one(&acme(), ResourceKind::Kubernetes, "acme-kubernetes-1")
        .await
        .unwrap()
        .expect("seeded");
    assert_eq!(untouched.last_history_message(), Some("Operational"));
    let entries = store.list_audit(&acme()).await.unwrap();
    assert!(entries.iter().all(|e| e.action != "restartCluster"));
}

#[tokio::test]
async fn delete_leaves_a_trail_that_outlives_the_resource() {
    let store = seeded_store();
    store
        .delete_one(&acme(), ResourceKind::Postgres, "acme-postgres-2", Role::Admin)
        .await
        .unwrap();

    assert!(store
        .get_one(&acme(), ResourceKind::Postgres, "acme-postgres-2")
        .await
        .unwrap()
        .is_none());

    let entries = store.list_audit(&acme()).await.unwrap();
    let entry = entries
        .iter()
        .find(|e| e.action == "delete")
        .expect("delete audited");
    assert_eq!(entry.entity_name, "acme-analytics-db");
    assert_eq!(entry.message, "Delete database: acme-analytics-db removed");
}

#[tokio::test]
async fn viewer_cannot_delete() {
    let store = seeded_store();
    let err = store
        .delete_one(&acme(), ResourceKind::Postgres, "acme-postgres-2", Role::Viewer)
        .await
        .unwrap_err()
        .into_inner();
    assert_eq!(err.code, "auth.forbidden");
    assert!(store
        .get_one(&acme(), ResourceKind::Postgres, "acme-postgres-2")
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn backups_prepend_and_cap() {
    let store = seeded_store();
    for _ in 0..12 {
        store
            .apply_action(
                &acme(),
                ResourceKind::Postgres,
                "acme-postgres-1",
                Role::Admin,
                "createBackup",
                json!({}),
            )
            .await
            .unwrap();
    }
    let resource = store
        .get_one(&acme(), ResourceKind::Postgres, "acme-postgres-1")
        .await
        .unwrap()
        .expect("seeded");
    let Resource::Database(db) = resource else {
        panic!("expected a database");
    };
    assert_eq!(db.backups.len(), MAX_RETAINED_BACKUPS);
    assert_eq!(db.status, DbStatus::BackupInProgress);
    // round(87 * 0.95) = 83
    assert_eq!(db.backups[0].size_gb, Some(83));
}

#[tokio::test]
async fn toggle_messages_reflect_the_prior_state() {
    let store = seeded_store();
    let first = store
        .apply_action(
            &acme(),
            ResourceKind::Kubernetes,
            "acme-kubernetes-1",
            Role::Admin,
            "toggleCordon",
            json!({"poolId": "acme-np-1a"}),
        )
        .await
        .unwrap();
    assert_eq!(first.last_history_message(), Some("Pool cordoned"));
    let second = store
        .apply_action(
            &acme(),
            ResourceKind::Kubernetes,
            "acme-kubernetes-1",
            Role::Admin,
            "toggleCordon",
            json!({"poolId": "acme-np-1a"}),
        )
        .await
        .unwrap();
    assert_eq!(second.last_history_message(), Some("Pool uncordoned"));
}

#[tokio::test]
async fn gateway_rule_edits_need_the_dedicated_grant() {
    let store = seeded_store();
    let err = store
        .apply_action(
            &acme(),
            ResourceKind::Gateway,
            "acme-gateway-1",
            Role::Viewer,
            "toggleRule",
            json!({"ruleId": "acme-r-1"}),
        )
        .await
        .unwrap_err()
        .into_inner();
    assert_eq!(err.code, "auth.forbidden");

    let toggled = store
        .apply_action(
            &acme(),
            ResourceKind::Gateway,
            "acme-gateway-1",
            Role::Admin,
            "toggleRule",
            json!({"ruleId": "acme-r-1"}),
        )
        .await
        .unwrap();
    assert_eq!(toggled.last_history_message(), Some("Rule disabled"));
}

#[tokio::test]
async fn audit_is_newest_first() {
    let store = seeded_store();
    store
        .apply_action(
            &acme(),
            ResourceKind::Kubernetes,
            "acme-kubernetes-1",
            Role::Admin,
            "restartCluster",
            json!({}),
        )
        .await
        .unwrap();
    let entries = store.list_audit(&acme()).await.unwrap();
    assert_eq!(entries[0].action, "restartCluster");
    assert!(entries.windows(2).all(|w| w[0].at >= w[1].at));
}

#[tokio::test]
async fn empty_ledger_backfills_from_history_exactly_once() {
    let resources = seeded_store().list_all(&acme()).await.unwrap();
    let store = MemoryStore::new([(
        acme(),
        TenantPartition::new(resources, Vec::new()),
    )]);

    let entries = store.list_audit(&acme()).await.unwrap();
    // 6 resources, first 3 history lines each.
    assert_eq!(entries.len(), 18);
    assert!(entries
        .iter()
        .all(|e| e.action == "system_seed" && e.actor_role == Role::System));

    // Second read does not duplicate the backfill.
    let again = store.list_audit(&acme()).await.unwrap();
    assert_eq!(again.len(), 18);
}

#[tokio::test]
async fn prebaked_ledger_suppresses_backfill() {
    let store = seeded_store();
    let entries = store.list_audit(&acme()).await.unwrap();
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|e| e.action != "system_seed"));
}

#[tokio::test]
async fn unknown_tenant_is_rejected() {
    let store = seeded_store();
    let err = store
        .list_all(&TenantId::from("initech"))
        .await
        .unwrap_err()
        .into_inner();
    assert_eq!(err.code, "storage.not_found");
}
