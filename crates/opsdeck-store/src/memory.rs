use std::collections::HashMap;

use async_trait::async_trait;
use opsdeck_auth::prelude::{can, Ability};
use opsdeck_model::prelude::*;
use opsdeck_types::prelude::{Id, Role, TenantId, Timestamp};
use parking_lot::RwLock;

use crate::actions::{self, ActionRequest};
use crate::errors::StoreError;
use crate::spi::{required_ability, ResourceStore};

const SEED_HISTORY_ITEMS_PER_RESOURCE: usize = 3;

/// Everything one tenant can ever see: its resources and its audit
/// ledger. Guarded by a single lock so read-modify-write cycles are
/// serialized per tenant while tenants never contend with each other.
pub struct TenantPartition {
    pub resources: Vec<Resource>,
    pub audit: Vec<AuditEntry>,
    audit_seeded: bool,
}

impl TenantPartition {
    pub fn new(resources: Vec<Resource>, audit: Vec<AuditEntry>) -> Self {
        Self {
            resources,
            audit,
            audit_seeded: false,
        }
    }
}

/// In-memory [`ResourceStore`]. The partition map is fixed at
/// construction; unknown tenants are rejected rather than created on
/// the fly.
pub struct MemoryStore {
    partitions: HashMap<TenantId, RwLock<TenantPartition>>,
}

impl MemoryStore {
    pub fn new(partitions: impl IntoIterator<Item = (TenantId, TenantPartition)>) -> Self {
        Self {
            partitions: partitions
                .into_iter()
                .map(|(tenant, partition)| (tenant, RwLock::new(partition)))
                .collect(),
        }
    }

    fn partition(&self, tenant: &TenantId) -> Result<&RwLock<TenantPartition>, StoreError> {
        self.partitions
            .get(tenant)
            .ok_or_else(|| StoreError::unknown_tenant(tenant.as_str()))
    }

    fn check_ability(actor: Role, ability: Ability) -> Result<(), StoreError> {
        if can(actor, ability) {
            Ok(())
        } else {
            Err(StoreError::forbidden(ability))
        }
    }
}

fn audit_entry(
    tenant: &TenantId,
    actor: Role,
    action: &str,
    kind: ResourceKind,
    entity_id: &Id,
    entity_name: &str,
    message: String,
    at: Timestamp,
) -> AuditEntry {
    AuditEntry {
        id: Id::new_random(),
        at,
        actor_role: actor,
        tenant: tenant.clone(),
        action: action.to_string(),
        entity_kind: kind,
        entity_id: entity_id.clone(),
        entity_name: entity_name.to_string(),
        message,
    }
}

/// Backfills the ledger from the first few status history lines of each
/// resource, oldest first. Runs at most once per tenant, and only while
/// the ledger is still empty.
fn seed_audit_from_history(tenant: &TenantId, partition: &mut TenantPartition) {
    if partition.audit_seeded || !partition.audit.is_empty() {
        return;
    }
    let mut entries = Vec::new();
    for resource in &partition.resources {
        for item in resource
            .status_history()
            .iter()
            .take(SEED_HISTORY_ITEMS_PER_RESOURCE)
        {
            entries.push(audit_entry(
                tenant,
                Role::System,
                "system_seed",
                resource.kind(),
                resource.id(),
                resource.name(),
                item.message.clone(),
                item.at,
            ));
        }
    }
    entries.sort_by_key(|entry| entry.at);
    partition.audit.extend(entries);
    partition.audit_seeded = true;
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn list_all(&self, tenant: &TenantId) -> Result<Vec<Resource>, StoreError> {
        let partition = self.partition(tenant)?.read();
        Ok(partition.resources.clone())
    }

    async fn get_one(
        &self,
        tenant: &TenantId,
        kind: ResourceKind,
        id: &str,
    ) -> Result<Option<Resource>, StoreError> {
        let partition = self.partition(tenant)?.read();
        Ok(partition
            .resources
            .iter()
            .find(|r| r.id().as_str() == id && r.kind() == kind)
            .cloned())
    }

    async fn apply_action(
        &self,
        tenant: &TenantId,
        kind: ResourceKind,
        id: &str,
        actor: Role,
        action: &str,
        payload: serde_json::Value,
    ) -> Result<Resource, StoreError> {
        Self::check_ability(actor, required_ability(kind, action))?;
        let mut partition = self.partition(tenant)?.write();
        let resource = partition
            .resources
            .iter_mut()
            .find(|r| r.id().as_str() == id && r.kind() == kind)
            .ok_or_else(|| StoreError::not_found(kind, id))?;

        let name_before = resource.name().to_string();
        if let Some(request) = ActionRequest::parse(action, &payload) {
            actions::apply(resource, &request, Timestamp::now());
        } else {
            tracing::debug!(
                tenant = tenant.as_str(),
                kind = kind.as_str(),
                action,
                "unrecognized action ignored"
            );
        }
        let message = resource
            .last_history_message()
            .unwrap_or(action)
            .to_string();
        let updated = resource.clone();

        let entry = audit_entry(
            tenant,
            actor,
            action,
            kind,
            updated.id(),
            &name_before,
            message,
            Timestamp::now(),
        );
        partition.audit.push(entry);
        Ok(updated)
    }

    async fn delete_one(
        &self,
        tenant: &TenantId,
        kind: ResourceKind,
        id: &str,
        actor: Role,
    ) -> Result<(), StoreError> {
        Self::check_ability(actor, Ability::ResourceMutate)?;
        let mut partition = self.partition(tenant)?.write();
        let index = partition
            .resources
            .iter()
            .position(|r| r.id().as_str() == id && r.kind() == kind)
            .ok_or_else(|| StoreError::not_found(kind, id))?;

        let label = match kind {
            ResourceKind::Kubernetes => "Delete cluster",
            ResourceKind::Gateway => "Delete gateway",
            ResourceKind::Postgres => "Delete database",
        };
        let name = partition.resources[index].name().to_string();
        let entity_id = partition.resources[index].id().clone();
        let entry = audit_entry(
            tenant,
            actor,
            "delete",
            kind,
            &entity_id,
            &name,
            format!("{label}: {name} removed"),
            Timestamp::now(),
        );
        // Trail first, then the removal it describes.
        partition.audit.push(entry);
        partition.resources.remove(index);
        Ok(())
    }

    async fn insert(&self, tenant: &TenantId, resource: Resource) -> Result<(), StoreError> {
        let mut partition = self.partition(tenant)?.write();
        partition.resources.push(resource);
        Ok(())
    }

    async fn append_audit(&self, tenant: &TenantId, entry: AuditEntry) -> Result<(), StoreError> {
        let mut partition = self.partition(tenant)?.write();
        partition.audit.push(entry);
        Ok(())
    }

    async fn list_audit(&self, tenant: &TenantId) -> Result<Vec<AuditEntry>, StoreError> {
        let mut partition = self.partition(tenant)?.write();
        seed_audit_from_history(tenant, &mut partition);
        let mut entries = partition.audit.clone();
        entries.sort_by(|a, b| b.at.cmp(&a.at));
        Ok(entries)
    }
}
