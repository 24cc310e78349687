use crate::errors::StoreError;
use async_trait::async_trait;
use opsdeck_auth::prelude::Ability;
use opsdeck_model::prelude::{AuditEntry, Resource, ResourceKind};
use opsdeck_types::prelude::{Role, TenantId};

/// Ability demanded by a given `(kind, action)` pair before the store
/// will touch the resource. Gateway rule management has its own grants;
/// everything else is generic mutation.
pub fn required_ability(kind: ResourceKind, action: &str) -> Ability {
    match (kind, action) {
        (ResourceKind::Gateway, "addRule" | "editRule") => Ability::GatewayRuleEdit,
        (ResourceKind::Gateway, "toggleRule") => Ability::GatewayRuleDisable,
        _ => Ability::ResourceMutate,
    }
}

/// Tenant-partitioned resource collection plus the per-tenant audit
/// ledger. All operations are scoped by an explicit tenant; nothing is
/// ever visible across partitions.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Snapshot copy of every resource in the tenant partition. An
    /// empty list is a valid answer, not an error.
    async fn list_all(&self, tenant: &TenantId) -> Result<Vec<Resource>, StoreError>;

    /// `None` when the id is absent, registered under another kind, or
    /// lives in a different tenant — the three cases are identical.
    async fn get_one(
        &self,
        tenant: &TenantId,
        kind: ResourceKind,
        id: &str,
    ) -> Result<Option<Resource>, StoreError>;

    /// Read-modify-write under the partition lock. Checks the ability
    /// gate itself, dispatches on `(kind, action)`, appends status
    /// history for recognized actions and an audit entry for every
    /// successful call. Unrecognized actions are a deliberate no-op.
    async fn apply_action(
        &self,
        tenant: &TenantId,
        kind: ResourceKind,
        id: &str,
        actor: Role,
        action: &str,
        payload: serde_json::Value,
    ) -> Result<Resource, StoreError>;

    /// Audited-before-effected: the audit entry is written first, so
    /// the trail always shows the delete.
    async fn delete_one(
        &self,
        tenant: &TenantId,
        kind: ResourceKind,
        id: &str,
        actor: Role,
    ) -> Result<(), StoreError>;

    /// Inserts a freshly provisioned resource into the partition.
    async fn insert(&self, tenant: &TenantId, resource: Resource) -> Result<(), StoreError>;

    async fn append_audit(&self, tenant: &TenantId, entry: AuditEntry) -> Result<(), StoreError>;

    /// All audit entries for the tenant, newest first (stable within
    /// one read). Lazily backfills the ledger from status history on
    /// the first read, exactly once per tenant.
    async fn list_audit(&self, tenant: &TenantId) -> Result<Vec<AuditEntry>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_rule_actions_demand_dedicated_grants() {
        assert_eq!(
            required_ability(ResourceKind::Gateway, "addRule"),
            Ability::GatewayRuleEdit
        );
        assert_eq!(
            required_ability(ResourceKind::Gateway, "editRule"),
            Ability::GatewayRuleEdit
        );
        assert_eq!(
            required_ability(ResourceKind::Gateway, "toggleRule"),
            Ability::GatewayRuleDisable
        );
    }

    #[test]
    fn everything_else_is_generic_mutation() {
        assert_eq!(
            required_ability(ResourceKind::Kubernetes, "scalePool"),
            Ability::ResourceMutate
        );
        assert_eq!(
            required_ability(ResourceKind::Gateway, "activateGateway"),
            Ability::ResourceMutate
        );
        assert_eq!(
            required_ability(ResourceKind::Postgres, "createBackup"),
            Ability::ResourceMutate
        );
    }
}
