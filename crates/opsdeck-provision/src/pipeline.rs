use std::sync::Arc;

use opsdeck_auth::prelude::{can, Ability};
use opsdeck_model::prelude::AuditEntry;
use opsdeck_store::prelude::ResourceStore;
use opsdeck_types::prelude::{Id, Role, TenantId, Timestamp};
use serde::Serialize;

use crate::errors::ProvisionError;
use crate::payload::ProvisionPayload;
use crate::synth::{progress_steps, synthesize};
use crate::validate::{parse_payload, validate};

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionOutcome {
    pub created_id: String,
    pub progress: Vec<String>,
}

/// validate -> estimate -> instantiate, in that order; nothing is
/// written unless every earlier stage passed.
pub struct Provisioner {
    store: Arc<dyn ResourceStore>,
}

impl Provisioner {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self { store }
    }

    pub async fn provision(
        &self,
        tenant: &TenantId,
        actor: Role,
        payload: serde_json::Value,
    ) -> Result<ProvisionOutcome, ProvisionError> {
        if !can(actor, Ability::ResourceProvision) {
            return Err(ProvisionError::forbidden(Ability::ResourceProvision));
        }
        let payload: ProvisionPayload = parse_payload(&payload)?;
        validate(&payload)?;

        let now = Timestamp::now();
        let resource = synthesize(tenant, &payload, now);
        let created_id = resource.id().to_string();
        tracing::info!(
            tenant = tenant.as_str(),
            kind = payload.kind().as_str(),
            id = created_id.as_str(),
            "provisioning resource"
        );

        self.store.insert(tenant, resource).await?;
        self.store
            .append_audit(
                tenant,
                AuditEntry {
                    id: Id::new_random(),
                    at: now,
                    actor_role: actor,
                    tenant: tenant.clone(),
                    action: "provision".to_string(),
                    entity_kind: payload.kind(),
                    entity_id: Id(created_id.clone()),
                    entity_name: payload.name().to_string(),
                    message: format!(
                        "Provisioned {} {} in {}",
                        payload.kind().as_str(),
                        payload.name(),
                        payload.region().as_str()
                    ),
                },
            )
            .await?;

        Ok(ProvisionOutcome {
            created_id,
            progress: progress_steps(),
        })
    }
}

/// Caller-side pre-check; the pipeline itself does not reject duplicate
/// names. Comparison is trimmed and case-insensitive.
pub async fn is_unique_resource_name(
    store: &dyn ResourceStore,
    tenant: &TenantId,
    name: &str,
) -> Result<bool, ProvisionError> {
    let wanted = name.trim().to_lowercase();
    let resources = store.list_all(tenant).await?;
    Ok(resources
        .iter()
        .all(|r| r.name().to_lowercase() != wanted))
}
