use opsdeck_types::prelude::TenantId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TenantInfo {
    pub slug: String,
    pub display_name: String,
}

/// Static tenant allow-list. Host labels are checked against it on
/// every request; it never changes at runtime.
#[derive(Clone, Debug)]
pub struct TenantRegistry {
    default_tenant: TenantId,
    tenants: Vec<TenantInfo>,
}

impl TenantRegistry {
    pub fn new(default_tenant: TenantId, tenants: Vec<TenantInfo>) -> Self {
        Self {
            default_tenant,
            tenants,
        }
    }

    /// The two-tenant demo roster.
    pub fn demo() -> Self {
        Self::new(
            TenantId::from("acme"),
            vec![
                TenantInfo {
                    slug: "acme".into(),
                    display_name: "Acme Corp".into(),
                },
                TenantInfo {
                    slug: "globex".into(),
                    display_name: "Globex Industries".into(),
                },
            ],
        )
    }

    pub fn default_tenant(&self) -> &TenantId {
        &self.default_tenant
    }

    pub fn is_tenant(&self, slug: &str) -> bool {
        self.tenants.iter().any(|t| t.slug == slug)
    }

    pub fn tenants(&self) -> &[TenantInfo] {
        &self.tenants
    }

    /// Falls back to the raw slug for labels outside the roster.
    pub fn display_name<'a>(&'a self, slug: &'a str) -> &'a str {
        self.tenants
            .iter()
            .find(|t| t.slug == slug)
            .map(|t| t.display_name.as_str())
            .unwrap_or(slug)
    }
}
