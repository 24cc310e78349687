use std::sync::Arc;

use opsdeck_provision::prelude::Provisioner;
use opsdeck_routing::prelude::TenantRegistry;
use opsdeck_store::prelude::{seeded_store, ResourceStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResourceStore>,
    pub provisioner: Arc<Provisioner>,
    pub registry: Arc<TenantRegistry>,
}

impl AppState {
    pub fn new(store: Arc<dyn ResourceStore>, registry: TenantRegistry) -> Self {
        Self {
            provisioner: Arc::new(Provisioner::new(store.clone())),
            store,
            registry: Arc::new(registry),
        }
    }

    /// Demo wiring: seeded in-memory store plus the two-tenant roster.
    pub fn demo() -> Self {
        Self::new(Arc::new(seeded_store()), TenantRegistry::demo())
    }
}
