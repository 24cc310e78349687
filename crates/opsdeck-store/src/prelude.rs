pub use crate::actions::ActionRequest;
pub use crate::errors::StoreError;
pub use crate::memory::{MemoryStore, TenantPartition};
pub use crate::seed::seeded_store;
pub use crate::spi::{required_ability, ResourceStore};
