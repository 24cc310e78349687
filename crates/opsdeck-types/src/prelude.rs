pub use crate::id::Id;
pub use crate::role::Role;
pub use crate::tenant::TenantId;
pub use crate::time::{now_ms, Timestamp};
