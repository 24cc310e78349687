pub use crate::registry::{TenantInfo, TenantRegistry};
pub use crate::resolver::{
    resolve, Resolution, RouteDecision, DEFAULT_ROLE_MARKER, INTERNAL_PREFIX, ROLE_MARKER,
    TENANT_NOT_FOUND_PATH,
};
