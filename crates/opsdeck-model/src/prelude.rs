pub use crate::cluster::{
    Cluster, ClusterNode, ClusterStatus, InstanceType, NodePool, NodeStatus,
};
pub use crate::common::{
    AuditEntry, Currency, Money, Region, ResourceKind, StatusHistoryItem,
};
pub use crate::database::{
    BackupItem, Database, DbStatus, DbTier, HaMode, PgVersion, ReplicaStatus,
    MAX_RETAINED_BACKUPS,
};
pub use crate::gateway::{ForwardingRule, Gateway, GatewayStatus, RuleProtocol, RuleStatus};
pub use crate::resource::Resource;
pub use crate::validate::{is_valid_gateway_port, GATEWAY_PORT_MAX, GATEWAY_PORT_MIN};
