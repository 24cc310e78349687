pub use crate::cost::estimate_monthly_cost;
pub use crate::errors::ProvisionError;
pub use crate::payload::{
    ClusterSpec, DatabaseSpec, GatewaySpec, KubernetesVersion, PoolSpec, ProvisionPayload, RuleSpec,
};
pub use crate::pipeline::{is_unique_resource_name, ProvisionOutcome, Provisioner};
pub use crate::synth::{progress_steps, synthesize};
pub use crate::validate::{parse_payload, validate};
