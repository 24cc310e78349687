use opsdeck_model::prelude::*;

use crate::payload::ProvisionPayload;

const GATEWAY_BASE: i64 = 30;
const GATEWAY_PER_RULE: i64 = 15;
const PG_STORAGE_PER_GB: f64 = 0.15;
const PG_HA_MULTIPLIER: f64 = 1.6;

const fn node_unit_cost(instance: InstanceType) -> i64 {
    match instance {
        InstanceType::Standard2Vcpu8Gb => 70,
        InstanceType::Performance4Vcpu16Gb => 140,
        InstanceType::HighMem8Vcpu32Gb => 280,
    }
}

const fn tier_base(tier: DbTier) -> i64 {
    match tier {
        DbTier::Small2Vcpu4Gb => 80,
        DbTier::Medium4Vcpu8Gb => 160,
        DbTier::Large8Vcpu16Gb => 320,
    }
}

/// Deterministic monthly price for a validated payload. Same payload,
/// same figure; no clock or randomness involved.
pub fn estimate_monthly_cost(payload: &ProvisionPayload) -> Money {
    match payload {
        ProvisionPayload::Cluster(spec) => {
            let amount = spec
                .node_pools
                .iter()
                .map(|pool| node_unit_cost(pool.instance_type) * pool.desired_nodes)
                .sum();
            Money::usd(amount)
        }
        ProvisionPayload::Gateway(spec) => {
            Money::usd(GATEWAY_BASE + GATEWAY_PER_RULE * spec.rules.len() as i64)
        }
        ProvisionPayload::Database(spec) => {
            let base = tier_base(spec.tier) as f64;
            let storage = spec.storage_allocated_gb as f64 * PG_STORAGE_PER_GB;
            let mult = match spec.ha_mode {
                HaMode::PrimaryReadReplica => PG_HA_MULTIPLIER,
                HaMode::PrimaryOnly => 1.0,
            };
            Money::usd(((base + storage) * mult).round() as i64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{ClusterSpec, DatabaseSpec, KubernetesVersion, PoolSpec};

    #[test]
    fn cluster_price_sums_pools() {
        let payload = ProvisionPayload::Cluster(ClusterSpec {
            name: "pricing".into(),
            region: Region::EuWest1,
            kubernetes_version: KubernetesVersion::V1_29,
            node_pools: vec![
                PoolSpec {
                    pool_name: "std".into(),
                    instance_type: InstanceType::Standard2Vcpu8Gb,
                    desired_nodes: 3,
                },
                PoolSpec {
                    pool_name: "perf".into(),
                    instance_type: InstanceType::Performance4Vcpu16Gb,
                    desired_nodes: 2,
                },
            ],
        });
        assert_eq!(estimate_monthly_cost(&payload), Money::usd(490));
    }

    #[test]
    fn ha_replica_multiplies_and_rounds() {
        let payload = ProvisionPayload::Database(DatabaseSpec {
            name: "pricing-db".into(),
            region: Region::UsEast1,
            pg_version: PgVersion::V16,
            tier: DbTier::Medium4Vcpu8Gb,
            storage_allocated_gb: 200,
            ha_mode: HaMode::PrimaryReadReplica,
        });
        // (160 + 30) * 1.6 = 304
        assert_eq!(estimate_monthly_cost(&payload), Money::usd(304));
    }
}
