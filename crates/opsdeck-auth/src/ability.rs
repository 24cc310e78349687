use opsdeck_types::prelude::Role;
use serde::{Deserialize, Serialize};

/// Closed set of gated abilities. Add new abilities here as the console
/// grows; anything not in the matrix below is denied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    #[serde(rename = "resource.provision")]
    ResourceProvision,
    #[serde(rename = "resource.mutate")]
    ResourceMutate,
    #[serde(rename = "gateway.rule.edit")]
    GatewayRuleEdit,
    #[serde(rename = "gateway.rule.disable")]
    GatewayRuleDisable,
}

impl Ability {
    pub const fn as_str(self) -> &'static str {
        match self {
            Ability::ResourceProvision => "resource.provision",
            Ability::ResourceMutate => "resource.mutate",
            Ability::GatewayRuleEdit => "gateway.rule.edit",
            Ability::GatewayRuleDisable => "gateway.rule.disable",
        }
    }
}

/// Role x ability matrix. Admin holds every ability, Viewer none; the
/// System tag exists only for audit attribution and is always denied.
/// Deterministic and stateless: same inputs, same answer.
pub fn can(role: Role, ability: Ability) -> bool {
    match role {
        Role::Admin => match ability {
            Ability::ResourceProvision
            | Ability::ResourceMutate
            | Ability::GatewayRuleEdit
            | Ability::GatewayRuleDisable => true,
        },
        Role::Viewer => match ability {
            Ability::ResourceProvision
            | Ability::ResourceMutate
            | Ability::GatewayRuleEdit
            | Ability::GatewayRuleDisable => false,
        },
        Role::System => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_holds_every_ability() {
        for ability in [
            Ability::ResourceProvision,
            Ability::ResourceMutate,
            Ability::GatewayRuleEdit,
            Ability::GatewayRuleDisable,
        ] {
            assert!(can(Role::Admin, ability), "admin denied {ability:?}");
        }
    }

    #[test]
    fn viewer_is_read_only() {
        for ability in [
            Ability::ResourceProvision,
            Ability::ResourceMutate,
            Ability::GatewayRuleEdit,
            Ability::GatewayRuleDisable,
        ] {
            assert!(!can(Role::Viewer, ability), "viewer granted {ability:?}");
        }
    }

    #[test]
    fn system_tag_is_never_granted() {
        assert!(!can(Role::System, Ability::ResourceMutate));
    }

    #[test]
    fn matrix_is_deterministic() {
        assert_eq!(
            can(Role::Admin, Ability::GatewayRuleEdit),
            can(Role::Admin, Ability::GatewayRuleEdit)
        );
    }
}
