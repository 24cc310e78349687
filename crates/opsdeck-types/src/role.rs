use serde::{Deserialize, Serialize};

/// Actor identity attached to every state-changing call. `System` is an
/// audit-only tag for machine-generated entries; it is never granted
/// abilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Viewer,
    System,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Viewer => "viewer",
            Role::System => "system",
        }
    }

    /// Parses a session role marker. Anything other than an explicit
    /// "viewer" resolves to Admin, matching the bootstrap default the
    /// resolver plants on first contact.
    pub fn from_marker(value: Option<&str>) -> Self {
        match value {
            Some("viewer") => Role::Viewer,
            _ => Role::Admin,
        }
    }
}
