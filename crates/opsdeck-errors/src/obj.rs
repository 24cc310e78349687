use crate::codes::ErrorCode;
use crate::retry::RetryClass;
use serde::{Deserialize, Serialize};

/// One violated validation rule, addressed by field path
/// (e.g. `rules[0].externalPort`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub path: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Transport-agnostic error payload shared by every crate in the
/// workspace. `user_msg` is safe to surface verbatim; `dev_msg` is for
/// logs only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorObj {
    pub code: &'static str,
    pub http_status: u16,
    pub retry: RetryClass,
    pub user_msg: String,
    pub dev_msg: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<FieldViolation>,
}

impl ErrorObj {
    /// Message shown to end users; generic fallback when a builder left
    /// it empty.
    pub fn message(&self) -> &str {
        if self.user_msg.is_empty() {
            "Action failed"
        } else {
            &self.user_msg
        }
    }
}

pub struct ErrorBuilder {
    code: ErrorCode,
    user_msg: String,
    dev_msg: Option<String>,
    violations: Vec<FieldViolation>,
}

impl ErrorBuilder {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            user_msg: String::new(),
            dev_msg: None,
            violations: Vec::new(),
        }
    }

    pub fn user_msg(mut self, msg: impl Into<String>) -> Self {
        self.user_msg = msg.into();
        self
    }

    pub fn dev_msg(mut self, msg: impl Into<String>) -> Self {
        self.dev_msg = Some(msg.into());
        self
    }

    pub fn violation(mut self, path: impl Into<String>, message: impl Into<String>) -> Self {
        self.violations.push(FieldViolation::new(path, message));
        self
    }

    pub fn violations(mut self, violations: Vec<FieldViolation>) -> Self {
        self.violations = violations;
        self
    }

    pub fn build(self) -> ErrorObj {
        ErrorObj {
            code: self.code.code,
            http_status: self.code.http_status,
            retry: self.code.retry,
            user_msg: self.user_msg,
            dev_msg: self.dev_msg,
            violations: self.violations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes;

    #[test]
    fn builder_carries_code_metadata() {
        let obj = ErrorBuilder::new(codes::STORAGE_NOT_FOUND)
            .user_msg("Resource not found.")
            .dev_msg("kubernetes/k1 missing")
            .build();
        assert_eq!(obj.code, "storage.not_found");
        assert_eq!(obj.http_status, 404);
        assert_eq!(obj.message(), "Resource not found.");
    }

    #[test]
    fn empty_user_msg_falls_back() {
        let obj = ErrorBuilder::new(codes::UNKNOWN_INTERNAL).build();
        assert_eq!(obj.message(), "Action failed");
    }

    #[test]
    fn violations_survive_serialization() {
        let obj = ErrorBuilder::new(codes::SCHEMA_VALIDATION)
            .violation("name", "Name must be at least 3 characters")
            .violation("rules[0].externalPort", "Port must be between 1 and 65535")
            .build();
        let json = serde_json::to_value(&obj).unwrap();
        assert_eq!(json["violations"].as_array().unwrap().len(), 2);
    }
}
