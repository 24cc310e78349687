use opsdeck_auth::prelude::{Ability, AuthError};
use opsdeck_errors::prelude::*;
use opsdeck_store::prelude::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{0:?}")]
pub struct ProvisionError(pub Box<ErrorObj>);

impl ProvisionError {
    pub fn into_inner(self) -> ErrorObj {
        *self.0
    }

    /// All collected violations in one shot; the user message is the
    /// violation messages joined, so a bare client still sees why.
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        let joined = violations
            .iter()
            .map(|v| v.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        ProvisionError(Box::new(
            ErrorBuilder::new(codes::SCHEMA_VALIDATION)
                .user_msg(joined)
                .violations(violations)
                .build(),
        ))
    }

    pub fn invalid_payload() -> Self {
        ProvisionError(Box::new(
            ErrorBuilder::new(codes::BAD_REQUEST)
                .user_msg("Invalid payload")
                .build(),
        ))
    }

    pub fn forbidden(ability: Ability) -> Self {
        AuthError::forbidden(ability).into()
    }
}

impl From<AuthError> for ProvisionError {
    fn from(err: AuthError) -> Self {
        ProvisionError(Box::new(err.into_inner()))
    }
}

impl From<StoreError> for ProvisionError {
    fn from(err: StoreError) -> Self {
        ProvisionError(Box::new(err.into_inner()))
    }
}

impl From<ProvisionError> for ErrorObj {
    fn from(value: ProvisionError) -> Self {
        value.into_inner()
    }
}
