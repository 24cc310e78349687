use opsdeck_auth::prelude::{Ability, AuthError};
use opsdeck_errors::prelude::*;
use opsdeck_model::prelude::ResourceKind;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{0:?}")]
pub struct StoreError(pub Box<ErrorObj>);

impl StoreError {
    pub fn into_inner(self) -> ErrorObj {
        *self.0
    }

    /// Uniform absence: missing id, wrong kind and wrong tenant are
    /// indistinguishable on purpose, so callers cannot probe for the
    /// existence of another tenant's resources.
    pub fn not_found(kind: ResourceKind, id: &str) -> Self {
        StoreError(Box::new(
            ErrorBuilder::new(codes::STORAGE_NOT_FOUND)
                .user_msg(format!("Resource not found: {}/{}", kind.as_str(), id))
                .build(),
        ))
    }

    pub fn unknown_tenant(tenant: &str) -> Self {
        StoreError(Box::new(
            ErrorBuilder::new(codes::STORAGE_NOT_FOUND)
                .user_msg("Resource not found")
                .dev_msg(format!("tenant not registered: {tenant}"))
                .build(),
        ))
    }

    pub fn forbidden(ability: Ability) -> Self {
        AuthError::forbidden(ability).into()
    }
}

impl From<AuthError> for StoreError {
    fn from(err: AuthError) -> Self {
        StoreError(Box::new(err.into_inner()))
    }
}

impl From<StoreError> for ErrorObj {
    fn from(value: StoreError) -> Self {
        value.into_inner()
    }
}
