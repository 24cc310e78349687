use crate::ability::Ability;
use opsdeck_errors::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{0:?}")]
pub struct AuthError(pub Box<ErrorObj>);

impl AuthError {
    pub fn into_inner(self) -> ErrorObj {
        *self.0
    }

    pub fn forbidden(ability: Ability) -> Self {
        AuthError(Box::new(
            ErrorBuilder::new(codes::AUTH_FORBIDDEN)
                .user_msg("Forbidden")
                .dev_msg(format!("missing ability: {}", ability.as_str()))
                .build(),
        ))
    }
}
