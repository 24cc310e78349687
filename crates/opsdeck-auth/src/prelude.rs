pub use crate::ability::{can, Ability};
pub use crate::errors::AuthError;
