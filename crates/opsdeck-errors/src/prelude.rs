pub use crate::codes::{self, ErrorCode};
pub use crate::obj::{ErrorBuilder, ErrorObj, FieldViolation};
pub use crate::retry::RetryClass;
