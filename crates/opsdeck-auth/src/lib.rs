pub mod ability;
pub mod errors;
pub mod prelude;
