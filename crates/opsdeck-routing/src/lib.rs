pub mod prelude;
pub mod registry;
pub mod resolver;
