pub mod cluster;
pub mod common;
pub mod database;
pub mod gateway;
pub mod prelude;
pub mod resource;
pub mod validate;
