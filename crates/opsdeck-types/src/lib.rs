pub mod id;
pub mod prelude;
pub mod role;
pub mod tenant;
pub mod time;
