pub mod actions;
pub mod errors;
pub mod memory;
pub mod prelude;
pub mod seed;
pub mod spi;
