pub mod cost;
pub mod errors;
pub mod payload;
pub mod pipeline;
pub mod prelude;
pub mod synth;
pub mod validate;
