pub mod codes;
pub mod obj;
pub mod prelude;
pub mod retry;
