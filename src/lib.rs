pub mod conf;
pub mod errors;
pub mod pkg;
pub mod prelude;
