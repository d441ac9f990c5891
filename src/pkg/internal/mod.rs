pub mod adaptors;
pub mod sql;
pub mod store;
