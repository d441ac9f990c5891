pub use crate::errors::JobliteError;

pub type Result<T, E = JobliteError> = std::result::Result<T, E>;
