/// Errors surfaced to the calling layer, which maps each kind to a response
/// status. Store failures outside the three known kinds pass through opaque.
#[derive(thiserror::Error, Debug)]
pub enum JobliteError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("duplicate: {0}")]
    Duplicate(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl JobliteError {
    /// Classifies a store failure raised by an insert, surfacing unique key
    /// violations as `Duplicate` with the given message.
    pub fn on_insert(err: sqlx::Error, message: impl Into<String>) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                JobliteError::Duplicate(message.into())
            }
            _ => JobliteError::Database(err),
        }
    }
}
