use crate::errors::repository::RepositoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input rejected before (or instead of) a committed write.
    #[error("{0}")]
    Validation(String),

    /// Anything raised by storage while staging or committing.
    #[error("{0}")]
    Repo(#[from] RepositoryError),
}

impl ServiceError {
    pub fn missing_fields() -> Self {
        ServiceError::Validation("Missing required fields".to_string())
    }
}
