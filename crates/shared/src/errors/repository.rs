use sqlx::Error as SqlxError;
use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(SqlxError),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Custom: {0}")]
    Custom(String),
}

impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        let kind = match &err {
            SqlxError::Database(db_err) => Some((db_err.kind(), db_err.message().to_string())),
            _ => None,
        };

        match kind {
            Some((ErrorKind::UniqueViolation, msg)) => RepositoryError::Conflict(msg),
            Some((ErrorKind::ForeignKeyViolation, msg)) => RepositoryError::ForeignKey(msg),
            _ => RepositoryError::Sqlx(err),
        }
    }
}
