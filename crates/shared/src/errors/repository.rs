use sqlx::Error as SqlxError;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(#[from] SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unique constraint violated")]
    AlreadyExists,

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Custom: {0}")]
    Custom(String),
}

impl RepositoryError {
    /// Maps constraint violations reported by Postgres onto the matching
    /// variant, leaving every other driver error wrapped as `Sqlx`.
    pub fn from_sqlx(err: SqlxError) -> Self {
        if let SqlxError::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                warn!(
                    "⚠️ Unique violation on {}: {}",
                    db_err.constraint().unwrap_or("unknown constraint"),
                    db_err.message()
                );
                return RepositoryError::AlreadyExists;
            }
            if db_err.is_foreign_key_violation() {
                return RepositoryError::ForeignKey(db_err.message().to_string());
            }
        }
        RepositoryError::Sqlx(err)
    }
}
