use sea_orm::DbErr;
use thiserror::Error;

/// Errors that can occur during repository listing operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sea-orm.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Result type alias for repository listing operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
