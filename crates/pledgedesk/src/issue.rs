//! Issue service operations consumed by the backoffice workflows.

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use thiserror::Error;
use uuid::Uuid;

use crate::entity::issue::{Column, Entity as Issue, Model};

/// Errors that can occur during issue operations.
#[derive(Debug, Error)]
pub enum IssueError {
    /// Database error from sea-orm.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Result type alias for issue operations.
pub type Result<T> = std::result::Result<T, IssueError>;

/// List issues for the given repositories, narrowed by badge grant status.
///
/// Returns the matching issues ordered by issue number, together with the
/// match count.
pub async fn list_by_repository(
    db: &DatabaseConnection,
    repository_ids: &[Uuid],
    have_badge: bool,
) -> Result<(Vec<Model>, u64)> {
    let issues = Issue::find()
        .filter(Column::RepositoryId.is_in(repository_ids.iter().copied()))
        .filter(Column::HasBadge.eq(have_badge))
        .order_by_asc(Column::Number)
        .all(db)
        .await?;

    let count = issues.len() as u64;
    Ok((issues, count))
}
