//! Rebadge workflow: re-enqueue badge updates for a repository's issues.

use sea_orm::DatabaseConnection;
use serde_json::json;
use uuid::Uuid;

use crate::issue;
use crate::worker::JobQueue;

/// Job executed by the worker runtime to refresh the badge on one issue.
pub const UPDATE_BADGE_JOB: &str = "github.badge.update_on_issue";

/// Queue a badge update for every issue of the repository whose badge is
/// currently embedded in the issue body.
///
/// Issues that carry the badge grant but whose body no longer contains the
/// badge markup are skipped. Returns the number of jobs queued; flushing the
/// queue is the caller's responsibility.
pub async fn rebadge_repository(
    db: &DatabaseConnection,
    queue: &JobQueue,
    repository_id: Uuid,
) -> issue::Result<usize> {
    let (issues, _) = issue::list_by_repository(db, &[repository_id], true).await?;

    let mut queued = 0;
    for issue in issues {
        if !issue.badge_currently_embedded {
            continue;
        }

        queue.enqueue(UPDATE_BADGE_JOB, json!({ "issue_id": issue.id }));
        queued += 1;
    }

    tracing::debug!(%repository_id, queued, "queued badge updates");
    Ok(queued)
}
