//! External sync operations: enqueue repository re-sync jobs.
//!
//! The sync service that executes these jobs owns the repository and
//! organization rows; this module only hands it work.

use serde_json::json;
use uuid::Uuid;

use crate::worker::JobQueue;

/// Job that re-fetches a repository's issues from the platform.
pub const SYNC_ISSUES_JOB: &str = "github.repo.sync_issues";

/// Job that re-fetches a repository's own metadata from the platform.
pub const SYNC_METADATA_JOB: &str = "github.repo.sync_metadata";

/// Enqueue the jobs that re-sync a repository from its platform.
///
/// How many jobs a sync fans out into is an implementation detail; callers
/// only flush the queue afterwards.
pub fn enqueue_sync(queue: &JobQueue, repository_id: Uuid) {
    queue.enqueue(SYNC_ISSUES_JOB, json!({ "repository_id": repository_id }));
    queue.enqueue(SYNC_METADATA_JOB, json!({ "repository_id": repository_id }));
    tracing::debug!(%repository_id, "queued repository sync");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::worker::MemoryJobStore;

    #[tokio::test]
    async fn test_enqueue_sync_queues_both_jobs() {
        let store = Arc::new(MemoryJobStore::new());
        let queue = JobQueue::new(store.clone());
        let repository_id = Uuid::new_v4();

        enqueue_sync(&queue, repository_id);
        let flushed = queue.flush().await.expect("flush should succeed");

        assert_eq!(flushed, 2);
        let jobs = store.jobs();
        assert_eq!(jobs[0].name, SYNC_ISSUES_JOB);
        assert_eq!(jobs[1].name, SYNC_METADATA_JOB);
        assert_eq!(
            jobs[0].payload["repository_id"],
            serde_json::json!(repository_id)
        );
    }
}
