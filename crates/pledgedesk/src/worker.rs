//! Job queue with a durable flush gate.
//!
//! Jobs are enqueued into a process-local pending batch (fire-and-forget) and
//! handed to the backing [`JobStore`] only on [`JobQueue::flush`]. Flushing
//! resolves once the batch is durably persisted - durable *enqueue*, not
//! execution; running the jobs belongs to the worker runtime, which is a
//! separate service. Callers that report success to a user must flush first,
//! otherwise the report can race ahead of persistence.

mod store;

pub use store::{DatabaseJobStore, JobStore, MemoryJobStore};

use std::sync::{Arc, Mutex, MutexGuard};

use sea_orm::DbErr;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while persisting enqueued jobs.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// Database error from sea-orm.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// The backing store rejected the batch.
    #[error("Job store rejected the batch: {0}")]
    Store(String),
}

/// Result type alias for job queue operations.
pub type Result<T> = std::result::Result<T, WorkerError>;

/// A job waiting to be handed off to the backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Name the worker runtime dispatches on,
    /// e.g. `github.badge.update_on_issue`.
    pub name: String,
    /// JSON parameters for the job.
    pub payload: Value,
}

/// Process-local job queue backed by a durable store.
pub struct JobQueue {
    pending: Mutex<Vec<Job>>,
    store: Arc<dyn JobStore>,
}

impl JobQueue {
    /// Create a queue flushing into the given store.
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self {
            pending: Mutex::new(Vec::new()),
            store,
        }
    }

    fn pending(&self) -> MutexGuard<'_, Vec<Job>> {
        // A poisoned lock only means a panicked task; the batch itself is
        // still valid.
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append a job to the pending batch.
    ///
    /// Fire-and-forget: nothing is durable until [`flush`](Self::flush).
    pub fn enqueue(&self, name: impl Into<String>, payload: Value) {
        let job = Job {
            name: name.into(),
            payload,
        };
        tracing::debug!(job = %job.name, "enqueued job");
        self.pending().push(job);
    }

    /// Number of jobs waiting for the next flush.
    pub fn pending_len(&self) -> usize {
        self.pending().len()
    }

    /// Hand every job enqueued so far to the backing store.
    ///
    /// Resolves only once the batch is durably persisted, and returns the
    /// number of jobs flushed. On failure the batch is not re-queued; the
    /// error is the caller's to surface.
    pub async fn flush(&self) -> Result<usize> {
        let batch = std::mem::take(&mut *self.pending());
        if batch.is_empty() {
            return Ok(0);
        }

        let count = batch.len();
        tracing::debug!(count, "flushing enqueued jobs");
        self.store.persist(batch).await?;
        Ok(count)
    }
}
