//! Backing stores for flushed jobs.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use crate::entity::job;

use super::{Job, Result, WorkerError};

/// Durable backing store for flushed jobs.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Persist a batch of jobs. Resolving means the whole batch is durable.
    async fn persist(&self, jobs: Vec<Job>) -> Result<()>;
}

/// Store that persists jobs into the `jobs` table, where the worker runtime
/// picks them up.
pub struct DatabaseJobStore {
    db: DatabaseConnection,
}

impl DatabaseJobStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl JobStore for DatabaseJobStore {
    async fn persist(&self, jobs: Vec<Job>) -> Result<()> {
        if jobs.is_empty() {
            return Ok(());
        }

        let enqueued_at = Utc::now().fixed_offset();
        let models = jobs.into_iter().map(|j| job::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(j.name),
            payload: Set(j.payload),
            enqueued_at: Set(enqueued_at),
        });

        job::Entity::insert_many(models).exec(&self.db).await?;
        Ok(())
    }
}

/// In-memory store for tests and dry runs.
#[derive(Default)]
pub struct MemoryJobStore {
    jobs: Mutex<Vec<Job>>,
    fail_with: Mutex<Option<String>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every job persisted so far, in persistence order.
    pub fn jobs(&self) -> Vec<Job> {
        self.jobs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Make the next `persist` call fail with the given message.
    pub fn fail_next(&self, message: impl Into<String>) {
        *self
            .fail_with
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(message.into());
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn persist(&self, jobs: Vec<Job>) -> Result<()> {
        if let Some(message) = self
            .fail_with
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
        {
            return Err(WorkerError::Store(message));
        }

        self.jobs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .extend(jobs);
        Ok(())
    }
}
