//! Job entity - the durable backing store the job queue flushes into.
//!
//! Rows are consumed and deleted by the worker runtime, which is a separate
//! service; this crate only inserts them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Job model - a durably enqueued unit of background work.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "jobs")]
pub struct Model {
    /// Internal UUID primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Name the worker runtime dispatches on.
    pub name: String,

    /// JSON parameters for the job.
    #[sea_orm(column_type = "Json")]
    pub payload: Json,

    /// When the job was handed to the store.
    pub enqueued_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
