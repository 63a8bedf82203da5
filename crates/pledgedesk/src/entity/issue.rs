//! Issue entity - an issue under a repository, tracked for badge embedding.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::entity::platform::Platform;

/// Issue model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "issues")]
pub struct Model {
    /// Internal UUID primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning repository.
    pub repository_id: Uuid,

    /// Platform this issue lives on.
    pub platform: Platform,

    /// Issue number on the platform.
    pub number: i64,

    /// Issue title.
    pub title: String,

    /// Whether the funding badge has been granted to this issue.
    #[sea_orm(default_value = false)]
    pub has_badge: bool,

    /// Whether the badge markup is currently present in the issue body.
    /// Maintained by the sync service; can lag behind `has_badge` when the
    /// body was edited on the platform.
    #[sea_orm(default_value = false)]
    pub badge_currently_embedded: bool,

    /// When this record was created by the sync service.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// An issue belongs to a repository.
    #[sea_orm(
        belongs_to = "super::repository::Entity",
        from = "Column::RepositoryId",
        to = "super::repository::Column::Id"
    )]
    Repository,
}

impl Related<super::repository::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Repository.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
