//! Repository entity - a source-control repository under an external
//! organization.
//!
//! Rows are owned and mutated by the external data-sync service; the
//! backoffice listing only reads them. Forked, archived, and disabled
//! repositories are never eligible for funding workflows.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::entity::platform::Platform;

/// Repository model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "repositories")]
pub struct Model {
    /// Internal UUID primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Platform this repository lives on.
    pub platform: Platform,

    /// Owning external organization.
    pub external_organization_id: Uuid,

    /// Repository name (URL-safe slug).
    pub name: String,

    /// Repository description.
    pub description: Option<String>,

    /// Label rendered on the funding badge embedded in issue bodies.
    #[sea_orm(default_value = "Fund")]
    pub badge_label: String,

    /// Whether this is a fork of another repository.
    #[sea_orm(default_value = false)]
    pub is_fork: bool,

    /// Whether the repository is archived (read-only) on the platform.
    #[sea_orm(default_value = false)]
    pub is_archived: bool,

    /// Whether funding has been disabled for this repository.
    #[sea_orm(default_value = false)]
    pub is_disabled: bool,

    /// When this record was created by the sync service.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A repository belongs to an external organization.
    #[sea_orm(
        belongs_to = "super::external_organization::Entity",
        from = "Column::ExternalOrganizationId",
        to = "super::external_organization::Column::Id"
    )]
    ExternalOrganization,
    /// A repository has many issues.
    #[sea_orm(has_many = "super::issue::Entity")]
    Issues,
}

impl Related<super::external_organization::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExternalOrganization.def()
    }
}

impl Related<super::issue::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Issues.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether the repository is eligible for funding workflows at all.
    pub fn is_eligible(&self) -> bool {
        !self.is_fork && !self.is_archived && !self.is_disabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_model(is_fork: bool, is_archived: bool, is_disabled: bool) -> Model {
        Model {
            id: Uuid::new_v4(),
            platform: Platform::GitHub,
            external_organization_id: Uuid::new_v4(),
            name: "widgets".to_string(),
            description: None,
            badge_label: "Fund".to_string(),
            is_fork,
            is_archived,
            is_disabled,
            created_at: Utc::now().fixed_offset(),
        }
    }

    #[test]
    fn test_is_eligible() {
        assert!(make_model(false, false, false).is_eligible());
        assert!(!make_model(true, false, false).is_eligible());
        assert!(!make_model(false, true, false).is_eligible());
        assert!(!make_model(false, false, true).is_eligible());
    }
}
