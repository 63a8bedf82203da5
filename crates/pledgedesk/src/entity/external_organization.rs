//! ExternalOrganization entity - an organization as known on the external
//! platform.
//!
//! External organizations mirror what the sync service sees on GitHub. They
//! are optionally linked 1:1 to an internal [`organization`](super::organization)
//! through the nullable `organization_id` back-reference; an external
//! organization without a link has not been claimed by any tenant yet.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::entity::platform::Platform;

/// ExternalOrganization model - mirrors the platform-side organization.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "external_organizations")]
pub struct Model {
    /// Internal UUID primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Platform this organization lives on.
    pub platform: Platform,

    /// Login/name on the external platform.
    pub name: String,

    /// Avatar image URL from the external platform.
    pub avatar_url: String,

    /// Whether this is a personal account rather than a real organization.
    pub is_personal: bool,

    /// Back-reference to the linked internal organization, if claimed.
    pub organization_id: Option<Uuid>,

    /// When this record was created by the sync service.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// An external organization may be linked to one internal organization.
    #[sea_orm(
        belongs_to = "super::organization::Entity",
        from = "Column::OrganizationId",
        to = "super::organization::Column::Id"
    )]
    Organization,
    /// An external organization has many repositories.
    #[sea_orm(has_many = "super::repository::Entity")]
    Repositories,
}

impl Related<super::organization::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organization.def()
    }
}

impl Related<super::repository::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Repositories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
