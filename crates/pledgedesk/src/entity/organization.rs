//! Organization entity - the platform's own tenant.
//!
//! An organization is the internal account that receives funding. Its slug
//! is the path segment used to build frontend URLs. Rows are owned and
//! mutated by the account service; the backoffice only reads them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Organization model - the platform tenant.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "organizations")]
pub struct Model {
    /// Internal UUID primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// URL-safe slug, unique across all organizations.
    #[sea_orm(unique)]
    pub slug: String,

    /// Display name.
    pub name: String,

    /// Avatar image URL, if one has been set.
    pub avatar_url: Option<String>,

    /// When the organization was created on the platform.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// An organization can be linked from many external organizations.
    #[sea_orm(has_many = "super::external_organization::Entity")]
    ExternalOrganizations,
}

impl Related<super::external_organization::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExternalOrganizations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
