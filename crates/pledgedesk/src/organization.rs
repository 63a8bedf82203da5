//! Organization lookup operations.

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use crate::entity::organization::{Column, Entity as Organization, Model};

/// Find an organization by its slug.
pub async fn find_by_slug(db: &DatabaseConnection, slug: &str) -> Result<Option<Model>, DbErr> {
    Organization::find()
        .filter(Column::Slug.eq(slug))
        .one(db)
        .await
}
