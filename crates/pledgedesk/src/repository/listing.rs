//! Listing query construction and streaming execution.
//!
//! The listing joins repositories to their external organization and the
//! external organization to its claimed internal organization. Both joins are
//! inner joins, so repositories under an unclaimed external organization
//! never appear. Forked, archived, and disabled repositories are excluded
//! unconditionally, and results are ordered by external-organization name,
//! then repository name.

use futures::Stream;
use sea_orm::sea_query::{Expr, Func, IntoColumnRef, SimpleExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Select,
};
use uuid::Uuid;

use crate::entity::external_organization;
use crate::entity::organization;
use crate::entity::platform::Platform;
use crate::entity::repository;

use super::errors::{RepositoryError, Result};
use super::search::SearchExpression;

/// Narrowing applied on top of the base listing query.
#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    /// Parsed search expression, if the operator typed one.
    pub search: Option<SearchExpression>,
    /// Restrict to repositories whose external organization is claimed by
    /// this internal organization.
    pub organization_id: Option<Uuid>,
}

impl ListingFilter {
    /// Filter scoped to a single internal organization.
    pub fn scoped(organization_id: Uuid) -> Self {
        Self {
            search: None,
            organization_id: Some(organization_id),
        }
    }
}

/// One row of the repository listing, with its organization columns joined in.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct ListingRow {
    /// Repository UUID.
    pub id: Uuid,
    /// Repository name.
    pub name: String,
    /// Platform the repository lives on.
    pub platform: Platform,
    /// Funding badge label.
    pub badge_label: String,
    /// Name of the owning external organization.
    pub external_organization_name: String,
    /// Slug of the claimed internal organization.
    pub organization_slug: String,
}

impl ListingRow {
    /// Stable key identifying this row across a refresh.
    pub fn row_key(&self) -> String {
        self.id.to_string()
    }

    /// URL of the repository on its external platform.
    pub fn external_url(&self) -> String {
        format!(
            "https://github.com/{}/{}",
            self.external_organization_name, self.name
        )
    }

    /// URL of the repository page on the platform frontend.
    pub fn frontend_url(&self, base_url: &str) -> String {
        format!(
            "{}/{}/{}",
            base_url.trim_end_matches('/'),
            self.organization_slug,
            self.name
        )
    }
}

/// Case-insensitive substring containment, portable across backends.
fn contains_ci<C>(col: C, needle: &str) -> SimpleExpr
where
    C: IntoColumnRef,
{
    let pattern = format!("%{}%", needle.to_lowercase());
    Expr::expr(Func::lower(Expr::col(col))).like(pattern)
}

/// Build the listing query for the given filter.
///
/// The query is deterministic: for any filter, rows come back ordered by
/// (external-organization name, repository name) ascending.
pub fn listing_query(filter: &ListingFilter) -> Select<repository::Entity> {
    let mut query = repository::Entity::find()
        .join(
            JoinType::InnerJoin,
            repository::Relation::ExternalOrganization.def(),
        )
        .join(
            JoinType::InnerJoin,
            external_organization::Relation::Organization.def(),
        )
        .filter(repository::Column::IsFork.eq(false))
        .filter(repository::Column::IsArchived.eq(false))
        .filter(repository::Column::IsDisabled.eq(false))
        .order_by_asc(external_organization::Column::Name)
        .order_by_asc(repository::Column::Name)
        .select_only()
        .column(repository::Column::Id)
        .column(repository::Column::Name)
        .column(repository::Column::Platform)
        .column(repository::Column::BadgeLabel)
        .column_as(
            external_organization::Column::Name,
            "external_organization_name",
        )
        .column_as(organization::Column::Slug, "organization_slug");

    if let Some(organization_id) = filter.organization_id {
        query = query.filter(external_organization::Column::OrganizationId.eq(organization_id));
    }

    if let Some(search) = &filter.search {
        for slug in search.slug_clauses() {
            query = query.filter(contains_ci(
                (organization::Entity, organization::Column::Slug),
                slug,
            ));
        }
        if let Some(name) = search.name_clause() {
            query = query.filter(contains_ci(
                (repository::Entity, repository::Column::Name),
                name,
            ));
        }
    }

    query
}

/// Execute the listing query as a lazy stream of rows.
///
/// The stream is finite and single-pass; a new refresh builds a new stream.
pub async fn stream_rows<'a>(
    db: &'a DatabaseConnection,
    filter: &ListingFilter,
) -> Result<impl Stream<Item = std::result::Result<ListingRow, DbErr>> + Send + 'a> {
    tracing::debug!(?filter, "streaming repository listing");
    let rows = listing_query(filter)
        .into_model::<ListingRow>()
        .stream(db)
        .await?;
    Ok(rows)
}

/// Execute the listing query and collect all rows.
pub async fn fetch_rows(db: &DatabaseConnection, filter: &ListingFilter) -> Result<Vec<ListingRow>> {
    listing_query(filter)
        .into_model::<ListingRow>()
        .all(db)
        .await
        .map_err(RepositoryError::from)
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, QueryTrait};

    use super::*;

    fn sql(filter: &ListingFilter) -> String {
        listing_query(filter).build(DbBackend::Sqlite).to_string()
    }

    #[test]
    fn test_base_query_joins_and_filters() {
        let query = sql(&ListingFilter::default());

        assert!(query.contains("INNER JOIN \"external_organizations\""));
        assert!(query.contains("INNER JOIN \"organizations\""));
        assert!(query.contains("\"repositories\".\"is_fork\" ="));
        assert!(query.contains("\"repositories\".\"is_archived\" ="));
        assert!(query.contains("\"repositories\".\"is_disabled\" ="));
    }

    #[test]
    fn test_base_query_orders_by_org_then_name() {
        let query = sql(&ListingFilter::default());

        let org_order = query
            .find("\"external_organizations\".\"name\" ASC")
            .expect("org name ordering present");
        let name_order = query
            .find("\"repositories\".\"name\" ASC")
            .expect("repo name ordering present");
        assert!(org_order < name_order, "org ordering must come first");
    }

    #[test]
    fn test_scope_filter_restricts_external_organization() {
        let organization_id = Uuid::new_v4();
        let query = sql(&ListingFilter::scoped(organization_id));

        assert!(query.contains("\"external_organizations\".\"organization_id\" ="));
    }

    #[test]
    fn test_search_lowercases_patterns() {
        let filter = ListingFilter {
            search: Some(SearchExpression::parse("org:ACME WidGets")),
            organization_id: None,
        };
        let query = sql(&filter);

        assert!(query.contains("LIKE '%acme%'"));
        assert!(query.contains("LIKE '%widgets%'"));
        assert!(query.contains("LOWER"));
    }

    #[test]
    fn test_empty_org_clause_stays_in_query() {
        let filter = ListingFilter {
            search: Some(SearchExpression::parse("org:")),
            organization_id: None,
        };
        let query = sql(&filter);

        assert!(query.contains("LIKE '%%'"));
    }
}
