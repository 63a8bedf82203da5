//! Initial migration to create the backoffice database schema.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        self.create_organizations(manager).await?;
        self.create_external_organizations(manager).await?;
        self.create_repositories(manager).await?;
        self.create_issues(manager).await?;
        self.create_jobs(manager).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Jobs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Issues::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Repositories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExternalOrganizations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Organizations::Table).to_owned())
            .await?;
        Ok(())
    }
}

impl Migration {
    async fn create_organizations(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Organizations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Organizations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Organizations::Slug).string().not_null())
                    .col(ColumnDef::new(Organizations::Name).string().not_null())
                    .col(ColumnDef::new(Organizations::AvatarUrl).text().null())
                    .col(
                        ColumnDef::new(Organizations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique constraint on slug
        manager
            .create_index(
                Index::create()
                    .name("idx_organizations_slug")
                    .table(Organizations::Table)
                    .col(Organizations::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_external_organizations(
        &self,
        manager: &SchemaManager<'_>,
    ) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ExternalOrganizations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExternalOrganizations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ExternalOrganizations::Platform)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExternalOrganizations::Name)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExternalOrganizations::AvatarUrl)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExternalOrganizations::IsPersonal)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ExternalOrganizations::OrganizationId)
                            .uuid()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ExternalOrganizations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique constraint on (platform, name)
        manager
            .create_index(
                Index::create()
                    .name("idx_external_orgs_platform_name")
                    .table(ExternalOrganizations::Table)
                    .col(ExternalOrganizations::Platform)
                    .col(ExternalOrganizations::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index on the internal-organization back-reference
        manager
            .create_index(
                Index::create()
                    .name("idx_external_orgs_organization_id")
                    .table(ExternalOrganizations::Table)
                    .col(ExternalOrganizations::OrganizationId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_repositories(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Repositories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Repositories::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Repositories::Platform).string().not_null())
                    .col(
                        ColumnDef::new(Repositories::ExternalOrganizationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Repositories::Name).string().not_null())
                    .col(ColumnDef::new(Repositories::Description).text().null())
                    .col(
                        ColumnDef::new(Repositories::BadgeLabel)
                            .string()
                            .not_null()
                            .default("Fund"),
                    )
                    .col(
                        ColumnDef::new(Repositories::IsFork)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Repositories::IsArchived)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Repositories::IsDisabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Repositories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique constraint on (external_organization_id, name)
        manager
            .create_index(
                Index::create()
                    .name("idx_repositories_org_name")
                    .table(Repositories::Table)
                    .col(Repositories::ExternalOrganizationId)
                    .col(Repositories::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index on name for fuzzy listing filters
        manager
            .create_index(
                Index::create()
                    .name("idx_repositories_name")
                    .table(Repositories::Table)
                    .col(Repositories::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_issues(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Issues::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Issues::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Issues::RepositoryId).uuid().not_null())
                    .col(ColumnDef::new(Issues::Platform).string().not_null())
                    .col(ColumnDef::new(Issues::Number).big_integer().not_null())
                    .col(ColumnDef::new(Issues::Title).text().not_null())
                    .col(
                        ColumnDef::new(Issues::HasBadge)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Issues::BadgeCurrentlyEmbedded)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Issues::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique constraint on (repository_id, number)
        manager
            .create_index(
                Index::create()
                    .name("idx_issues_repository_number")
                    .table(Issues::Table)
                    .col(Issues::RepositoryId)
                    .col(Issues::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index on (repository_id, has_badge) for the rebadge lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_issues_repository_badge")
                    .table(Issues::Table)
                    .col(Issues::RepositoryId)
                    .col(Issues::HasBadge)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_jobs(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Jobs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Jobs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Jobs::Name).string().not_null())
                    .col(
                        ColumnDef::new(Jobs::Payload)
                            .json()
                            .not_null()
                            .default(Expr::cust("'{}'")),
                    )
                    .col(
                        ColumnDef::new(Jobs::EnqueuedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index on enqueued_at so the worker runtime can drain in order
        manager
            .create_index(
                Index::create()
                    .name("idx_jobs_enqueued_at")
                    .table(Jobs::Table)
                    .col(Jobs::EnqueuedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
#[sea_orm(iden = "organizations")]
enum Organizations {
    Table,
    Id,
    Slug,
    Name,
    AvatarUrl,
    CreatedAt,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "external_organizations")]
enum ExternalOrganizations {
    Table,
    Id,
    Platform,
    Name,
    AvatarUrl,
    IsPersonal,
    OrganizationId,
    CreatedAt,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "repositories")]
enum Repositories {
    Table,
    Id,
    Platform,
    ExternalOrganizationId,
    Name,
    Description,
    BadgeLabel,
    IsFork,
    IsArchived,
    IsDisabled,
    CreatedAt,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "issues")]
enum Issues {
    Table,
    Id,
    RepositoryId,
    Platform,
    Number,
    Title,
    HasBadge,
    BadgeCurrentlyEmbedded,
    CreatedAt,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "jobs")]
enum Jobs {
    Table,
    Id,
    Name,
    Payload,
    EnqueuedAt,
}
