//! Integration tests for the job queue, the rebadge workflow, and the issue
//! service against an in-memory SQLite database.

#![cfg(all(feature = "sqlite", feature = "migrate"))]

use std::sync::Arc;

use chrono::Utc;
use pledgedesk::entity::platform::Platform;
use pledgedesk::entity::{external_organization, issue, job, organization, repository};
use pledgedesk::worker::{DatabaseJobStore, JobQueue};
use pledgedesk::{badge, connect_and_migrate, issue as issue_service, sync};
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

async fn setup_test_db() -> DatabaseConnection {
    connect_and_migrate("sqlite::memory:")
        .await
        .expect("Failed to create test database")
}

/// Seed one claimed organization chain and return the repository id.
async fn seed_repository(db: &DatabaseConnection) -> Uuid {
    let now = Utc::now().fixed_offset();

    let organization_id = Uuid::new_v4();
    organization::Entity::insert(organization::ActiveModel {
        id: Set(organization_id),
        slug: Set("acme".to_string()),
        name: Set("Acme".to_string()),
        avatar_url: Set(None),
        created_at: Set(now),
    })
    .exec(db)
    .await
    .expect("organization should insert");

    let external_organization_id = Uuid::new_v4();
    external_organization::Entity::insert(external_organization::ActiveModel {
        id: Set(external_organization_id),
        platform: Set(Platform::GitHub),
        name: Set("acme-gh".to_string()),
        avatar_url: Set("https://avatars.example.com/acme-gh".to_string()),
        is_personal: Set(false),
        organization_id: Set(Some(organization_id)),
        created_at: Set(now),
    })
    .exec(db)
    .await
    .expect("external organization should insert");

    let repository_id = Uuid::new_v4();
    repository::Entity::insert(repository::ActiveModel {
        id: Set(repository_id),
        platform: Set(Platform::GitHub),
        external_organization_id: Set(external_organization_id),
        name: Set("widgets".to_string()),
        description: Set(None),
        badge_label: Set("Fund".to_string()),
        is_fork: Set(false),
        is_archived: Set(false),
        is_disabled: Set(false),
        created_at: Set(now),
    })
    .exec(db)
    .await
    .expect("repository should insert");

    repository_id
}

async fn seed_issue(
    db: &DatabaseConnection,
    repository_id: Uuid,
    number: i64,
    has_badge: bool,
    badge_currently_embedded: bool,
) -> Uuid {
    let id = Uuid::new_v4();
    issue::Entity::insert(issue::ActiveModel {
        id: Set(id),
        repository_id: Set(repository_id),
        platform: Set(Platform::GitHub),
        number: Set(number),
        title: Set(format!("Issue #{}", number)),
        has_badge: Set(has_badge),
        badge_currently_embedded: Set(badge_currently_embedded),
        created_at: Set(Utc::now().fixed_offset()),
    })
    .exec(db)
    .await
    .expect("issue should insert");
    id
}

// ─── Issue service ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_by_repository_filters_on_badge_and_orders_by_number() {
    let db = setup_test_db().await;
    let repository_id = seed_repository(&db).await;
    seed_issue(&db, repository_id, 7, true, true).await;
    seed_issue(&db, repository_id, 3, true, false).await;
    seed_issue(&db, repository_id, 5, false, false).await;

    let (issues, count) = issue_service::list_by_repository(&db, &[repository_id], true)
        .await
        .expect("issue listing should succeed");

    assert_eq!(count, 2);
    let numbers: Vec<i64> = issues.iter().map(|i| i.number).collect();
    assert_eq!(numbers, [3, 7]);
}

#[tokio::test]
async fn test_list_by_repository_ignores_other_repositories() {
    let db = setup_test_db().await;
    let repository_id = seed_repository(&db).await;
    seed_issue(&db, repository_id, 1, true, true).await;

    let (issues, count) = issue_service::list_by_repository(&db, &[Uuid::new_v4()], true)
        .await
        .expect("issue listing should succeed");

    assert!(issues.is_empty());
    assert_eq!(count, 0);
}

// ─── Job queue with database store ───────────────────────────────────────────

#[tokio::test]
async fn test_flush_persists_jobs_into_the_jobs_table() {
    let db = setup_test_db().await;
    let queue = JobQueue::new(Arc::new(DatabaseJobStore::new(db.clone())));

    queue.enqueue("github.repo.sync_issues", serde_json::json!({"n": 1}));
    queue.enqueue("github.repo.sync_metadata", serde_json::json!({"n": 2}));

    // Nothing is durable before the flush
    let stored = job::Entity::find().all(&db).await.expect("job query");
    assert!(stored.is_empty());

    let flushed = queue.flush().await.expect("flush should succeed");
    assert_eq!(flushed, 2);

    let mut stored = job::Entity::find().all(&db).await.expect("job query");
    stored.sort_by_key(|j| j.payload["n"].as_i64());
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].name, "github.repo.sync_issues");
    assert_eq!(stored[1].name, "github.repo.sync_metadata");
}

// ─── Rebadge workflow ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_rebadge_queues_only_embedded_badges() {
    let db = setup_test_db().await;
    let repository_id = seed_repository(&db).await;

    // Badge granted and embedded in the body: rebadged
    let embedded = seed_issue(&db, repository_id, 1, true, true).await;
    // Badge granted but the body no longer contains it: skipped
    seed_issue(&db, repository_id, 2, true, false).await;
    // No badge at all: never listed
    seed_issue(&db, repository_id, 3, false, false).await;

    let queue = JobQueue::new(Arc::new(DatabaseJobStore::new(db.clone())));
    let queued = badge::rebadge_repository(&db, &queue, repository_id)
        .await
        .expect("rebadge should succeed");
    assert_eq!(queued, 1);

    let flushed = queue.flush().await.expect("flush should succeed");
    assert_eq!(flushed, 1);

    let stored = job::Entity::find().all(&db).await.expect("job query");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, badge::UPDATE_BADGE_JOB);
    assert_eq!(stored[0].payload["issue_id"], serde_json::json!(embedded));
}

#[tokio::test]
async fn test_rebadge_on_repository_without_issues_queues_nothing() {
    let db = setup_test_db().await;
    let repository_id = seed_repository(&db).await;
    let queue = JobQueue::new(Arc::new(DatabaseJobStore::new(db.clone())));

    let queued = badge::rebadge_repository(&db, &queue, repository_id)
        .await
        .expect("rebadge should succeed");
    assert_eq!(queued, 0);

    let flushed = queue.flush().await.expect("flush should succeed");
    assert_eq!(flushed, 0);
}

// ─── Resync workflow ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_resync_flushes_through_database_store() {
    let db = setup_test_db().await;
    let repository_id = seed_repository(&db).await;
    let queue = JobQueue::new(Arc::new(DatabaseJobStore::new(db.clone())));

    sync::enqueue_sync(&queue, repository_id);
    let flushed = queue.flush().await.expect("flush should succeed");
    assert_eq!(flushed, 2);

    let stored = job::Entity::find().all(&db).await.expect("job query");
    assert_eq!(stored.len(), 2);
    assert!(stored
        .iter()
        .all(|j| j.payload["repository_id"] == serde_json::json!(repository_id)));
}
