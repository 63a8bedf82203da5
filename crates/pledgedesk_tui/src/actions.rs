//! Action units for the selected repository row.
//!
//! Link-opening happens inline; rebadge and resync each spawn their own
//! independent unit of work. Units that enqueue jobs flush the queue and
//! only then report back, so success is never announced before the jobs are
//! durably persisted. A flush failure is surfaced as an error notification.

use std::sync::Arc;

use pledgedesk::repository::ListingRow;
use pledgedesk::worker::JobQueue;
use pledgedesk::{badge, sync};
use sea_orm::DatabaseConnection;
use tokio::sync::mpsc::UnboundedSender;

use crate::event::AppEvent;

/// Open the repository on its external platform in the default browser.
pub fn open_external(row: &ListingRow) {
    open_url(&row.external_url());
}

/// Open the repository page on the platform frontend in the default browser.
pub fn open_frontend(row: &ListingRow, frontend_base_url: &str) {
    open_url(&row.frontend_url(frontend_base_url));
}

fn open_url(url: &str) {
    // No validation that the link resolves; the browser is on its own
    if let Err(error) = open::that(url) {
        tracing::warn!(%url, %error, "failed to open browser");
    }
}

/// Spawn the rebadge unit for one repository.
pub fn spawn_rebadge(
    db: DatabaseConnection,
    queue: Arc<JobQueue>,
    row: &ListingRow,
    events: UnboundedSender<AppEvent>,
) {
    let repository_id = row.id;
    let name = row.name.clone();

    tokio::spawn(async move {
        let result = async {
            let queued = badge::rebadge_repository(&db, &queue, repository_id).await?;
            queue.flush().await?;
            anyhow::Ok(queued)
        }
        .await;

        let event = match result {
            Ok(queued) => AppEvent::Notice {
                title: "Repository issues rebadged".to_string(),
                body: format!("{queued} issues were queued to be rebadged."),
                is_error: false,
            },
            Err(error) => AppEvent::Notice {
                title: format!("Rebadging {name} issues failed"),
                body: error.to_string(),
                is_error: true,
            },
        };
        let _ = events.send(event);
    });
}

/// Spawn the resync unit for one repository.
pub fn spawn_resync(
    queue: Arc<JobQueue>,
    row: &ListingRow,
    events: UnboundedSender<AppEvent>,
) {
    let repository_id = row.id;
    let name = row.name.clone();

    tokio::spawn(async move {
        sync::enqueue_sync(&queue, repository_id);

        let event = match queue.flush().await {
            Ok(_) => AppEvent::Notice {
                title: format!("{name} has been queued to be resynced"),
                body: "Repository sync enqueued.".to_string(),
                is_error: false,
            },
            Err(error) => AppEvent::Notice {
                title: format!("Resyncing {name} issues failed"),
                body: error.to_string(),
                is_error: true,
            },
        };
        let _ = events.send(event);
    });
}
