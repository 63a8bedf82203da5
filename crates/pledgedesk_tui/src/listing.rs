//! Listing presenter: streams query results into display state.
//!
//! A refresh runs as a background unit that streams rows over the app event
//! channel, tagged with a generation number. Starting a new refresh aborts
//! the in-flight one and bumps the generation, so the displayed table only
//! ever reflects the latest refresh (exclusive-latest). The row-key lookup
//! is built inside the unit and installed wholesale on completion, never
//! mutated in place, so the dispatcher can never observe a half-built table.

use std::collections::HashMap;

use futures::StreamExt;
use pledgedesk::repository::{self, ListingFilter, ListingRow};
use sea_orm::DatabaseConnection;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::event::AppEvent;

/// Display rows and the row-key lookup behind the repositories table.
#[derive(Debug, Default)]
pub struct ListingState {
    rows: Vec<ListingRow>,
    lookup: HashMap<String, ListingRow>,
    /// Whether a refresh is currently streaming.
    pub loading: bool,
}

impl ListingState {
    /// Clear the display for a new refresh. The lookup keeps serving the
    /// previous rows until the new one is installed.
    pub fn begin_refresh(&mut self) {
        self.rows.clear();
        self.loading = true;
    }

    /// Append a streamed row. Rows arrive in query order.
    pub fn push_row(&mut self, row: ListingRow) {
        self.rows.push(row);
    }

    /// Replace the lookup wholesale with the one the finished refresh built.
    pub fn install_lookup(&mut self, lookup: HashMap<String, ListingRow>) {
        self.lookup = lookup;
        self.loading = false;
    }

    pub fn rows(&self) -> &[ListingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row key at a display index.
    pub fn key_at(&self, index: usize) -> Option<String> {
        self.rows.get(index).map(ListingRow::row_key)
    }

    /// Resolve a row key against the installed lookup.
    pub fn resolve(&self, key: &str) -> Option<&ListingRow> {
        self.lookup.get(key)
    }
}

/// Owns the in-flight refresh unit and its generation counter.
#[derive(Debug, Default)]
pub struct Refresher {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl Refresher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an event belongs to the latest refresh.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Start a refresh, cancelling any still-streaming predecessor.
    pub fn start(
        &mut self,
        db: DatabaseConnection,
        filter: ListingFilter,
        events: UnboundedSender<AppEvent>,
    ) -> u64 {
        self.generation += 1;
        let generation = self.generation;

        if let Some(task) = self.task.take() {
            task.abort();
        }

        self.task = Some(tokio::spawn(run_refresh(db, filter, generation, events)));
        generation
    }
}

/// Stream the listing query, forwarding rows and building the new lookup.
async fn run_refresh(
    db: DatabaseConnection,
    filter: ListingFilter,
    generation: u64,
    events: UnboundedSender<AppEvent>,
) {
    let stream = match repository::stream_rows(&db, &filter).await {
        Ok(stream) => stream,
        Err(error) => {
            let _ = events.send(AppEvent::RefreshFailed {
                generation,
                error: error.to_string(),
            });
            return;
        }
    };
    futures::pin_mut!(stream);

    let mut lookup = HashMap::new();
    while let Some(next) = stream.next().await {
        match next {
            Ok(row) => {
                lookup.insert(row.row_key(), row.clone());
                if events.send(AppEvent::Row { generation, row }).is_err() {
                    return;
                }
            }
            Err(error) => {
                let _ = events.send(AppEvent::RefreshFailed {
                    generation,
                    error: error.to_string(),
                });
                return;
            }
        }
    }

    let _ = events.send(AppEvent::RefreshComplete { generation, lookup });
}

#[cfg(test)]
mod tests {
    use pledgedesk::Platform;
    use uuid::Uuid;

    use super::*;

    fn row(name: &str) -> ListingRow {
        ListingRow {
            id: Uuid::new_v4(),
            name: name.to_string(),
            platform: Platform::GitHub,
            badge_label: "Fund".to_string(),
            external_organization_name: "acme-gh".to_string(),
            organization_slug: "acme".to_string(),
        }
    }

    fn lookup_of(rows: &[ListingRow]) -> HashMap<String, ListingRow> {
        rows.iter().map(|r| (r.row_key(), r.clone())).collect()
    }

    #[test]
    fn test_rows_append_in_order() {
        let mut state = ListingState::default();
        state.begin_refresh();
        state.push_row(row("alpha"));
        state.push_row(row("beta"));

        let names: Vec<&str> = state.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["alpha", "beta"]);
        assert!(state.loading);
    }

    #[test]
    fn test_begin_refresh_clears_display_but_keeps_lookup() {
        let mut state = ListingState::default();
        let old = row("old");
        state.push_row(old.clone());
        state.install_lookup(lookup_of(&[old.clone()]));

        state.begin_refresh();

        assert!(state.is_empty());
        // The dispatcher still resolves against the previous lookup mid-refresh
        assert!(state.resolve(&old.row_key()).is_some());
    }

    #[test]
    fn test_install_lookup_replaces_wholesale() {
        let mut state = ListingState::default();
        let old = row("old");
        state.install_lookup(lookup_of(&[old.clone()]));

        let new = row("new");
        state.install_lookup(lookup_of(&[new.clone()]));

        // Stale keys from the previous refresh must not resolve
        assert!(state.resolve(&old.row_key()).is_none());
        assert!(state.resolve(&new.row_key()).is_some());
        assert!(!state.loading);
    }

    #[test]
    fn test_key_at_follows_display_order() {
        let mut state = ListingState::default();
        let first = row("first");
        state.push_row(first.clone());
        state.push_row(row("second"));

        assert_eq!(state.key_at(0), Some(first.row_key()));
        assert_eq!(state.key_at(2), None);
    }
}
