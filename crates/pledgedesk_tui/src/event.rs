//! Events emitted by background units toward the UI loop.

use std::collections::HashMap;

use pledgedesk::ListingRow;

/// Message from a background unit to the single-threaded UI loop.
#[derive(Debug)]
pub enum AppEvent {
    /// One listing row streamed in from a refresh.
    Row { generation: u64, row: ListingRow },
    /// A refresh finished; install the freshly built lookup wholesale.
    RefreshComplete {
        generation: u64,
        lookup: HashMap<String, ListingRow>,
    },
    /// A refresh failed mid-stream. Rows already rendered stay visible.
    RefreshFailed { generation: u64, error: String },
    /// A user-visible notification from an action unit.
    Notice {
        title: String,
        body: String,
        is_error: bool,
    },
}
