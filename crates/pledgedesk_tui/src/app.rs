//! The repositories screen: state, event loop, and command dispatch.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use pledgedesk::repository::{ListingFilter, SearchExpression};
use pledgedesk::worker::JobQueue;
use ratatui::widgets::TableState;
use ratatui::DefaultTerminal;
use sea_orm::DatabaseConnection;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

use crate::actions;
use crate::command::{decode_key, Command};
use crate::event::AppEvent;
use crate::listing::{ListingState, Refresher};
use crate::ui;

/// How long a notification stays on screen.
const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Redraw cadence while idle, so notifications expire without input.
const IDLE_TICK: Duration = Duration::from_millis(250);

/// Organization context when the listing is scoped.
#[derive(Debug, Clone)]
pub struct OrganizationScope {
    pub id: Uuid,
    pub slug: String,
}

/// Search bar state.
#[derive(Debug, Default)]
pub struct SearchBar {
    /// Whether the bar is visible and capturing input.
    pub open: bool,
    /// Text being typed.
    pub input: String,
    /// The submitted expression currently narrowing the listing.
    pub query: Option<String>,
}

/// A transient toast shown to the operator.
#[derive(Debug)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub is_error: bool,
    shown_at: Instant,
}

impl Notification {
    fn expired(&self) -> bool {
        self.shown_at.elapsed() >= NOTIFICATION_TIMEOUT
    }
}

/// The repositories screen.
pub struct App {
    db: DatabaseConnection,
    queue: Arc<JobQueue>,
    frontend_base_url: String,
    scope: Option<OrganizationScope>,

    pub listing: ListingState,
    pub table_state: TableState,
    pub search: SearchBar,
    pub notifications: Vec<Notification>,

    refresher: Refresher,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    should_quit: bool,
}

impl App {
    pub fn new(
        db: DatabaseConnection,
        queue: Arc<JobQueue>,
        frontend_base_url: String,
        scope: Option<OrganizationScope>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            db,
            queue,
            frontend_base_url,
            scope,
            listing: ListingState::default(),
            table_state: TableState::default(),
            search: SearchBar::default(),
            notifications: Vec::new(),
            refresher: Refresher::new(),
            events_tx,
            events_rx,
            should_quit: false,
        }
    }

    pub fn scope(&self) -> Option<&OrganizationScope> {
        self.scope.as_ref()
    }

    /// Drive the screen until the operator quits.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        let mut input = EventStream::new();
        self.start_refresh();

        while !self.should_quit {
            self.notifications.retain(|n| !n.expired());
            terminal.draw(|frame| ui::draw(frame, &mut self))?;

            tokio::select! {
                maybe_event = input.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            if let Some(command) =
                                decode_key(&key, self.search.open, self.scope.is_some())
                            {
                                self.dispatch(command);
                            }
                        }
                        Some(Ok(_)) => {}
                        Some(Err(error)) => return Err(error.into()),
                        None => break,
                    }
                }
                Some(event) = self.events_rx.recv() => {
                    self.apply_event(event);
                }
                _ = tokio::time::sleep(IDLE_TICK) => {}
            }
        }

        Ok(())
    }

    /// Apply one command. This is the single dispatch point for every
    /// operator interaction.
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::Quit => self.should_quit = true,
            Command::Refresh => self.start_refresh(),
            Command::Back => {
                if self.scope.take().is_some() {
                    self.start_refresh();
                }
            }
            Command::ToggleSearch => {
                self.search.open = !self.search.open;
                if self.search.open {
                    self.search.input = self.search.query.clone().unwrap_or_default();
                }
            }
            Command::CursorUp => self.move_cursor(-1),
            Command::CursorDown => self.move_cursor(1),
            Command::OpenExternal => {
                if let Some(row) = self.selected_row() {
                    actions::open_external(row);
                }
            }
            Command::OpenFrontend => {
                if let Some(row) = self.selected_row() {
                    actions::open_frontend(row, &self.frontend_base_url);
                }
            }
            Command::RebadgeIssues => {
                if let Some(row) = self.selected_row().cloned() {
                    self.notify(
                        format!("Rebadging {} issues...", row.name),
                        "The repository issues will be marked to be rebadged.".to_string(),
                        false,
                    );
                    actions::spawn_rebadge(
                        self.db.clone(),
                        Arc::clone(&self.queue),
                        &row,
                        self.events_tx.clone(),
                    );
                }
            }
            Command::ResyncIssues => {
                if let Some(row) = self.selected_row().cloned() {
                    self.notify(
                        format!("Resyncing {} issues...", row.name),
                        "The repository issues will be resynced.".to_string(),
                        false,
                    );
                    actions::spawn_resync(Arc::clone(&self.queue), &row, self.events_tx.clone());
                }
            }
            Command::SearchInput(c) => self.search.input.push(c),
            Command::SearchBackspace => {
                self.search.input.pop();
            }
            Command::SearchSubmit => {
                let input = self.search.input.trim().to_string();
                self.search.query = if input.is_empty() { None } else { Some(input) };
                self.search.open = false;
                self.start_refresh();
            }
            Command::SearchCancel => {
                self.search.input.clear();
                self.search.query = None;
                self.search.open = false;
                self.start_refresh();
            }
        }
    }

    /// Apply one background event. Events from a superseded refresh are
    /// dropped so only the latest refresh's rows are ever rendered.
    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Row { generation, row } => {
                if self.refresher.is_current(generation) {
                    self.listing.push_row(row);
                }
            }
            AppEvent::RefreshComplete { generation, lookup } => {
                if self.refresher.is_current(generation) {
                    self.listing.install_lookup(lookup);
                    self.clamp_cursor();
                }
            }
            AppEvent::RefreshFailed { generation, error } => {
                if self.refresher.is_current(generation) {
                    self.listing.loading = false;
                    self.notify("Refresh failed".to_string(), error, true);
                }
            }
            AppEvent::Notice {
                title,
                body,
                is_error,
            } => self.notify(title, body, is_error),
        }
    }

    /// Start a refresh with the current search and scope. Supersedes any
    /// refresh still streaming.
    pub fn start_refresh(&mut self) {
        self.listing.begin_refresh();
        self.table_state.select(None);

        let filter = ListingFilter {
            search: self
                .search
                .query
                .as_deref()
                .map(SearchExpression::parse),
            organization_id: self.scope.as_ref().map(|s| s.id),
        };
        self.refresher
            .start(self.db.clone(), filter, self.events_tx.clone());
    }

    /// The record behind the current cursor, if any row is selected.
    /// Resolution goes through the row-key lookup, never the display list.
    fn selected_row(&self) -> Option<&pledgedesk::ListingRow> {
        let index = self.table_state.selected()?;
        let key = self.listing.key_at(index)?;
        self.listing.resolve(&key)
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.listing.is_empty() {
            self.table_state.select(None);
            return;
        }
        let last = self.listing.len() - 1;
        let next = match self.table_state.selected() {
            Some(current) => current.saturating_add_signed(delta).min(last),
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    fn clamp_cursor(&mut self) {
        if self.listing.is_empty() {
            self.table_state.select(None);
        } else if self.table_state.selected().is_none() {
            self.table_state.select(Some(0));
        } else if let Some(selected) = self.table_state.selected() {
            self.table_state
                .select(Some(selected.min(self.listing.len() - 1)));
        }
    }

    fn notify(&mut self, title: String, body: String, is_error: bool) {
        self.notifications.push(Notification {
            title,
            body,
            is_error,
            shown_at: Instant::now(),
        });
    }
}
