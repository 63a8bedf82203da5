//! Pledgedesk - core library for the funding platform backoffice.
//!
//! This crate holds the backoffice-facing services of the platform: the
//! repository listing with structured+fuzzy search, the issue and badge
//! workflows, the job queue with its durable flush gate, and the transaction
//! schema contracts exposed over the API.
//!
//! # Features
//!
//! - `migrate` - Enables database migration support. When enabled, you can use
//!   [`connect_and_migrate`] to automatically run migrations on connection.
//! - `sqlite` / `postgres` - Database backends (sqlite is the default).
//!
//! # Example
//!
//! ```ignore
//! use pledgedesk::{connect_and_migrate, repository, ListingFilter, SearchExpression};
//!
//! let db = connect_and_migrate("sqlite://backoffice.db?mode=rwc").await?;
//!
//! // List eligible repositories matching a search expression
//! let filter = ListingFilter {
//!     search: Some(SearchExpression::parse("org:acme wid")),
//!     organization_id: None,
//! };
//! let rows = repository::fetch_rows(&db, &filter).await?;
//! ```

pub mod badge;
pub mod db;
pub mod entity;
pub mod issue;
pub mod organization;
pub mod repository;
pub mod sync;
pub mod transaction;
pub mod worker;

#[cfg(feature = "migrate")]
pub mod migration;

pub use db::connect;
#[cfg(feature = "migrate")]
pub use db::connect_and_migrate;
pub use entity::prelude::*;
pub use repository::{ListingFilter, ListingRow, RepositoryError, SearchExpression};
pub use worker::{DatabaseJobStore, JobQueue, JobStore, MemoryJobStore, WorkerError};
