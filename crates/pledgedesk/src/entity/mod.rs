//! SeaORM entity definitions for the backoffice database schema.

pub mod external_organization;
pub mod issue;
pub mod job;
pub mod organization;
pub mod platform;
pub mod prelude;
pub mod repository;
