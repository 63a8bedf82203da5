//! Re-exports of all entities under their conventional names.

pub use super::external_organization::Entity as ExternalOrganization;
pub use super::issue::Entity as Issue;
pub use super::job::Entity as Job;
pub use super::organization::Entity as Organization;
pub use super::platform::Platform;
pub use super::repository::Entity as Repository;
