//! Platform enum for the external source-control platform.
//!
//! Only GitHub is integrated today; the enum keeps the column type-safe and
//! leaves room for further platforms without a schema change.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// External platforms a repository or organization can originate from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// GitHub (github.com)
    #[sea_orm(string_value = "github")]
    GitHub,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::GitHub => write!(f, "github"),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "github" => Ok(Platform::GitHub),
            _ => Err(format!("Unknown platform: {}", s)),
        }
    }
}
