//! Configuration file support for the backoffice.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (prefixed with `PLEDGEDESK_`, e.g., `PLEDGEDESK_DATABASE_URL`)
//! 3. Config file (~/.config/pledgedesk/config.toml or ./pledgedesk.toml)
//! 4. Built-in defaults
//!
//! The database URL defaults to `sqlite://~/.local/state/pledgedesk/backoffice.db`
//! on Linux (using the XDG state directory) if not explicitly configured.
//!
//! Example config file:
//! ```toml
//! [database]
//! url = "postgres://localhost/pledgedesk"  # optional, defaults to local sqlite
//!
//! [frontend]
//! base_url = "https://app.pledgedesk.dev"  # optional, this is the default
//! ```

use std::path::PathBuf;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;

/// Frontend base URL used when none is configured.
const DEFAULT_FRONTEND_BASE_URL: &str = "https://app.pledgedesk.dev";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Frontend configuration.
    pub frontend: FrontendConfig,
}

/// Database configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database connection URL.
    /// Supports sqlite:// and postgres:// schemes.
    /// Defaults to `sqlite://~/.local/state/pledgedesk/backoffice.db` if not specified.
    pub url: Option<String>,
}

/// Frontend configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// Base URL of the platform frontend, used to build repository links.
    pub base_url: Option<String>,
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/pledgedesk/config.toml)
    /// 3. Local config file (./pledgedesk.toml)
    /// 4. Environment variables with PLEDGEDESK_ prefix
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(proj_dirs) = ProjectDirs::from("", "", "pledgedesk") {
            let xdg_config = proj_dirs.config_dir().join("config.toml");
            if xdg_config.exists() {
                tracing::debug!("Loading config from {:?}", xdg_config);
                builder = builder.add_source(
                    File::from(xdg_config)
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        let local_config = PathBuf::from("pledgedesk.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./pledgedesk.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // e.g., PLEDGEDESK_DATABASE_URL -> database.url
        builder = builder.add_source(
            Environment::with_prefix("PLEDGEDESK")
                .separator("_")
                .try_parsing(true),
        );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Get the database URL, falling back to the default state directory path.
    ///
    /// The `mode=rwc` parameter enables read-write access and creates the
    /// file if it doesn't exist.
    pub fn database_url(&self) -> Option<String> {
        self.database.url.clone().or_else(|| {
            Self::default_state_dir().map(|state_dir| {
                let db_path = state_dir.join("backoffice.db");
                format!("sqlite://{}?mode=rwc", db_path.display())
            })
        })
    }

    /// Get the frontend base URL.
    pub fn frontend_base_url(&self) -> String {
        self.frontend
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_FRONTEND_BASE_URL.to_string())
    }

    /// Get the default state directory path.
    ///
    /// On Linux, this is `$XDG_STATE_HOME/pledgedesk` or `~/.local/state/pledgedesk`.
    /// On macOS/Windows, falls back to the data directory.
    pub fn default_state_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "pledgedesk").map(|dirs| {
            // state_dir() returns None on macOS/Windows, fall back to data_dir
            dirs.state_dir()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| dirs.data_dir().to_path_buf())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.database.url.is_none());
        assert!(config.frontend.base_url.is_none());
        assert_eq!(config.frontend_base_url(), DEFAULT_FRONTEND_BASE_URL);
    }

    #[test]
    fn test_config_parsing() {
        let toml_content = r#"
            [database]
            url = "sqlite:///tmp/test.db"

            [frontend]
            base_url = "https://staging.pledgedesk.dev"
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();

        let config: Config = settings.try_deserialize().unwrap();

        assert_eq!(
            config.database.url,
            Some("sqlite:///tmp/test.db".to_string())
        );
        assert_eq!(config.frontend_base_url(), "https://staging.pledgedesk.dev");
    }

    #[test]
    fn test_database_url_defaults_to_state_dir() {
        let config = Config::default();
        let db_url = config.database_url();

        assert!(db_url.is_some());
        let url = db_url.unwrap();
        assert!(url.starts_with("sqlite://"));
        assert!(url.contains("backoffice.db"));
        assert!(url.ends_with("?mode=rwc"));
    }

    #[test]
    fn test_database_url_respects_configured_value() {
        let toml_content = r#"
            [database]
            url = "postgres://localhost/pledgedesk"
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();

        let config: Config = settings.try_deserialize().unwrap();
        assert_eq!(
            config.database_url(),
            Some("postgres://localhost/pledgedesk".to_string())
        );
    }

    #[test]
    fn test_config_unknown_fields_ignored() {
        let toml_content = r#"
            [frontend]
            base_url = "https://app.pledgedesk.dev"
            unknown_field = "should be ignored"
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();

        let config: Config = settings.try_deserialize().unwrap();
        assert_eq!(config.frontend_base_url(), "https://app.pledgedesk.dev");
    }
}
