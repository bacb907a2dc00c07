//! # kit-config
//!
//! Layered configuration loading for Kitlog using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`KITLOG_*` prefix, `__` as separator)
//! 2. Project-level `.kitlog/config.toml`
//! 3. User-level `~/.config/kitlog/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `KITLOG_DATABASE__PATH` -> `database.path`,
//! `KITLOG_GENERAL__DEFAULT_LIMIT` -> `general.default_limit`, etc. The
//! `__` (double underscore) separates nested config sections.

mod database;
mod error;
mod general;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct KitConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl KitConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` — use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any source fails to parse or merge.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// This is the typical entry point for the CLI and tests.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any source fails to parse or merge.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or layer
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".kitlog/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("KITLOG_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("kitlog").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_when_nothing_configured() {
        figment::Jail::expect_with(|_jail| {
            let config: KitConfig = KitConfig::figment().extract().expect("config");
            assert_eq!(config.database.path, None);
            assert_eq!(config.general.default_limit, 50);
            Ok(())
        });
    }

    #[test]
    fn env_vars_override_toml() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir(".kitlog")?;
            jail.create_file(
                ".kitlog/config.toml",
                r#"
                [database]
                path = "/from/toml.db"

                [general]
                default_limit = 10
                "#,
            )?;
            jail.set_env("KITLOG_DATABASE__PATH", "/from/env.db");

            let config: KitConfig = KitConfig::figment().extract().expect("config");
            assert_eq!(config.database.path, Some(PathBuf::from("/from/env.db")));
            assert_eq!(config.general.default_limit, 10);
            Ok(())
        });
    }

    #[test]
    fn nested_env_mapping_uses_double_underscore() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("KITLOG_GENERAL__DEFAULT_LIMIT", "7");
            let config: KitConfig = KitConfig::figment().extract().expect("config");
            assert_eq!(config.general.default_limit, 7);
            Ok(())
        });
    }
}
