//! Database location configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the libSQL database file. `None` means use the default
    /// location under the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl DatabaseConfig {
    /// Resolve the effective database path.
    ///
    /// Falls back to `<data_dir>/kitlog/kitlog.db`, or `./kitlog.db` when
    /// no platform data directory is available.
    #[must_use]
    pub fn resolve_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            dirs::data_dir().map_or_else(
                || PathBuf::from("kitlog.db"),
                |dir| dir.join("kitlog").join("kitlog.db"),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn explicit_path_wins() {
        let config = DatabaseConfig {
            path: Some(PathBuf::from("/tmp/custom.db")),
        };
        assert_eq!(config.resolve_path(), PathBuf::from("/tmp/custom.db"));
    }

    #[test]
    fn default_path_ends_with_kitlog_db() {
        let config = DatabaseConfig::default();
        let path = config.resolve_path();
        assert!(path.ends_with("kitlog.db"), "unexpected path: {path:?}");
    }
}
