//! Configuration for the host runtime.
//!
//! An optional `rulang.toml` next to the program can pin the serve port
//! and the default log filter. Command-line flags always win over the
//! file; the file wins over the program's own `server` declaration only
//! for the port, because deployments override source.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HostError, Result};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "rulang.toml";

/// Host runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Port override for `rulang serve`.
    #[serde(default)]
    pub port: Option<u16>,

    /// Default tracing filter, e.g. `"debug"` or `"ruhost=debug"`.
    #[serde(default)]
    pub log: Option<String>,
}

impl Config {
    /// Loads `rulang.toml` from the working directory, or defaults when
    /// the file does not exist.
    pub fn load() -> Result<Config> {
        let path = Path::new(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load_from_path(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Loads configuration from an explicit path.
    pub fn load_from_path(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| HostError::Config(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, None);
        assert_eq!(config.log, None);
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str("port = 8080\nlog = \"debug\"").unwrap();
        assert_eq!(config.port, Some(8080));
        assert_eq!(config.log.as_deref(), Some("debug"));
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str("port = 3000").unwrap();
        assert_eq!(config.port, Some(3000));
        assert_eq!(config.log, None);
    }

    #[test]
    fn test_unknown_path_is_an_error() {
        let err = Config::load_from_path(Path::new("/nonexistent/rulang.toml")).unwrap_err();
        assert!(matches!(err, HostError::Io(_)));
    }
}
