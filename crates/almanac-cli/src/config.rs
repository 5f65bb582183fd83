//! Optional TOML configuration.
//!
//! ```toml
//! seed_layout = "ranges"
//! parallel = true
//! allow_overlaps = false
//! log_filter = "almanac_kernel=debug"
//! ```
//!
//! Every key is optional. Command-line flags win over file values.

use almanac_kernel::SeedLayout;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "almanac.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid toml at {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub seed_layout: SeedLayout,
    pub parallel: bool,
    pub allow_overlaps: bool,
    pub log_filter: Option<String>,
}

impl Config {
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::ParseToml {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load `explicit` if given, else the default file if it exists, else
    /// defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_PATH);
                if !fallback.exists() {
                    return Ok(Self::default());
                }
                fallback
            }
        };
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text, &path)
    }
}
