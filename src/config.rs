//! Runtime configuration.
//!
//! Values are resolved in this order, later sources winning:
//!
//! 1. Built-in defaults (the public KHOA endpoint, its demo key and station `DT_0005`).
//! 2. A TOML file, either given explicitly or found at `<config dir>/tidetemp/config.toml`.
//! 3. The environment variables `TIDETEMP_ENDPOINT`, `TIDETEMP_SERVICE_KEY` and `TIDETEMP_OBS_CODE`.
//!
//! ```toml
//! [api]
//! obs_code = "DT_0005"
//!
//! [chart]
//! width = 1200
//! height = 700
//! ```

use crate::chart::ChartStyle;
use crate::utils::default_config_file;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "http://www.khoa.go.kr/api/oceangrid/tideObsTemp/search.do";
pub const DEFAULT_SERVICE_KEY: &str = "VkKixcDPfAWm7PV5tBnoSA==";
pub const DEFAULT_OBS_CODE: &str = "DT_0005";

pub const ENV_ENDPOINT: &str = "TIDETEMP_ENDPOINT";
pub const ENV_SERVICE_KEY: &str = "TIDETEMP_SERVICE_KEY";
pub const ENV_OBS_CODE: &str = "TIDETEMP_OBS_CODE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to determine configuration directory")]
    ConfigDirResolution,

    #[error("Failed to read config file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file '{0}'")]
    Parse(PathBuf, #[source] toml::de::Error),
}

/// Where and how to query the observation API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub endpoint: String,
    pub service_key: String,
    /// The single observation station queried.
    pub obs_code: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            service_key: DEFAULT_SERVICE_KEY.to_string(),
            obs_code: DEFAULT_OBS_CODE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub chart: ChartStyle,
}

impl Config {
    /// Loads the configuration from defaults, a TOML file and the environment.
    ///
    /// An explicit `path` must exist. Without one, the default location is used
    /// only if a file is present there.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`] if the file cannot be
    /// used.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_file() {
                Ok(default_path) if default_path.is_file() => Self::from_file(&default_path)?,
                Ok(default_path) => {
                    debug!("No config file at {}, using defaults", default_path.display());
                    Self::default()
                }
                Err(e) => {
                    debug!("{}, using defaults", e);
                    Self::default()
                }
            },
        };
        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        let config =
            toml::from_str(&text).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Applies `TIDETEMP_*` overrides looked up through `lookup`. Empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(endpoint) = get(ENV_ENDPOINT) {
            self.api.endpoint = endpoint;
        }
        if let Some(service_key) = get(ENV_SERVICE_KEY) {
            self.api.service_key = service_key;
        }
        if let Some(obs_code) = get(ENV_OBS_CODE) {
            self.api.obs_code = obs_code;
        }
        self
    }
}
