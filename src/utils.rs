use crate::config::ConfigError;
use std::path::PathBuf;

const CONFIG_DIR_NAME: &str = "tidetemp";
const CONFIG_FILE_NAME: &str = "config.toml";

pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .ok_or(ConfigError::ConfigDirResolution)
        .map(|p| p.join(CONFIG_DIR_NAME))
}

pub fn default_config_file() -> Result<PathBuf, ConfigError> {
    get_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}
