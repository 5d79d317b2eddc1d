use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::ClientConfig;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "AGENDA_CONFIG";

/// Config file picked up from the working directory when nothing else is given
pub const DEFAULT_CONFIG_FILE: &str = "agenda.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Where the config comes from, and whether it must exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named by `--config` or `$AGENDA_CONFIG`; missing is an error
    Explicit(PathBuf),
    /// `./agenda.toml`; missing means defaults
    Default(PathBuf),
}

/// Pick the config file: `--config`, then `$AGENDA_CONFIG`, then `agenda.toml` in `cwd`.
pub fn locate_config(explicit: Option<&Path>, env: Option<OsString>, cwd: &Path) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }
    match env.filter(|v| !v.is_empty()) {
        Some(value) => ConfigSource::Explicit(PathBuf::from(value)),
        None => ConfigSource::Default(cwd.join(DEFAULT_CONFIG_FILE)),
    }
}

/// Read and parse a config file.
pub fn read_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load config from `source`, falling back to defaults when the default file is absent.
pub fn load_config(source: &ConfigSource) -> Result<ClientConfig, ConfigError> {
    match source {
        ConfigSource::Explicit(path) => read_config(path),
        ConfigSource::Default(path) if !path.exists() => Ok(ClientConfig::default()),
        ConfigSource::Default(path) => read_config(path),
    }
}

/// Resolve and load the config for this process.
pub fn load_process_config(explicit: Option<&Path>) -> Result<ClientConfig, ConfigError> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let source = locate_config(explicit, std::env::var_os(CONFIG_ENV), &cwd);
    load_config(&source)
}
