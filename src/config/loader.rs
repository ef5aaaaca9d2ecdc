use std::path::{Path, PathBuf};

use crate::error::{AppResult, ConfigError};

use super::types::ConfigFile;

/// Supported config file formats, keyed by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Formats in discovery order.
    const ALL: [ConfigFormat; 2] = [ConfigFormat::Toml, ConfigFormat::Json];

    const fn default_file_name(self) -> &'static str {
        match self {
            ConfigFormat::Toml => "callbench.toml",
            ConfigFormat::Json => "callbench.json",
        }
    }

    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("json") => Ok(ConfigFormat::Json),
            Some(ext) => Err(ConfigError::UnsupportedExtension {
                ext: ext.to_owned(),
            }),
            None => Err(ConfigError::MissingExtension),
        }
    }

    fn parse(self, path: &Path, content: &str) -> Result<ConfigFile, ConfigError> {
        match self {
            ConfigFormat::Toml => toml::from_str(content).map_err(|err| ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            }),
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|err| ConfigError::ParseJson {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }
}

/// Loads the file given by `--config`, or the first default file found in
/// the working directory.
///
/// # Errors
///
/// Returns an error when the config file cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> AppResult<Option<ConfigFile>> {
    let path = match path {
        Some(path) => Some(PathBuf::from(path)),
        None => discover_config(Path::new(".")),
    };
    match path {
        Some(path) => Ok(Some(load_config_file(&path)?)),
        None => Ok(None),
    }
}

/// First default config file present in `dir`; TOML wins over JSON.
pub(crate) fn discover_config(dir: &Path) -> Option<PathBuf> {
    ConfigFormat::ALL
        .iter()
        .map(|format| dir.join(format.default_file_name()))
        .find(|candidate| candidate.is_file())
}

pub(crate) fn load_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|err| ConfigError::ReadConfig {
        path: path.to_path_buf(),
        source: err,
    })?;
    format.parse(path, &content)
}
