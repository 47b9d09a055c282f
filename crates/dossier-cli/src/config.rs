//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use dossier_llm::BackendConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Extraction backend configuration
    #[serde(default)]
    pub backend: BackendConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Directory scanned by --list-schemas
    #[serde(default = "default_schemas_dir")]
    pub schemas_dir: PathBuf,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".dossier").join("config.toml"))
    }

    /// Load configuration from the given path, the default path, or fall
    /// back to defaults when no file exists.
    ///
    /// An explicitly requested path that does not exist is an error; a
    /// missing default file is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Self::read(path)
            }
            None => {
                let default = Self::default_path()?;
                if default.exists() {
                    Self::read(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config
            .backend
            .validate()
            .map_err(CliError::Config)?;
        Ok(config)
    }

}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            schemas_dir: default_schemas_dir(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_schemas_dir() -> PathBuf {
    PathBuf::from("schemas")
}
