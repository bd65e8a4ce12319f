// TOML config adapter - Optional settings file

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::domain::errors::*;

/// File consulted when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "reframe.toml";

/// Keys accepted under the `[reframe]` table; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub workers: Option<usize>,
    pub method: Option<String>,
    pub quality: Option<String>,
    pub crop_position: Option<String>,
    pub zoom_width: Option<u32>,
    pub zoom_height: Option<u32>,
    pub ffmpeg: Option<PathBuf>,
    pub ffprobe: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub max_attempts: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    reframe: FileConfig,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse a TOML document
    pub fn parse(toml_content: &str) -> Result<FileConfig, DomainError> {
        let document: ConfigDocument = toml::from_str(toml_content)
            .map_err(|e| DomainError::BadArgs(format!("Failed to parse TOML config: {}", e)))?;
        Ok(document.reframe)
    }

    /// Load an explicitly named config file; it must exist
    pub fn load(file_path: &Path) -> Result<FileConfig, DomainError> {
        let content = std::fs::read_to_string(file_path).map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to read config file {}: {}",
                file_path.display(),
                e
            ))
        })?;
        info!("Loading configuration from: {}", file_path.display());
        Self::parse(&content)
    }

    /// Load the explicit file if given, else `reframe.toml` when present, else defaults
    pub fn discover(explicit: Option<&Path>) -> Result<FileConfig, DomainError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::load(fallback)
                } else {
                    Ok(FileConfig::default())
                }
            }
        }
    }
}
