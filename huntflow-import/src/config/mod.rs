//! Import configuration
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment variables. CLI flags are applied on top by the caller.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::import::CheckpointPolicy;

pub const DEFAULT_BASE_URL: &str = "https://dev-100-api.huntflow.dev/";
pub const DEFAULT_CHECKPOINT_FILE: &str = "dump.json";
pub const DEFAULT_CURRENCY: &str = "рублей";

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "huntflow-import.toml";

pub const ENV_TOKEN: &str = "HUNTFLOW_TOKEN";
pub const ENV_BASE_URL: &str = "HUNTFLOW_BASE_URL";
pub const ENV_CHECKPOINT: &str = "HUNTFLOW_CHECKPOINT";

/// Everything the import run needs besides the token and the workbook
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportConfig {
    /// Root URL of the recruiting platform API
    pub base_url: String,
    /// Checkpoint file, relative to the working directory
    pub checkpoint_path: PathBuf,
    /// Directory the resume patterns are resolved against
    pub resume_root: PathBuf,
    /// Directory under `resume_root` holding an opening's resumes
    pub resume_dir_pattern: String,
    /// File name pattern for a candidate's resume
    pub resume_file_pattern: String,
    /// Currency label used when the compensation has none
    pub default_currency: String,
    pub checkpoint_policy: CheckpointPolicy,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            checkpoint_path: PathBuf::from(DEFAULT_CHECKPOINT_FILE),
            resume_root: PathBuf::from("."),
            resume_dir_pattern: "{opening}".to_string(),
            resume_file_pattern: "{candidate}*".to_string(),
            default_currency: DEFAULT_CURRENCY.to_string(),
            checkpoint_policy: CheckpointPolicy::default(),
        }
    }
}

impl ImportConfig {
    /// Load config from `explicit`, or from the first default location that exists
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_locations().into_iter().find(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        config.apply_env();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn default_locations() -> Vec<PathBuf> {
        let mut locations = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            locations.push(dir.join("huntflow-import").join("config.toml"));
        }
        locations
    }

    fn apply_env(&mut self) {
        if let Ok(url) = env::var(ENV_BASE_URL) {
            if !url.trim().is_empty() {
                self.base_url = url.trim().to_string();
            }
        }
        if let Ok(path) = env::var(ENV_CHECKPOINT) {
            if !path.trim().is_empty() {
                self.checkpoint_path = PathBuf::from(path.trim());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ImportConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.checkpoint_path, PathBuf::from("dump.json"));
        assert_eq!(config.default_currency, "рублей");
        assert_eq!(config.checkpoint_policy, CheckpointPolicy::SkipFailed);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ImportConfig::from_toml(
            r#"
            base_url = "https://api.huntflow.ru/"
            resume_root = "resumes"
            checkpoint_policy = "retry-failed"
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url, "https://api.huntflow.ru/");
        assert_eq!(config.resume_root, PathBuf::from("resumes"));
        assert_eq!(config.checkpoint_policy, CheckpointPolicy::RetryFailed);
        assert_eq!(config.resume_file_pattern, "{candidate}*");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(ImportConfig::from_toml("base_uri = \"typo\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_currency = \"EUR\"\n").unwrap();

        let config = ImportConfig::from_file(&path).unwrap();
        assert_eq!(config.default_currency, "EUR");

        let missing = ImportConfig::from_file(&dir.path().join("missing.toml"));
        assert!(missing.is_err());
    }
}
