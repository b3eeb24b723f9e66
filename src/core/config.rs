//! Configuration file and cross-platform paths.
//!
//! Config location:
//! - Linux: ~/.config/trialmap/config.json
//! - Windows: %APPDATA%\trialmap\config.json
//! - MacOS: ~/Library/Application Support/trialmap/config.json

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::filter::{FilterDimension, FilterState};

/// Environment variable overriding the dataset path.
pub const DATASET_ENV: &str = "TRIALMAP_DATASET";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    config_dir: PathBuf,
}

impl AppPaths {
    pub fn new() -> Result<Self, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::with_base(base))
    }

    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: base.into().join("trialmap"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Dataset loaded when no `--data` flag or env override is given.
    pub dataset: Option<PathBuf>,
    /// Sponsors pre-selected on startup.
    pub sponsors: Vec<String>,
    /// Product names pre-selected on startup.
    pub names: Vec<String>,
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let cfg = Self::from_json_str(&text)?;
        info!("config loaded from {}", path.display());
        Ok(cfg)
    }

    /// Dataset path by precedence: explicit flag, then env value, then config.
    /// `None` means the built-in sample.
    pub fn resolve_dataset(&self, flag: Option<&Path>, env: Option<&str>) -> Option<PathBuf> {
        if let Some(p) = flag {
            return Some(p.to_path_buf());
        }
        if let Some(e) = env.filter(|e| !e.trim().is_empty()) {
            return Some(PathBuf::from(e));
        }
        self.dataset.clone()
    }

    /// Startup filter selections.
    pub fn initial_filter(&self) -> FilterState {
        let mut state = FilterState::default();
        state.set(FilterDimension::Sponsor, self.sponsors.iter().cloned());
        state.set(FilterDimension::Name, self.names.iter().cloned());
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_lives_under_app_dir() {
        let paths = AppPaths::with_base("/tmp/cfg");
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/cfg/trialmap/config.json"));
    }

    #[test]
    fn missing_config_file_gives_defaults() {
        let cfg = AppConfig::load(Path::new("/definitely/not/here/config.json")).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert!(cfg.initial_filter().is_unrestricted());
    }

    #[test]
    fn partial_config_parses() {
        let cfg = AppConfig::from_json_str(r#"{"sponsors": ["Moderna"]}"#).unwrap();
        assert!(cfg.dataset.is_none());
        let f = cfg.initial_filter();
        assert!(f.is_selected(FilterDimension::Sponsor, "Moderna"));
        assert!(!f.is_restricted(FilterDimension::Name));

        assert!(matches!(
            AppConfig::from_json_str("[1, 2"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn dataset_precedence() {
        let cfg = AppConfig {
            dataset: Some(PathBuf::from("from_config.json")),
            ..AppConfig::default()
        };
        assert_eq!(
            cfg.resolve_dataset(Some(Path::new("flag.json")), Some("env.json")),
            Some(PathBuf::from("flag.json"))
        );
        assert_eq!(
            cfg.resolve_dataset(None, Some("env.json")),
            Some(PathBuf::from("env.json"))
        );
        assert_eq!(
            cfg.resolve_dataset(None, Some("  ")),
            Some(PathBuf::from("from_config.json"))
        );
        assert_eq!(AppConfig::default().resolve_dataset(None, None), None);
    }
}
