//! Optional TOML settings for the converter.
//!
//! The file is located through `--config <path>` or the `SQUAREWAVE_CONFIG` environment
//! variable. Every key is optional; command-line flags override file values.
//!
//! ```toml
//! [transform]
//! mode = "threshold"
//! threshold = 0.1
//!
//! [inspect]
//! width = 1200
//! height = 600
//! show = true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::transform::{DEFAULT_THRESHOLD, DecisionRule};

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV_VAR: &str = "SQUAREWAVE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid config at {path}: threshold must be a finite number")]
    Threshold { path: PathBuf },
}

/// Which transform variant a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransformMode {
    /// Map samples to the recording's own max/min by sign.
    Extremes,
    /// Normalize, threshold and emit fixed levels.
    #[default]
    Threshold,
}

/// Config keys: `mode`, `threshold`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransformSettings {
    #[serde(default)]
    pub mode: TransformMode,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for TransformSettings {
    fn default() -> Self {
        Self {
            mode: TransformMode::default(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl TransformSettings {
    pub fn decision_rule(&self) -> DecisionRule {
        match self.mode {
            TransformMode::Extremes => DecisionRule::ZeroCrossing,
            TransformMode::Threshold => DecisionRule::Threshold(self.threshold),
        }
    }
}

/// Config keys: `width`, `height`, `show`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InspectSettings {
    #[serde(default = "default_inspect_width")]
    pub width: u32,
    #[serde(default = "default_inspect_height")]
    pub height: u32,
    /// Open the rendered image and wait for the user before exiting.
    #[serde(default = "default_true")]
    pub show: bool,
}

impl Default for InspectSettings {
    fn default() -> Self {
        Self {
            width: default_inspect_width(),
            height: default_inspect_height(),
            show: true,
        }
    }
}

/// All settings that can live in the config file.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub transform: TransformSettings,
    #[serde(default)]
    pub inspect: InspectSettings,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_inspect_width() -> u32 {
    1200
}

fn default_inspect_height() -> u32 {
    600
}

fn default_true() -> bool {
    true
}

/// Load settings from an explicit path, else from `SQUAREWAVE_CONFIG`, else defaults.
pub fn load_or_default(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    if let Some(path) = explicit {
        return load_from(path);
    }
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) if !path.is_empty() => load_from(Path::new(&path)),
        _ => Ok(Settings::default()),
    }
}

/// Load settings from `path`. A missing file is an error.
pub fn load_from(path: &Path) -> Result<Settings, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: Settings = toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;
    if !settings.transform.threshold.is_finite() {
        return Err(ConfigError::Threshold {
            path: path.to_path_buf(),
        });
    }
    Ok(settings)
}
