//! Locations of the trained artifacts loaded at startup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_encoders_path() -> PathBuf {
    PathBuf::from("label_encoders.json")
}

fn default_model_path() -> PathBuf {
    PathBuf::from("model.json")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtifactsConfig {
    /// JSON export of the fitted label encoders.
    #[serde(default = "default_encoders_path")]
    pub encoders_path: PathBuf,

    /// JSON export of the trained classifier.
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            encoders_path: default_encoders_path(),
            model_path: default_model_path(),
        }
    }
}

impl ArtifactsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_path("artifacts.encoders_path", &self.encoders_path)?;
        require_path("artifacts.model_path", &self.model_path)
    }

    /// Replace configured paths with explicit overrides, when given.
    #[must_use]
    pub fn with_overrides(mut self, encoders: Option<PathBuf>, model: Option<PathBuf>) -> Self {
        if let Some(path) = encoders {
            self.encoders_path = path;
        }
        if let Some(path) = model {
            self.model_path = path;
        }
        self
    }
}

pub(crate) fn require_path(field: &str, path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: "path must not be empty".to_string(),
        });
    }
    Ok(())
}
