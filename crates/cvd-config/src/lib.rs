//! # cvd-config
//!
//! Layered configuration loading for the CVD risk predictor using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CVD_*` prefix, `__` as separator)
//! 2. Project-level `.cvd/config.toml`
//! 3. User-level `~/.config/cvd-risk/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CVD_ARTIFACTS__MODEL_PATH` -> `artifacts.model_path`,
//! `CVD_MEDIA__VIDEO_PATH` -> `media.video_path`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use cvd_config::CvdConfig;
//!
//! let config = CvdConfig::load_with_dotenv().expect("config");
//! println!("model: {}", config.artifacts.model_path.display());
//! ```

mod artifacts;
mod error;
mod media;

pub use artifacts::ArtifactsConfig;
pub use error::ConfigError;
pub use media::MediaConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CvdConfig {
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
    #[serde(default)]
    pub media: MediaConfig,
}

impl CvdConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`load_with_dotenv`](Self::load_with_dotenv)
    /// if you need `.env` file loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support from the current directory.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".cvd/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("CVD_").split("__"))
    }

    /// Reject values no command can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.artifacts.validate()?;
        self.media.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cvd-risk").join("config.toml"))
    }
}
