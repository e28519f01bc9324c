//! Media file locations for the base64 encoder.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;
use crate::artifacts::require_path;

fn default_video_path() -> PathBuf {
    PathBuf::from("heart-animation.mp4")
}

fn default_encoded_path() -> PathBuf {
    PathBuf::from("video_base64.txt")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaConfig {
    /// Binary input of `cvd encode-video`.
    #[serde(default = "default_video_path")]
    pub video_path: PathBuf,

    /// Text output of `cvd encode-video`.
    #[serde(default = "default_encoded_path")]
    pub encoded_path: PathBuf,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            video_path: default_video_path(),
            encoded_path: default_encoded_path(),
        }
    }
}

impl MediaConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_path("media.video_path", &self.video_path)?;
        require_path("media.encoded_path", &self.encoded_path)
    }
}
