//! Artifact and pipeline error types.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Startup-time failure to load an artifact. Fatal.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {artifact} at {}: {source}", .path.display())]
    Io {
        artifact: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    /// Malformed JSON, or JSON of the wrong shape. `path` is `None` for
    /// in-memory artifacts.
    #[error("failed to parse {artifact}{}: {source}", location(.path.as_deref()))]
    Parse {
        artifact: &'static str,
        path: Option<PathBuf>,
        source: serde_json::Error,
    },

    /// The artifact parsed but is unusable.
    #[error("invalid {artifact}: {reason}")]
    Invalid {
        artifact: &'static str,
        reason: String,
    },
}

fn location(path: Option<&Path>) -> String {
    path.map(|path| format!(" at {}", path.display())).unwrap_or_default()
}

/// A categorical value could not be turned into its numeric code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    /// The value was never seen while the encoder was fitted.
    #[error("unseen category '{value}' for column '{column}'")]
    UnseenCategory { column: String, value: String },

    /// A categorical column has no encoder at all.
    #[error("no encoder for categorical column '{column}'")]
    MissingEncoder { column: String },
}

/// The encoded record does not fit the model's declared features.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaMismatchError {
    #[error("model expects feature '{feature}' which the survey does not provide")]
    MissingFeature { feature: String },

    #[error("model expects {expected} features, got {actual}")]
    WidthMismatch { expected: usize, actual: usize },
}

/// Per-request failure. Reported to the user, never fatal.
#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    SchemaMismatch(#[from] SchemaMismatchError),

    #[error("model returned an invalid probability: {value}")]
    InvalidProbability { value: f64 },
}
