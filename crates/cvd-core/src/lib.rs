//! # cvd-core
//!
//! Core types and error types for the CVD risk predictor.
//!
//! This crate provides the foundational types shared across all crates:
//! - Survey answer enums with their canonical (encoder-facing) labels
//! - The `SurveyRecord` and the `SurveyDraft` collector that builds it
//! - Risk tier thresholds and the tier presentation table
//! - Prediction response types
//! - Cross-cutting error types

pub mod enums;
pub mod errors;
pub mod responses;
pub mod survey;
pub mod tier;

pub use errors::CoreError;
pub use responses::{PredictionReport, PredictionResult};
pub use survey::{FeatureValue, FieldKind, SurveyDraft, SurveyField, SurveyRecord};
pub use tier::{RiskTier, classify_tier};
