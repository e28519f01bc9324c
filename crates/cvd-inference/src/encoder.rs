//! Fitted categorical encoders.
//!
//! The artifact is a JSON object keyed by column name. Each column is either
//! an explicit `{ "<category>": code }` mapping or the fitted class list,
//! where a category's code is its index:
//!
//! ```json
//! {
//!   "Sex": { "Female": 0, "Male": 1 },
//!   "Exercise": ["No", "Yes"]
//! }
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::error::{ArtifactError, EncodingError};

const ARTIFACT: &str = "encoder artifact";

/// Exact-match lookup from a raw category to its learned numeric code.
pub trait CategoryEncoder {
    /// Whether `column` has a fitted encoder.
    fn covers(&self, column: &str) -> bool;

    /// Code for `raw` in `column`.
    fn encode(&self, column: &str, raw: &str) -> Result<i64, EncodingError>;
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ColumnSpec {
    Classes(Vec<String>),
    Mapping(BTreeMap<String, i64>),
}

/// Label encoders for every categorical column, loaded read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelEncoders {
    columns: HashMap<String, HashMap<String, i64>>,
}

impl LabelEncoders {
    pub fn from_path(path: &Path) -> Result<Self, ArtifactError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            artifact: ARTIFACT,
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw, Some(path))
    }

    /// Parse an in-memory artifact.
    pub fn from_json_str(raw: &str) -> Result<Self, ArtifactError> {
        Self::parse(raw, None)
    }

    fn parse(raw: &str, path: Option<&Path>) -> Result<Self, ArtifactError> {
        let specs: BTreeMap<String, ColumnSpec> =
            serde_json::from_str(raw).map_err(|source| ArtifactError::Parse {
                artifact: ARTIFACT,
                path: path.map(Path::to_path_buf),
                source,
            })?;
        Self::from_specs(specs)
    }

    fn from_specs(specs: BTreeMap<String, ColumnSpec>) -> Result<Self, ArtifactError> {
        let mut columns = HashMap::with_capacity(specs.len());
        for (column, spec) in specs {
            let codes = match spec {
                ColumnSpec::Classes(classes) => {
                    let mut codes = HashMap::with_capacity(classes.len());
                    for (index, class) in classes.into_iter().enumerate() {
                        let code = i64::try_from(index)
                            .map_err(|_| invalid(&column, "too many classes"))?;
                        if codes.insert(class.clone(), code).is_some() {
                            return Err(invalid(&column, &format!("duplicate class '{class}'")));
                        }
                    }
                    codes
                }
                ColumnSpec::Mapping(mapping) => {
                    let mut seen = HashSet::with_capacity(mapping.len());
                    for (category, code) in &mapping {
                        if !seen.insert(*code) {
                            return Err(invalid(
                                &column,
                                &format!("code {code} reused by '{category}'"),
                            ));
                        }
                    }
                    mapping.into_iter().collect()
                }
            };
            if codes.is_empty() {
                return Err(invalid(&column, "no categories"));
            }
            columns.insert(column, codes);
        }
        Ok(Self { columns })
    }

    /// Number of encoded columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl CategoryEncoder for LabelEncoders {
    fn covers(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    fn encode(&self, column: &str, raw: &str) -> Result<i64, EncodingError> {
        let codes = self
            .columns
            .get(column)
            .ok_or_else(|| EncodingError::MissingEncoder {
                column: column.to_string(),
            })?;
        codes
            .get(raw)
            .copied()
            .ok_or_else(|| EncodingError::UnseenCategory {
                column: column.to_string(),
                value: raw.to_string(),
            })
    }
}

fn invalid(column: &str, reason: &str) -> ArtifactError {
    ArtifactError::Invalid {
        artifact: ARTIFACT,
        reason: format!("column '{column}': {reason}"),
    }
}
