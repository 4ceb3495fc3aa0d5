//! One-hot encoder over pre-fitted categories

use crate::error::FeatureError;
use crate::types::features::SparseRow;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Categorical columns in the order the encoder was fitted on
pub const CATEGORICAL_COLUMNS: [&str; 3] =
    ["employment_type", "required_experience", "required_education"];

/// Policy for values not seen during fitting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleUnknown {
    /// Fail the transform
    #[default]
    Error,
    /// Emit an all-zero block for that column
    Ignore,
}

/// Exported state of a fitted one-hot encoder
#[derive(Debug, Clone, Deserialize)]
pub struct OneHotArtifact {
    /// Fitted categories per column, in output order
    pub categories: Vec<Vec<String>>,
    #[serde(default)]
    pub feature_names_in: Option<Vec<String>>,
    #[serde(default)]
    pub handle_unknown: HandleUnknown,
    /// Category index dropped per column, if any
    #[serde(default)]
    pub drop_idx: Option<Vec<Option<usize>>>,
}

#[derive(Debug, Clone)]
struct EncodedColumn {
    name: String,
    categories: Vec<String>,
    drop: Option<usize>,
    offset: usize,
}

impl EncodedColumn {
    fn width(&self) -> usize {
        self.categories.len() - usize::from(self.drop.is_some())
    }
}

/// One-hot transform with the fitted categories; never refits
#[derive(Debug, Clone)]
pub struct OneHotEncoder {
    columns: Vec<EncodedColumn>,
    handle_unknown: HandleUnknown,
    width: usize,
}

impl OneHotEncoder {
    /// Load an encoder export from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read encoder from {}", path.display()))?;
        let artifact: OneHotArtifact = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse encoder {}", path.display()))?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: OneHotArtifact) -> Result<Self> {
        if artifact.categories.len() != CATEGORICAL_COLUMNS.len() {
            anyhow::bail!(
                "Encoder was fitted on {} columns, expected {}",
                artifact.categories.len(),
                CATEGORICAL_COLUMNS.len()
            );
        }
        if let Some(names) = &artifact.feature_names_in {
            if names.iter().map(String::as_str).ne(CATEGORICAL_COLUMNS) {
                anyhow::bail!(
                    "Encoder columns {:?} do not match {:?}",
                    names,
                    CATEGORICAL_COLUMNS
                );
            }
        }

        let drops = artifact
            .drop_idx
            .unwrap_or_else(|| vec![None; CATEGORICAL_COLUMNS.len()]);
        if drops.len() != CATEGORICAL_COLUMNS.len() {
            anyhow::bail!("Encoder drop_idx has {} entries", drops.len());
        }

        let mut columns = Vec::with_capacity(CATEGORICAL_COLUMNS.len());
        let mut offset = 0;
        for ((name, categories), drop) in CATEGORICAL_COLUMNS
            .iter()
            .zip(artifact.categories)
            .zip(drops)
        {
            if categories.is_empty() {
                anyhow::bail!("Encoder column '{name}' has no categories");
            }
            if drop.is_some_and(|d| d >= categories.len()) {
                anyhow::bail!("Encoder drop index out of range for column '{name}'");
            }
            let column = EncodedColumn {
                name: name.to_string(),
                categories,
                drop,
                offset,
            };
            offset += column.width();
            columns.push(column);
        }

        Ok(Self {
            columns,
            handle_unknown: artifact.handle_unknown,
            width: offset,
        })
    }

    /// Number of output columns
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn handle_unknown(&self) -> HandleUnknown {
        self.handle_unknown
    }

    /// Encode one row of categorical values, given in `CATEGORICAL_COLUMNS` order
    pub fn transform(&self, values: &[&str; 3]) -> Result<SparseRow, FeatureError> {
        let mut entries = Vec::with_capacity(values.len());

        for (column, value) in self.columns.iter().zip(values) {
            let Some(position) = column.categories.iter().position(|c| c == value) else {
                match self.handle_unknown {
                    HandleUnknown::Ignore => continue,
                    HandleUnknown::Error => {
                        return Err(FeatureError::UnknownCategory {
                            column: column.name.clone(),
                            value: value.to_string(),
                        })
                    }
                }
            };

            let local = match column.drop {
                Some(d) if position == d => continue,
                Some(d) if position > d => position - 1,
                _ => position,
            };
            entries.push((column.offset + local, 1.0));
        }

        Ok(SparseRow::from_entries(self.width, entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(handle_unknown: &str) -> OneHotArtifact {
        serde_json::from_value(serde_json::json!({
            "categories": [
                ["Contract", "Full-time", "Unknown"],
                ["Entry level", "Unknown"],
                ["Bachelor's Degree", "High School or equivalent", "Unknown"]
            ],
            "feature_names_in": CATEGORICAL_COLUMNS,
            "handle_unknown": handle_unknown
        }))
        .unwrap()
    }

    #[test]
    fn test_transform_known_values() {
        let encoder = OneHotEncoder::from_artifact(artifact("ignore")).unwrap();
        assert_eq!(encoder.width(), 8);

        let row = encoder
            .transform(&["Full-time", "Unknown", "Bachelor's Degree"])
            .unwrap();
        assert_eq!(row.entries(), &[(1, 1.0), (4, 1.0), (5, 1.0)]);
    }

    #[test]
    fn test_unknown_ignored() {
        let encoder = OneHotEncoder::from_artifact(artifact("ignore")).unwrap();
        let row = encoder.transform(&["Freelance", "Unknown", "Unknown"]).unwrap();
        assert_eq!(row.entries(), &[(4, 1.0), (7, 1.0)]);
    }

    #[test]
    fn test_unknown_rejected() {
        let encoder = OneHotEncoder::from_artifact(artifact("error")).unwrap();
        let err = encoder
            .transform(&["Freelance", "Unknown", "Unknown"])
            .unwrap_err();
        assert!(matches!(err, FeatureError::UnknownCategory { ref column, .. } if column == "employment_type"));
    }

    #[test]
    fn test_drop_first() {
        let mut artifact = artifact("ignore");
        artifact.drop_idx = Some(vec![Some(0), None, Some(0)]);
        let encoder = OneHotEncoder::from_artifact(artifact).unwrap();
        assert_eq!(encoder.width(), 6);

        let row = encoder
            .transform(&["Contract", "Entry level", "Unknown"])
            .unwrap();
        // employment_type dropped, experience at 2, education "Unknown" at 4 + 1
        assert_eq!(row.entries(), &[(2, 1.0), (5, 1.0)]);
    }

    #[test]
    fn test_wrong_column_order_rejected() {
        let mut artifact = artifact("ignore");
        artifact.feature_names_in = Some(vec![
            "required_education".into(),
            "employment_type".into(),
            "required_experience".into(),
        ]);
        assert!(OneHotEncoder::from_artifact(artifact).is_err());
    }
}
