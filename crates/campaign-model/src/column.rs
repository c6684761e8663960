//! Source columns identified by the upstream detection step.
//!
//! Detection itself happens outside this workspace; these types describe
//! what the ingestion service hands back for each column of an upload.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Data type inferred for a detected source column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnDataType {
    #[serde(alias = "text")]
    String,
    #[serde(alias = "numeric", alias = "integer", alias = "float")]
    Number,
    #[serde(alias = "datetime")]
    Date,
    #[serde(alias = "bool")]
    Boolean,
}

impl ColumnDataType {
    /// Returns the wire name of the data type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnDataType::String => "string",
            ColumnDataType::Number => "number",
            ColumnDataType::Date => "date",
            ColumnDataType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ColumnDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ColumnDataType {
    type Err = ModelError;

    /// Parse a data type name, accepting the aliases upstream detectors emit.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "string" | "text" => Ok(ColumnDataType::String),
            "number" | "numeric" | "integer" | "float" => Ok(ColumnDataType::Number),
            "date" | "datetime" => Ok(ColumnDataType::Date),
            "boolean" | "bool" => Ok(ColumnDataType::Boolean),
            _ => Err(ModelError::UnknownDataType(s.to_string())),
        }
    }
}

/// A source-file column with its inferred type and detection confidence.
///
/// `name` is unique within a detection batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedColumn {
    pub name: String,
    pub data_type: ColumnDataType,
    #[serde(default)]
    pub sample_values: Vec<String>,
    /// Detection confidence in `[0, 1]`.
    #[serde(default = "default_confidence")]
    pub confidence_score: f32,
}

fn default_confidence() -> f32 {
    1.0
}

impl DetectedColumn {
    pub fn new(name: impl Into<String>, data_type: ColumnDataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            sample_values: Vec::new(),
            confidence_score: default_confidence(),
        }
    }

    /// Attach sample values in their original order.
    #[must_use]
    pub fn with_samples<I, S>(mut self, samples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sample_values = samples.into_iter().map(Into::into).collect();
        self
    }

    /// Set the detection confidence, rejecting values outside `[0, 1]`.
    pub fn with_confidence(mut self, score: f32) -> crate::Result<Self> {
        if !(0.0..=1.0).contains(&score) {
            return Err(ModelError::ConfidenceOutOfRange(score.to_string()));
        }
        self.confidence_score = score;
        Ok(self)
    }
}
