//! Error types for mapping operations.

use std::fmt;

/// Errors from mapping operations.
///
/// Only raised when a session runs with
/// [`ReferencePolicy::Strict`](campaign_model::ReferencePolicy::Strict).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// Column not found among the detected columns.
    ColumnNotFound(String),
    /// Field not found in the canonical schema.
    FieldNotFound(String),
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColumnNotFound(c) => write!(f, "Column not found: {c}"),
            Self::FieldNotFound(v) => write!(f, "Field not found: {v}"),
        }
    }
}

impl std::error::Error for MappingError {}
