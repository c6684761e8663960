//! Validation verdict types for a column mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::column::ColumnDataType;
use crate::field::FieldType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// Blocks submission of the mapping.
    Error,
    /// Informational; never affects validity.
    Warning,
}

impl IssueSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueSeverity::Error => "error",
            IssueSeverity::Warning => "warning",
        }
    }
}

/// A column whose detected type cannot feed the field it is mapped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMismatch {
    pub column: String,
    pub expected_type: FieldType,
    pub detected_type: ColumnDataType,
}

/// Result of validating a mapping assignment.
///
/// Always derived from the detected columns, the schema and the current
/// assignment; it is never edited on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Required fields with no column mapped, in schema order.
    pub missing_required_fields: Vec<String>,
    /// Incompatible pairings, in assignment order.
    pub type_mismatches: Vec<TypeMismatch>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Flatten the verdict into individual issues, errors first.
    pub fn issues(&self) -> Vec<MappingIssue> {
        let mut issues = Vec::new();
        for field in &self.missing_required_fields {
            issues.push(MappingIssue::MissingRequiredField {
                field: field.clone(),
            });
        }
        for mismatch in &self.type_mismatches {
            issues.push(MappingIssue::TypeMismatch(mismatch.clone()));
        }
        for warning in &self.warnings {
            issues.push(MappingIssue::UnmappedColumns {
                message: warning.clone(),
            });
        }
        issues
    }

    pub fn error_count(&self) -> usize {
        self.missing_required_fields.len() + self.type_mismatches.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// A single problem found while validating a mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MappingIssue {
    MissingRequiredField { field: String },
    TypeMismatch(TypeMismatch),
    UnmappedColumns { message: String },
}

impl MappingIssue {
    pub fn severity(&self) -> IssueSeverity {
        match self {
            MappingIssue::MissingRequiredField { .. } | MappingIssue::TypeMismatch(_) => {
                IssueSeverity::Error
            }
            MappingIssue::UnmappedColumns { .. } => IssueSeverity::Warning,
        }
    }

    /// Short machine-friendly code for the issue kind.
    pub fn code(&self) -> &'static str {
        match self {
            MappingIssue::MissingRequiredField { .. } => "missing_required_field",
            MappingIssue::TypeMismatch(_) => "type_mismatch",
            MappingIssue::UnmappedColumns { .. } => "unmapped_columns",
        }
    }
}

impl fmt::Display for MappingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingIssue::MissingRequiredField { field } => {
                write!(f, "Required field '{field}' is not mapped")
            }
            MappingIssue::TypeMismatch(mismatch) => write!(
                f,
                "Column '{}' is {} but its field expects {}",
                mismatch.column, mismatch.detected_type, mismatch.expected_type
            ),
            MappingIssue::UnmappedColumns { message } => write!(f, "{message}"),
        }
    }
}
