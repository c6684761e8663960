//! Validation of a mapping assignment against the canonical schema.

use std::collections::{BTreeSet, HashMap};

use campaign_model::{CanonicalField, DetectedColumn, TypeMismatch, ValidationResult};
use tracing::trace;

use crate::assignment::MappingAssignment;

/// Compute the validation verdict for an assignment.
///
/// - Missing required fields are reported in schema order.
/// - Type mismatches are reported in assignment order.
/// - One warning is emitted when some detected columns are left unmapped.
///
/// Pairs naming an unknown column or field are skipped.
pub fn validate_assignment(
    columns: &[DetectedColumn],
    schema: &[CanonicalField],
    assignment: &MappingAssignment,
) -> ValidationResult {
    let mapped_fields: BTreeSet<&str> = assignment.fields().collect();
    let missing_required_fields: Vec<String> = schema
        .iter()
        .filter(|field| field.required && !mapped_fields.contains(field.name.as_str()))
        .map(|field| field.name.clone())
        .collect();

    let column_lookup: HashMap<&str, &DetectedColumn> =
        columns.iter().map(|c| (c.name.as_str(), c)).collect();
    let field_lookup: HashMap<&str, &CanonicalField> =
        schema.iter().map(|f| (f.name.as_str(), f)).collect();

    let mut type_mismatches = Vec::new();
    let mut assigned_columns = 0usize;
    for (column_name, field_name) in assignment.iter() {
        let Some(column) = column_lookup.get(column_name) else {
            trace!(column = %column_name, "skipping unknown column");
            continue;
        };
        assigned_columns += 1;
        let Some(field) = field_lookup.get(field_name) else {
            trace!(field = %field_name, "skipping unknown field");
            continue;
        };
        if !field.field_type.accepts(column.data_type) {
            type_mismatches.push(TypeMismatch {
                column: column.name.clone(),
                expected_type: field.field_type,
                detected_type: column.data_type,
            });
        }
    }

    let mut warnings = Vec::new();
    let unmapped_count = columns.len().saturating_sub(assigned_columns);
    if unmapped_count > 0 {
        warnings.push(format!("{unmapped_count} columns remain unmapped"));
    }

    ValidationResult {
        is_valid: missing_required_fields.is_empty() && type_mismatches.is_empty(),
        missing_required_fields,
        type_mismatches,
        warnings,
    }
}
