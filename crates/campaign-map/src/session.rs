//! Mapping session state for interactive mapping workflows.
//!
//! A session owns the detected columns and the schema for one upload, the
//! current assignment, and the validation verdict for that assignment. The
//! verdict is recomputed after every mutation, so [`MappingSession::validate`]
//! always reflects the latest assignment.

use campaign_model::{
    CanonicalField, DetectedColumn, MappingSubmission, MappingTemplate, ReferencePolicy,
    SessionOptions, ValidationResult,
};
use tracing::{debug, info, warn};

use crate::assignment::MappingAssignment;
use crate::error::MappingError;
use crate::utils::is_unassign_sentinel;
use crate::validate::validate_assignment;

/// State of one column-mapping session.
#[derive(Debug, Clone)]
pub struct MappingSession {
    columns: Vec<DetectedColumn>,
    schema: Vec<CanonicalField>,
    options: SessionOptions,
    assignment: MappingAssignment,
    validation: ValidationResult,
}

impl MappingSession {
    /// Start a session with an empty assignment.
    pub fn new(columns: Vec<DetectedColumn>, schema: Vec<CanonicalField>) -> Self {
        Self::with_options(columns, schema, SessionOptions::default())
    }

    pub fn with_options(
        columns: Vec<DetectedColumn>,
        schema: Vec<CanonicalField>,
        options: SessionOptions,
    ) -> Self {
        let assignment = MappingAssignment::new();
        let validation = validate_assignment(&columns, &schema, &assignment);
        info!(
            column_count = columns.len(),
            field_count = schema.len(),
            policy = ?options.reference_policy,
            "mapping session started"
        );
        Self {
            columns,
            schema,
            options,
            assignment,
            validation,
        }
    }

    pub fn columns(&self) -> &[DetectedColumn] {
        &self.columns
    }

    pub fn schema(&self) -> &[CanonicalField] {
        &self.schema
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    pub fn assignment(&self) -> &MappingAssignment {
        &self.assignment
    }

    /// Validation verdict for the current assignment.
    pub fn validate(&self) -> &ValidationResult {
        &self.validation
    }

    /// True when the mapping may be submitted.
    pub fn can_continue(&self) -> bool {
        self.validation.is_valid
    }

    /// Map `column` to `field`, or unmap `column` when `field` is empty.
    ///
    /// A field already held by another column moves to `column`. Unknown
    /// names are accepted under the lenient policy and rejected under the
    /// strict one.
    pub fn assign(&mut self, column: &str, field: &str) -> Result<(), MappingError> {
        if is_unassign_sentinel(field) {
            self.unassign(column)?;
            return Ok(());
        }
        self.check_column(column)?;
        self.check_field(field)?;

        let displaced = self.assignment.set(column, field);
        if let Some(previous) = &displaced {
            debug!(field = %field, from = %previous, to = %column, "field moved between columns");
        }
        self.revalidate();
        debug!(
            column = %column,
            field = %field,
            is_valid = self.validation.is_valid,
            "column assigned"
        );
        Ok(())
    }

    /// Unmap `column`, returning the field it held. Does nothing if it was unmapped.
    pub fn unassign(&mut self, column: &str) -> Result<Option<String>, MappingError> {
        self.check_column(column)?;
        let removed = self.assignment.remove(column);
        self.revalidate();
        debug!(
            column = %column,
            removed = ?removed,
            is_valid = self.validation.is_valid,
            "column unassigned"
        );
        Ok(removed)
    }

    /// Replace the whole assignment with the template's mapping.
    ///
    /// Nothing of the previous assignment survives. Entries are applied in
    /// template order; under the strict policy entries with unknown names
    /// are dropped.
    pub fn load_template(&mut self, template: &MappingTemplate) {
        let mut assignment = MappingAssignment::new();
        let mut dropped = 0usize;
        for (column, field) in &template.mapping {
            if is_unassign_sentinel(field) {
                continue;
            }
            if let Err(error) = self
                .check_column(column)
                .and_then(|()| self.check_field(field))
            {
                warn!(template = %template.name, %error, "dropping template entry");
                dropped += 1;
                continue;
            }
            assignment.set(column.as_str(), field.as_str());
        }
        self.assignment = assignment;
        self.revalidate();
        info!(
            template = %template.name,
            platform = %template.platform,
            mapped = self.assignment.len(),
            dropped,
            is_valid = self.validation.is_valid,
            "template loaded"
        );
    }

    /// Remove every mapping.
    pub fn clear(&mut self) {
        self.assignment.clear();
        self.revalidate();
    }

    /// Field currently mapped from `column`.
    pub fn field_for(&self, column: &str) -> Option<&str> {
        self.assignment.field_for(column)
    }

    /// Column currently mapped to `field`.
    pub fn column_for(&self, field: &str) -> Option<&str> {
        self.assignment.column_for(field)
    }

    /// Detected columns with no mapping, in detection order.
    pub fn unmapped_columns(&self) -> Vec<&DetectedColumn> {
        self.columns
            .iter()
            .filter(|column| !self.assignment.contains_column(&column.name))
            .collect()
    }

    /// Fields not yet taken by any column, in schema order.
    pub fn available_fields(&self) -> Vec<&CanonicalField> {
        self.schema
            .iter()
            .filter(|field| !self.assignment.contains_field(&field.name))
            .collect()
    }

    /// Get summary counts.
    pub fn summary(&self) -> MappingSummary {
        let mapped_columns = self
            .columns
            .iter()
            .filter(|column| self.assignment.contains_column(&column.name))
            .count();
        let required_total = self.schema.iter().filter(|field| field.required).count();
        let required_mapped = self
            .schema
            .iter()
            .filter(|field| field.required && self.assignment.contains_field(&field.name))
            .count();
        MappingSummary {
            total_columns: self.columns.len(),
            mapped_columns,
            unmapped_columns: self.columns.len() - mapped_columns,
            required_total,
            required_mapped,
        }
    }

    /// Final mapping for the ingestion service, or `None` while invalid.
    pub fn submission(&self, schema_version: &str) -> Option<MappingSubmission> {
        if !self.validation.is_valid {
            debug!(
                errors = self.validation.error_count(),
                "submission blocked by validation errors"
            );
            return None;
        }
        Some(MappingSubmission {
            schema_version: schema_version.to_string(),
            mapping: self.assignment.to_mapping(),
        })
    }

    /// Snapshot the current assignment as a reusable template.
    pub fn to_template(&self, name: &str, platform: &str) -> MappingTemplate {
        MappingTemplate {
            name: name.to_string(),
            platform: platform.to_string(),
            mapping: self.assignment.to_mapping(),
            is_default: false,
            is_shared: false,
        }
    }

    fn revalidate(&mut self) {
        self.validation = validate_assignment(&self.columns, &self.schema, &self.assignment);
    }

    fn check_column(&self, column: &str) -> Result<(), MappingError> {
        if self.options.reference_policy == ReferencePolicy::Strict
            && !self.columns.iter().any(|c| c.name == column)
        {
            return Err(MappingError::ColumnNotFound(column.to_string()));
        }
        Ok(())
    }

    fn check_field(&self, field: &str) -> Result<(), MappingError> {
        if self.options.reference_policy == ReferencePolicy::Strict
            && !self.schema.iter().any(|f| f.name == field)
        {
            return Err(MappingError::FieldNotFound(field.to_string()));
        }
        Ok(())
    }
}

/// Summary of mapping counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingSummary {
    /// Number of detected columns.
    pub total_columns: usize,
    /// Detected columns with a mapping.
    pub mapped_columns: usize,
    /// Detected columns without a mapping.
    pub unmapped_columns: usize,
    /// Required fields in the schema.
    pub required_total: usize,
    /// Required fields that are mapped.
    pub required_mapped: usize,
}
