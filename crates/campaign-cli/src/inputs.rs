//! Readers for the JSON inputs handed over by the upload service.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::debug;

use campaign_map::MappingAssignment;
use campaign_model::DetectedColumn;

/// Reads a JSON array of detected columns.
///
/// Column names must be unique within one upload.
pub fn load_columns(path: &Path) -> Result<Vec<DetectedColumn>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let columns: Vec<DetectedColumn> = serde_json::from_str(&content)
        .with_context(|| format!("parse detected columns in {}", path.display()))?;

    let mut seen = BTreeSet::new();
    for column in &columns {
        if !seen.insert(column.name.as_str()) {
            bail!(
                "duplicate column name '{}' in {}",
                column.name,
                path.display()
            );
        }
        if !(0.0..=1.0).contains(&column.confidence_score) {
            bail!(
                "column '{}' has confidence {} outside 0.0-1.0",
                column.name,
                column.confidence_score
            );
        }
    }
    debug!(path = %path.display(), count = columns.len(), "loaded detected columns");
    Ok(columns)
}

/// Reads a JSON object of `column -> field` entries.
///
/// Entries apply in file order, so a field named twice ends up on the later column.
pub fn load_mapping(path: &Path) -> Result<MappingAssignment> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let assignment: MappingAssignment = serde_json::from_str(&content)
        .with_context(|| format!("parse mapping in {}", path.display()))?;
    debug!(path = %path.display(), entries = assignment.len(), "loaded mapping");
    Ok(assignment)
}
