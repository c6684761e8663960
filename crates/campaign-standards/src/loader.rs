#![deny(unsafe_code)]

use std::collections::BTreeSet;
use std::path::Path;

use campaign_model::{CanonicalField, FieldType};
use tracing::debug;

use crate::error::StandardsError;

fn header_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim_matches('\u{feff}').trim().eq_ignore_ascii_case(name))
}

fn get_string(row: &csv::StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| row.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

fn parse_required(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        matches!(
            v.to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "1" | "req" | "required"
        )
    })
}

/// Load a canonical schema override from a CSV file.
///
/// Expected headers: `Field Name`, `Type`, `Required`, `Description`.
/// Rows keep file order; duplicate names and empty files are rejected.
pub fn parse_schema_csv(path: &Path) -> Result<Vec<CanonicalField>, StandardsError> {
    let bytes = std::fs::read(path).map_err(|e| StandardsError::io(path, e))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes.as_slice());
    let headers = reader
        .headers()
        .map_err(|e| StandardsError::csv(path, e.to_string()))?
        .clone();

    let idx_name = header_index(&headers, "Field Name");
    let idx_type = header_index(&headers, "Type");
    let idx_required = header_index(&headers, "Required");
    let idx_description = header_index(&headers, "Description");

    let mut seen = BTreeSet::new();
    let mut fields = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| StandardsError::csv(path, e.to_string()))?;

        let name = get_string(&row, idx_name)
            .ok_or_else(|| StandardsError::csv(path, "missing Field Name"))?;
        let field_type = get_string(&row, idx_type)
            .ok_or_else(|| StandardsError::csv(path, format!("missing Type for {name}")))?
            .parse::<FieldType>()
            .map_err(|e| StandardsError::csv(path, e.to_string()))?;
        let required = parse_required(get_string(&row, idx_required).as_deref());

        if !seen.insert(name.clone()) {
            return Err(StandardsError::DuplicateField {
                path: path.to_path_buf(),
                field: name,
            });
        }
        fields.push(CanonicalField::new(
            name,
            field_type,
            required,
            get_string(&row, idx_description).unwrap_or_default(),
        ));
    }

    if fields.is_empty() {
        return Err(StandardsError::EmptySchema {
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), field_count = fields.len(), "loaded schema override");
    Ok(fields)
}
