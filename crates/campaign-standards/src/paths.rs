//! Schema source resolution.
//!
//! The built-in schema carries [`SCHEMA_VERSION`]. A CSV override replaces
//! the field set, so it must name its own version; a submission always
//! reports the version of the schema it was validated against.

use std::path::PathBuf;

use campaign_model::CanonicalField;
use tracing::info;

use crate::error::StandardsError;
use crate::loader::parse_schema_csv;
use crate::schema::{SCHEMA_VERSION, canonical_schema};

/// Environment variable pointing at a CSV schema override.
pub const SCHEMA_ENV_VAR: &str = "CAMPAIGN_SCHEMA_PATH";

/// Environment variable naming the version of the CSV schema override.
pub const SCHEMA_VERSION_ENV_VAR: &str = "CAMPAIGN_SCHEMA_VERSION";

/// A schema together with the version it is published under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSchema {
    pub version: String,
    pub fields: Vec<CanonicalField>,
    /// CSV file the fields came from; `None` for the built-in schema.
    pub source: Option<PathBuf>,
}

impl LoadedSchema {
    /// The built-in canonical schema.
    pub fn builtin() -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            fields: canonical_schema(),
            source: None,
        }
    }

    pub fn is_builtin(&self) -> bool {
        self.source.is_none()
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Path of the schema override, if `CAMPAIGN_SCHEMA_PATH` is set and non-empty.
pub fn schema_override_path() -> Option<PathBuf> {
    non_empty_env(SCHEMA_ENV_VAR).map(PathBuf::from)
}

/// Version of the schema override, if `CAMPAIGN_SCHEMA_VERSION` is set and non-empty.
pub fn schema_override_version() -> Option<String> {
    non_empty_env(SCHEMA_VERSION_ENV_VAR)
}

/// Load the schema for a mapping session.
///
/// The path resolves from `explicit`, then `CAMPAIGN_SCHEMA_PATH`; the
/// version from `explicit_version`, then `CAMPAIGN_SCHEMA_VERSION`. With no
/// path the built-in schema is used.
///
/// # Errors
///
/// - an override without a version, or claiming the built-in version
/// - a version other than the built-in one with no override to carry it
/// - any error reading or parsing the CSV
pub fn load_schema(
    explicit: Option<PathBuf>,
    explicit_version: Option<String>,
) -> Result<LoadedSchema, StandardsError> {
    let version = explicit_version
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(schema_override_version);
    let Some(path) = explicit.or_else(schema_override_path) else {
        return match version {
            Some(version) if version != SCHEMA_VERSION => {
                Err(StandardsError::VersionWithoutSchema { version })
            }
            _ => Ok(LoadedSchema::builtin()),
        };
    };

    let Some(version) = version else {
        return Err(StandardsError::MissingVersion { path });
    };
    if version == SCHEMA_VERSION {
        return Err(StandardsError::BuiltinVersion { path, version });
    }
    let fields = parse_schema_csv(&path)?;
    info!(
        path = %path.display(),
        version = %version,
        fields = fields.len(),
        "using schema override"
    );
    Ok(LoadedSchema {
        version,
        fields,
        source: Some(path),
    })
}
