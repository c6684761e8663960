#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("duplicate canonical field in {path}: {field}")]
    DuplicateField { path: PathBuf, field: String },

    #[error("schema in {path} defines no fields")]
    EmptySchema { path: PathBuf },

    #[error("schema override {path} has no version; set CAMPAIGN_SCHEMA_VERSION")]
    MissingVersion { path: PathBuf },

    #[error("schema override {path} cannot use the built-in schema version {version}")]
    BuiltinVersion { path: PathBuf, version: String },

    #[error("schema version {version} requested but no schema override is configured")]
    VersionWithoutSchema { version: String },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Csv {
            path: path.into(),
            message: message.into(),
        }
    }
}
