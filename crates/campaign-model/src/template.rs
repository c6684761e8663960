//! Mapping templates and the final mapping handed back to the platform.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A named column-to-field mapping reusable across uploads for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingTemplate {
    pub name: String,
    /// Advertising platform the template was built for (e.g. "facebook").
    pub platform: String,
    /// Column name to canonical field name, in insertion order.
    pub mapping: IndexMap<String, String>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_shared: bool,
}

impl MappingTemplate {
    pub fn new(name: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            platform: platform.into(),
            mapping: IndexMap::new(),
            is_default: false,
            is_shared: false,
        }
    }

    #[must_use]
    pub fn with_mapping<I, C, F>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (C, F)>,
        C: Into<String>,
        F: Into<String>,
    {
        self.mapping = entries
            .into_iter()
            .map(|(column, field)| (column.into(), field.into()))
            .collect();
        self
    }

    #[must_use]
    pub fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    #[must_use]
    pub fn with_shared(mut self, is_shared: bool) -> Self {
        self.is_shared = is_shared;
        self
    }
}

/// The validated mapping dictionary submitted to the ingestion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingSubmission {
    /// Version of the canonical schema the mapping targets.
    pub schema_version: String,
    pub mapping: IndexMap<String, String>,
}
