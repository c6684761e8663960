//! The user-chosen correspondence between detected columns and canonical fields.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::is_unassign_sentinel;

/// Ordered column-to-field mapping, unique on both sides.
///
/// A column maps to at most one field and a field is taken by at most one
/// column. Iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MappingAssignment {
    entries: IndexMap<String, String>,
}

impl MappingAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an assignment from ordered pairs, applying [`Self::set`] to each.
    ///
    /// When two entries name the same field the later one wins. An empty
    /// field name unmaps the column instead of being stored.
    pub fn from_pairs<I, C, F>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, F)>,
        C: Into<String>,
        F: Into<String>,
    {
        let mut assignment = Self::new();
        for (column, field) in pairs {
            let column: String = column.into();
            let field: String = field.into();
            if is_unassign_sentinel(&field) {
                assignment.remove(&column);
            } else {
                assignment.set(column, field);
            }
        }
        assignment
    }

    /// Map `column` to `field`.
    ///
    /// Any other column holding `field` is unmapped first. Returns that
    /// displaced column, if there was one.
    pub fn set(&mut self, column: impl Into<String>, field: impl Into<String>) -> Option<String> {
        let column = column.into();
        let field = field.into();
        let displaced = self
            .entries
            .iter()
            .find(|(_, existing)| **existing == field)
            .map(|(holder, _)| holder.clone());
        if let Some(holder) = &displaced {
            self.entries.shift_remove(holder);
        }
        self.entries.insert(column.clone(), field);
        displaced.filter(|holder| *holder != column)
    }

    /// Unmap `column`, returning the field it held.
    pub fn remove(&mut self, column: &str) -> Option<String> {
        self.entries.shift_remove(column)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Field currently mapped from `column`.
    pub fn field_for(&self, column: &str) -> Option<&str> {
        self.entries.get(column).map(String::as_str)
    }

    /// Column currently mapped to `field`.
    pub fn column_for(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, value)| value.as_str() == field)
            .map(|(column, _)| column.as_str())
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.entries.contains_key(column)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.entries.values().any(|value| value == field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(column, field)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(column, field)| (column.as_str(), field.as_str()))
    }

    /// Mapped field names in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }

    /// Copy of the mapping dictionary.
    pub fn to_mapping(&self) -> IndexMap<String, String> {
        self.entries.clone()
    }
}

impl<'de> Deserialize<'de> for MappingAssignment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = IndexMap::<String, String>::deserialize(deserializer)?;
        Ok(Self::from_pairs(entries))
    }
}
