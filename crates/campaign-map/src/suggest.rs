//! Mapping suggestion engine.
//!
//! Proposes a column-to-field assignment from detected column names. Column
//! detection itself is done upstream; this only scores names against the
//! canonical schema.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use rapidfuzz::distance::jaro_winkler::similarity as jaro_similarity;

use campaign_model::{CanonicalField, DetectedColumn, MappingTemplate};
use tracing::debug;

use crate::assignment::MappingAssignment;
use crate::utils::normalize_text;

/// Penalty applied when the column type cannot feed the field.
const TYPE_MISMATCH_PENALTY: f64 = 0.5;
/// Boost for a fuzzy match against a known alias rather than the field name.
const ALIAS_FUZZY_FACTOR: f64 = 0.95;

/// Well-known export headers for each canonical field, already normalized.
const FIELD_ALIASES: [(&str, &[&str]); 15] = [
    (
        "date",
        &["day", "date", "reporting date", "report date", "reporting starts", "date start"],
    ),
    ("spend", &["amount spent", "amount spent usd", "cost", "spent", "media cost"]),
    ("impressions", &["impr", "imps", "impressions"]),
    ("clicks", &["clicks all", "link clicks", "clicks"]),
    ("conversions", &["conv", "results", "purchases", "conversions"]),
    (
        "revenue",
        &["conversion value", "purchase value", "purchases conversion value", "total conversion value"],
    ),
    ("campaign_id", &["campaign id", "campaign"]),
    ("adset_id", &["ad set id", "adset id", "ad group id", "adgroup id"]),
    ("ad_id", &["ad id"]),
    ("ctr", &["click through rate", "ctr all", "ctr link click through rate"]),
    ("cpm", &["cost per 1000 impressions", "cost per mille", "cpm cost per 1000 impressions"]),
    ("cpc", &["cost per click", "avg cpc", "cpc cost per link click"]),
    ("cpa", &["cost per acquisition", "cost per result", "cost per conversion", "cost conv"]),
    ("cvr", &["conversion rate", "conv rate"]),
    ("roas", &["return on ad spend", "purchase roas", "conv value cost"]),
];

/// Confidence level categories for suggestion quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfidenceLevel {
    /// Uncertain; needs manual confirmation.
    Low,
    /// Reasonable; should be reviewed.
    Medium,
    /// Near-certain.
    High,
}

impl ConfidenceLevel {
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "high confidence - likely correct",
            Self::Medium => "medium confidence - should review",
            Self::Low => "low confidence - needs verification",
        }
    }
}

/// Configurable thresholds for categorizing suggestion confidence.
///
/// - Below `low`: rejected
/// - `low` to `medium`: [`ConfidenceLevel::Low`]
/// - `medium` to `high`: [`ConfidenceLevel::Medium`]
/// - At or above `high`: [`ConfidenceLevel::High`]
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceThresholds {
    pub high: f32,
    pub medium: f32,
    pub low: f32,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: 0.95,
            medium: 0.80,
            low: 0.60,
        }
    }
}

impl ConfidenceThresholds {
    #[must_use]
    pub fn strict() -> Self {
        Self {
            high: 0.98,
            medium: 0.90,
            low: 0.75,
        }
    }

    #[must_use]
    pub fn relaxed() -> Self {
        Self {
            high: 0.90,
            medium: 0.70,
            low: 0.50,
        }
    }

    /// Categorizes a confidence score; `None` if below the low threshold.
    #[must_use]
    pub fn categorize(&self, confidence: f32) -> Option<ConfidenceLevel> {
        if confidence >= self.high {
            Some(ConfidenceLevel::High)
        } else if confidence >= self.medium {
            Some(ConfidenceLevel::Medium)
        } else if confidence >= self.low {
            Some(ConfidenceLevel::Low)
        } else {
            None
        }
    }
}

/// A proposed pairing of a detected column with a canonical field.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub column: String,
    pub field: String,
    /// Confidence score in `[0, 1]`.
    pub confidence: f32,
}

/// Result of a suggestion run.
#[derive(Debug, Clone, Default)]
pub struct SuggestionResult {
    /// One-to-one suggestions, highest confidence first.
    pub suggestions: Vec<Suggestion>,
    /// Columns with no suggestion above the minimum confidence, in input order.
    pub unmapped_columns: Vec<String>,
}

impl SuggestionResult {
    /// Count of suggestions at each confidence level.
    #[must_use]
    pub fn count_by_level(&self, thresholds: &ConfidenceThresholds) -> BTreeMap<ConfidenceLevel, usize> {
        let mut counts = BTreeMap::new();
        for suggestion in &self.suggestions {
            if let Some(level) = thresholds.categorize(suggestion.confidence) {
                *counts.entry(level).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Suggestions at or above `min_level`.
    #[must_use]
    pub fn filter_by_level(
        &self,
        min_level: ConfidenceLevel,
        thresholds: &ConfidenceThresholds,
    ) -> Vec<&Suggestion> {
        self.suggestions
            .iter()
            .filter(|s| {
                thresholds
                    .categorize(s.confidence)
                    .is_some_and(|level| level >= min_level)
            })
            .collect()
    }

    #[must_use]
    pub fn min_confidence(&self) -> Option<f32> {
        self.suggestions
            .iter()
            .map(|s| s.confidence)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
    }

    #[must_use]
    pub fn mean_confidence(&self) -> Option<f32> {
        if self.suggestions.is_empty() {
            return None;
        }
        let sum: f32 = self.suggestions.iter().map(|s| s.confidence).sum();
        Some(sum / self.suggestions.len() as f32)
    }

    /// Suggestions as an assignment.
    pub fn to_assignment(&self) -> MappingAssignment {
        MappingAssignment::from_pairs(
            self.suggestions
                .iter()
                .map(|s| (s.column.as_str(), s.field.as_str())),
        )
    }

    /// Suggestions as a template ready to load or store.
    pub fn into_template(self, name: &str, platform: &str) -> MappingTemplate {
        MappingTemplate::new(name, platform)
            .with_mapping(self.suggestions.into_iter().map(|s| (s.column, s.field)))
    }
}

/// Engine for suggesting column-to-field mappings.
///
/// Exact alias matches score 1.0; otherwise Jaro-Winkler similarity between
/// normalized names is used. Pairings whose types are incompatible are
/// penalized. Each column and each field is suggested at most once.
pub struct SuggestionEngine {
    schema: Vec<CanonicalField>,
    min_confidence: f32,
    patterns: BTreeMap<String, Vec<String>>,
}

struct Candidate {
    column_idx: usize,
    field: String,
    confidence: f32,
}

impl SuggestionEngine {
    /// Creates an engine for a schema.
    ///
    /// * `min_confidence` - minimum score (0.0-1.0) for a suggestion to be kept
    pub fn new(schema: Vec<CanonicalField>, min_confidence: f32) -> Self {
        let patterns = build_field_patterns(&schema);
        Self {
            schema,
            min_confidence,
            patterns,
        }
    }

    pub fn suggest(&self, columns: &[DetectedColumn]) -> SuggestionResult {
        let mut candidates = Vec::new();
        for (column_idx, column) in columns.iter().enumerate() {
            for field in &self.schema {
                let confidence = self.score_candidate(column, field);
                candidates.push(Candidate {
                    column_idx,
                    field: field.name.clone(),
                    confidence,
                });
            }
        }

        // Stable: ties keep column order, then schema order.
        candidates.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });

        let mut assigned_fields = BTreeSet::new();
        let mut assigned_columns = BTreeSet::new();
        let mut suggestions = Vec::new();
        for candidate in candidates {
            if candidate.confidence < self.min_confidence {
                break;
            }
            if assigned_fields.contains(&candidate.field)
                || assigned_columns.contains(&candidate.column_idx)
            {
                continue;
            }
            assigned_fields.insert(candidate.field.clone());
            assigned_columns.insert(candidate.column_idx);
            suggestions.push(Suggestion {
                column: columns[candidate.column_idx].name.clone(),
                field: candidate.field,
                confidence: candidate.confidence,
            });
        }

        let unmapped_columns: Vec<String> = columns
            .iter()
            .enumerate()
            .filter(|(idx, _)| !assigned_columns.contains(idx))
            .map(|(_, column)| column.name.clone())
            .collect();
        debug!(
            suggested = suggestions.len(),
            unmapped = unmapped_columns.len(),
            "suggestions computed"
        );
        SuggestionResult {
            suggestions,
            unmapped_columns,
        }
    }

    fn score_candidate(&self, column: &DetectedColumn, field: &CanonicalField) -> f32 {
        let normalized = normalize_text(&column.name);
        let mut score = 0.0_f64;
        if let Some(patterns) = self.patterns.get(&field.name) {
            for (idx, pattern) in patterns.iter().enumerate() {
                if &normalized == pattern {
                    score = 1.0;
                    break;
                }
                let similarity = jaro_similarity(normalized.chars(), pattern.chars());
                // Index 0 is the field's own name; the rest are aliases.
                let weighted = if idx == 0 {
                    similarity
                } else {
                    similarity * ALIAS_FUZZY_FACTOR
                };
                score = score.max(weighted);
            }
        }
        if !field.field_type.accepts(column.data_type) {
            score *= TYPE_MISMATCH_PENALTY;
        }
        score.clamp(0.0, 1.0) as f32
    }
}

/// Normalized name plus known aliases for every field in the schema.
fn build_field_patterns(schema: &[CanonicalField]) -> BTreeMap<String, Vec<String>> {
    let mut patterns = BTreeMap::new();
    for field in schema {
        let name = field.name.trim();
        if name.is_empty() {
            continue;
        }
        let mut values = vec![normalize_text(name)];
        if let Some((_, aliases)) = FIELD_ALIASES.iter().find(|(target, _)| *target == name) {
            for alias in *aliases {
                let alias = normalize_text(alias);
                if !values.contains(&alias) {
                    values.push(alias);
                }
            }
        }
        patterns.insert(name.to_string(), values);
    }
    patterns
}
