#![deny(unsafe_code)]

//! Column-to-field mapping for campaign data uploads.
//!
//! - [`MappingSession`]: the validator holding one upload's assignment
//! - [`validate_assignment`]: the pure validation rule set
//! - [`SuggestionEngine`]: name-based mapping proposals
//! - [`TemplateRepository`]: JSON-file storage for reusable templates

pub mod assignment;
pub mod error;
pub mod repository;
pub mod session;
pub mod suggest;
pub mod utils;
pub mod validate;

pub use assignment::MappingAssignment;
pub use error::MappingError;
pub use repository::{
    StoredTemplate, TEMPLATE_DIR_ENV_VAR, TemplateMetadata, TemplateRepository, template_dir_or,
};
pub use session::{MappingSession, MappingSummary};
pub use suggest::{
    ConfidenceLevel, ConfidenceThresholds, Suggestion, SuggestionEngine, SuggestionResult,
};
pub use validate::validate_assignment;
