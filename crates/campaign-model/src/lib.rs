pub mod column;
pub mod error;
pub mod field;
pub mod options;
pub mod template;
pub mod validation;

pub use column::{ColumnDataType, DetectedColumn};
pub use error::{ModelError, Result};
pub use field::{CanonicalField, FieldType};
pub use options::{ReferencePolicy, SessionOptions};
pub use template::{MappingSubmission, MappingTemplate};
pub use validation::{IssueSeverity, MappingIssue, TypeMismatch, ValidationResult};
