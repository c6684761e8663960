#![deny(unsafe_code)]

pub mod error;
pub mod loader;
pub mod paths;
pub mod schema;

pub use crate::error::StandardsError;
pub use crate::loader::parse_schema_csv;
pub use crate::paths::{
    LoadedSchema, SCHEMA_ENV_VAR, SCHEMA_VERSION_ENV_VAR, load_schema, schema_override_path,
    schema_override_version,
};
pub use crate::schema::{SCHEMA_VERSION, canonical_schema, find_field, required_fields};
