use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown column data type: {0}")]
    UnknownDataType(String),
    #[error("unknown canonical field type: {0}")]
    UnknownFieldType(String),
    #[error("confidence score out of range: {0}")]
    ConfidenceOutOfRange(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
