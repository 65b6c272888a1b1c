//! Error types for parsing model labels.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unknown month: {name}")]
    UnknownMonth { name: String },

    #[error("Unknown {what}: {label}")]
    UnknownLabel { what: &'static str, label: String },
}

pub type ModelResult<T> = Result<T, ModelError>;
