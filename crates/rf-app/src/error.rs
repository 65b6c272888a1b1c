//! Error types for the rf-app service layer.

use std::path::PathBuf;

/// Unified error for the CLI frontend over the project and model crates.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read project file: {path}")]
    ProjectFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write project file: {path}")]
    ProjectFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unsupported project file extension: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Site not found: {0}")]
    SiteNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for rf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<rf_project::ProjectError> for AppError {
    fn from(err: rf_project::ProjectError) -> Self {
        match err {
            rf_project::ProjectError::Validation(v) => AppError::Validation(v.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<rf_model::ModelError> for AppError {
    fn from(err: rf_model::ModelError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<rf_core::RfError> for AppError {
    fn from(err: rf_core::RfError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
