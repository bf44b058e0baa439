// src/core/error.rs

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

pub const INVALID_FILE_TYPE_MESSAGE: &str = "Please upload an image file (PNG, JPG, JPEG, or GIF)";
pub const PROCESSING_FAILED_MESSAGE: &str = "An error occurred while processing your image. Please try again.";

/// Everything that can go wrong between a file selection and a rendered result.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Rejected on the client before any network traffic.
    #[error("declared media type `{0}` is not an accepted image type")]
    InvalidFileType(String),

    #[error("request to the analysis service failed: {0}")]
    NetworkFailure(#[source] reqwest::Error),

    #[error("analysis service answered with status {0}")]
    ServerFailure(StatusCode),

    #[error("analysis response did not have the expected shape: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}

impl WorkflowError {
    /// The text shown in the blocking notification for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            WorkflowError::InvalidFileType(_) => INVALID_FILE_TYPE_MESSAGE,
            WorkflowError::NetworkFailure(_)
            | WorkflowError::ServerFailure(_)
            | WorkflowError::MalformedResponse(_) => PROCESSING_FAILED_MESSAGE,
        }
    }
}

/// Failure to turn a picked or dropped path into a pending file.
#[derive(Debug, Error)]
pub enum PickError {
    #[error("could not read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a file", .0.display())]
    NotAFile(PathBuf),
}

impl PickError {
    pub fn path(&self) -> &PathBuf {
        match self {
            PickError::Unreadable { path, .. } | PickError::NotAFile(path) => path,
        }
    }
}

/// Failure to read a preview payload.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("preview task did not complete: {0}")]
    Interrupted(String),
}
