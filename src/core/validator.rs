// src/core/validator.rs

use crate::core::error::WorkflowError;
use crate::core::models::PendingFile;
use tracing::debug;

/// Media types accepted for analysis. `image/jpg` is not registered but some
/// platforms still declare it for `.jpg` files.
pub const ACCEPTED_MEDIA_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/jpg"];

/// Checks the caller-declared media type of a file against the allow-set.
///
/// Only the declared metadata is inspected; the payload is never sniffed, so
/// this is a convenience check and the analysis service stays authoritative.
pub fn validate(file: &PendingFile) -> Result<(), WorkflowError> {
    if is_accepted_type(&file.media_type) {
        Ok(())
    } else {
        debug!(name = %file.name, media_type = %file.media_type, "Rejected file type.");
        Err(WorkflowError::InvalidFileType(file.media_type.clone()))
    }
}

pub fn is_accepted_type(media_type: &str) -> bool {
    ACCEPTED_MEDIA_TYPES.contains(&media_type)
}
