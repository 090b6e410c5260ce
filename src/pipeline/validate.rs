//! Input validation: the gate every submission passes before it is sent.
//!
//! Validators never transform their input. On success they hand back exactly
//! what they were given.

use crate::error::ValidationError;
use crate::submission::{UploadFile, PDF_MEDIA_TYPE};

/// Accept a PDF no larger than `max_bytes`.
pub fn validate_file(file: UploadFile, max_bytes: u64) -> Result<UploadFile, ValidationError> {
    if file.media_type != PDF_MEDIA_TYPE {
        return Err(ValidationError::InvalidType {
            media_type: file.media_type,
        });
    }
    if file.size > max_bytes {
        return Err(ValidationError::TooLarge {
            size: file.size,
            limit: max_bytes,
        });
    }
    Ok(file)
}

/// Accept a topic whose trimmed form is non-empty.
pub fn validate_topic(topic: &str) -> Result<&str, ValidationError> {
    if topic.trim().is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    Ok(topic)
}
