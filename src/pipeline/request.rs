//! Request building: package a [`Submission`] as a multipart form.
//!
//! The form always carries exactly one field. It is described first as a
//! plain [`FormField`] so the shape of the request can be inspected without
//! going through `reqwest`, then turned into a [`Form`].

use crate::error::ExplainerError;
use crate::submission::{Submission, PDF_MEDIA_TYPE};
use reqwest::multipart::{Form, Part};

/// Multipart field name for uploads.
pub const PDF_FIELD: &str = "pdf";
/// Multipart field name for text topics.
pub const TOPIC_FIELD: &str = "topic";

/// The single field a submission turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    File {
        name: &'static str,
        file_name: String,
        media_type: &'static str,
        bytes: Vec<u8>,
    },
    Text {
        name: &'static str,
        value: String,
    },
}

impl FormField {
    /// Multipart field name.
    pub fn name(&self) -> &'static str {
        match self {
            FormField::File { name, .. } | FormField::Text { name, .. } => name,
        }
    }
}

/// Describe the form field for a submission. Topics are trimmed.
pub fn form_field(submission: Submission) -> FormField {
    match submission {
        Submission::Pdf(file) => FormField::File {
            name: PDF_FIELD,
            file_name: file.name,
            media_type: PDF_MEDIA_TYPE,
            bytes: file.bytes,
        },
        Submission::Text { topic } => FormField::Text {
            name: TOPIC_FIELD,
            value: topic.trim().to_string(),
        },
    }
}

/// Build the multipart form sent to the endpoint.
pub fn build_form(submission: Submission) -> Result<Form, ExplainerError> {
    let form = match form_field(submission) {
        FormField::File {
            name,
            file_name,
            media_type,
            bytes,
        } => {
            let part = Part::bytes(bytes)
                .file_name(file_name)
                .mime_str(media_type)
                .map_err(|e| ExplainerError::TransportError {
                    reason: format!("invalid media type: {e}"),
                })?;
            Form::new().part(name, part)
        }
        FormField::Text { name, value } => Form::new().text(name, value),
    };
    Ok(form)
}
