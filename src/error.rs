//! Error types for the paper-explainer library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ValidationError`] — **Pre-submission**: the user's input is not
//!   acceptable (wrong file type, too large, empty topic). Recovered locally:
//!   the view shows the message and nothing is sent.
//!
//! * [`ExplainerError`] — **Post-submission or environmental**: the request
//!   went out and failed, the clipboard refused the copy, a file could not be
//!   read, or the configuration is invalid.
//!
//! Every variant is terminal for the current attempt. Nothing in this crate
//! retries.

use std::path::PathBuf;
use thiserror::Error;

/// Reasons a candidate input is rejected before submission.
///
/// The `Display` text is the message shown in the error banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The file's media type is not `application/pdf`.
    #[error("Please select a PDF file")]
    InvalidType { media_type: String },

    /// The file exceeds the upload ceiling.
    #[error("File size must be less than {}", size_label(.limit))]
    TooLarge { size: u64, limit: u64 },

    /// The topic is empty once trimmed.
    #[error("Please enter some text to analyze")]
    EmptyInput,

    /// Submit was triggered on the PDF tab without a file.
    #[error("Please upload a PDF file or switch to text input")]
    NoFileSelected,
}

/// Render an upload ceiling: whole megabytes (rounded up), or bytes below 1 MiB.
fn size_label(limit: &u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if *limit < MIB {
        format!("{limit} bytes")
    } else {
        format!("{}MB", limit.div_ceil(MIB))
    }
}

/// Errors raised once a submission has been attempted, plus environmental
/// faults (clipboard, file system, configuration).
#[derive(Debug, Error)]
pub enum ExplainerError {
    // ── Transport errors ──────────────────────────────────────────────────
    /// The endpoint answered with a non-2xx status.
    #[error("Server error: {status}")]
    ServerError { status: u16 },

    /// The endpoint answered 2xx but the body carried an `error` field.
    #[error("{message}")]
    ApplicationError { message: String },

    /// The request never completed or the body could not be understood.
    #[error("Network error: {reason}")]
    TransportError { reason: String },

    // ── Local errors ──────────────────────────────────────────────────────
    /// Copy-to-clipboard failed.
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    /// A file chosen for upload could not be read.
    #[error("Failed to read '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ExplainerError {
    /// Whether the fault happened after the request was handed to the transport.
    pub fn is_submission_fault(&self) -> bool {
        matches!(
            self,
            ExplainerError::ServerError { .. }
                | ExplainerError::ApplicationError { .. }
                | ExplainerError::TransportError { .. }
        )
    }
}

/// Copy-to-clipboard failures. Non-fatal: surfaced through the banner.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// Nothing has been rendered yet.
    #[error("No summary to copy")]
    NothingToCopy,

    /// Writing the clipboard escape sequence to the terminal failed.
    #[error("Failed to write to clipboard: {0}")]
    Write(#[from] std::io::Error),
}
