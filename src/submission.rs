//! Data types shared across the pipeline: what the user submits and what the
//! endpoint answers.

use serde::Deserialize;
use std::fmt;

/// Media type every upload must carry.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// A file chosen by the user, before or after validation.
///
/// `size` is the size the file reported when it was picked; validation is
/// done against it rather than against `bytes.len()`.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub size: u64,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Build an upload whose size is the length of `bytes`.
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            media_type: media_type.into(),
            bytes,
        }
    }
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("media_type", &self.media_type)
            .field("bytes", &format_args!("<{} bytes>", self.bytes.len()))
            .finish()
    }
}

/// The input sent to the endpoint. Exactly one variant per submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// A validated PDF upload.
    Pdf(UploadFile),
    /// A free-text topic; stored trimmed.
    Text { topic: String },
}

impl Submission {
    /// Build a text submission, trimming the topic.
    pub fn text(topic: &str) -> Self {
        Submission::Text {
            topic: topic.trim().to_string(),
        }
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Submission::Pdf(_) => "pdf",
            Submission::Text { .. } => "text",
        }
    }
}

/// JSON body returned by the summarization endpoint.
///
/// Either `summary` or `error` is expected; both are optional here so a
/// malformed body can be reported precisely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_submission_is_trimmed() {
        assert_eq!(
            Submission::text("  breast cancer immunotherapy \n"),
            Submission::Text {
                topic: "breast cancer immunotherapy".into()
            }
        );
    }

    #[test]
    fn upload_size_tracks_bytes() {
        let f = UploadFile::new("paper.pdf", PDF_MEDIA_TYPE, b"%PDF-1.7".to_vec());
        assert_eq!(f.size, 8);
        assert!(format!("{f:?}").contains("<8 bytes>"));
    }

    #[test]
    fn response_parses_either_field() {
        let ok: SummaryResponse = serde_json::from_str(r#"{"summary":"hi"}"#).unwrap();
        assert_eq!(ok.summary.as_deref(), Some("hi"));
        assert!(ok.error.is_none());

        let err: SummaryResponse =
            serde_json::from_str(r#"{"error":"No text or PDF provided"}"#).unwrap();
        assert_eq!(err.error.as_deref(), Some("No text or PDF provided"));
    }
}
