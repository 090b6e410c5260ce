//! Input loading: turn a user-supplied path into an [`UploadFile`].
//!
//! This is the terminal counterpart of dropping a file on the upload zone or
//! picking it from a file dialog. The media type is determined here, the way
//! a browser would attach one to a `File`: the `%PDF` magic bytes win, and the
//! file extension is the fallback. Whether the type is acceptable is decided
//! later by [`crate::pipeline::validate`].

use crate::error::ExplainerError;
use crate::submission::{UploadFile, PDF_MEDIA_TYPE};
use std::path::Path;
use tracing::debug;

/// Read a local file into an [`UploadFile`].
pub async fn load_upload(path: impl AsRef<Path>) -> Result<UploadFile, ExplainerError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ExplainerError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload".to_string());
    let media_type = sniff_media_type(&name, &bytes);

    debug!(
        "Loaded {} ({} bytes, {})",
        path.display(),
        bytes.len(),
        media_type
    );
    Ok(UploadFile::new(name, media_type, bytes))
}

/// Determine the media type from content first, then from the file name.
pub fn sniff_media_type(name: &str, bytes: &[u8]) -> &'static str {
    if bytes.starts_with(b"%PDF") {
        return PDF_MEDIA_TYPE;
    }
    media_type_from_extension(name)
}

/// Infer a media type from the file extension.
fn media_type_from_extension(name: &str) -> &'static str {
    let ext = match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => return "application/octet-stream",
    };

    match ext.as_str() {
        "pdf" => PDF_MEDIA_TYPE,
        "txt" | "md" => "text/plain",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "json" => "application/json",
        "html" | "htm" => "text/html",
        _ => "application/octet-stream",
    }
}
