/// Image intake
///
/// Validates user-selected files by their declared MIME type and turns
/// accepted ones into base64 + data URI form for preview and upload.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::state::data::{EncodedImage, ImageFile};

/// Extensions offered by the file picker filter
pub const PICKER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

#[derive(Debug, Clone, Error)]
pub enum IntakeError {
    #[error("{file_name} is not an image (declared type: {declared})")]
    NotAnImage { file_name: String, declared: String },
    #[error("could not read {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },
}

/// MIME type a browser would declare for this file, from its extension
pub fn declared_mime_type(path: &Path) -> Option<String> {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string())
}

/// Validate a picked or dropped file. Does not touch the file contents.
pub fn inspect(path: &Path) -> Result<ImageFile, IntakeError> {
    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    match declared_mime_type(path) {
        Some(mime) if mime.starts_with("image/") => Ok(ImageFile {
            path: path.to_path_buf(),
            file_name,
            mime_type: mime,
        }),
        other => Err(IntakeError::NotAnImage {
            file_name,
            declared: other.unwrap_or_else(|| "unknown".to_string()),
        }),
    }
}

/// Read the file and base64-encode it
pub async fn encode(file: ImageFile) -> Result<EncodedImage, IntakeError> {
    let bytes = tokio::fs::read(&file.path)
        .await
        .map_err(|e| IntakeError::Read {
            path: file.path.clone(),
            reason: e.to_string(),
        })?;

    let base64 = STANDARD.encode(&bytes);
    info!(
        "📥 Encoded {} ({} bytes, {} base64 chars)",
        file.file_name,
        bytes.len(),
        base64.len()
    );

    Ok(EncodedImage {
        mime_type: file.mime_type,
        base64,
    })
}

pub fn data_uri(mime_type: &str, base64: &str) -> String {
    format!("data:{};base64,{}", mime_type, base64)
}

/// Split a base64 data URI into its MIME type and decoded bytes
pub fn parse_data_uri(uri: &str) -> Option<(String, Vec<u8>)> {
    let rest = uri.strip_prefix("data:")?;
    let (mime_type, payload) = rest.split_once(";base64,")?;
    let bytes = STANDARD.decode(payload).ok()?;
    Some((mime_type.to_string(), bytes))
}
