/// Saving the generated design to disk
///
/// The service may answer with JPEG or WebP; the saved file is always a
/// real PNG so that the fixed `.png` name is truthful.

use image::ImageFormat;
use std::io::Cursor;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

use crate::intake::parse_data_uri;

#[derive(Debug, Clone, Error)]
pub enum DownloadError {
    #[error("generated image is not a base64 data URI")]
    InvalidDataUri,
    #[error("could not convert generated image to PNG: {0}")]
    Convert(String),
    #[error("could not write {}: {reason}", .path.display())]
    Write { path: PathBuf, reason: String },
}

/// Decode a data URI and return PNG bytes, re-encoding when needed
pub fn to_png_bytes(data_uri: &str) -> Result<Vec<u8>, DownloadError> {
    let (mime_type, bytes) = parse_data_uri(data_uri).ok_or(DownloadError::InvalidDataUri)?;
    if mime_type == "image/png" {
        return Ok(bytes);
    }

    let img = image::load_from_memory(&bytes).map_err(|e| DownloadError::Convert(e.to_string()))?;
    let mut png = Cursor::new(Vec::new());
    img.write_to(&mut png, ImageFormat::Png)
        .map_err(|e| DownloadError::Convert(e.to_string()))?;

    info!("🔁 Converted {} result to PNG", mime_type);
    Ok(png.into_inner())
}

/// Write the generated image to `destination` as PNG
pub async fn save_png(data_uri: String, destination: PathBuf) -> Result<PathBuf, DownloadError> {
    // Decoding/re-encoding is CPU-bound
    let png = tokio::task::spawn_blocking(move || to_png_bytes(&data_uri))
        .await
        .map_err(|e| DownloadError::Convert(format!("Task join error: {}", e)))??;

    let write_error = |e: std::io::Error| DownloadError::Write {
        path: destination.clone(),
        reason: e.to_string(),
    };

    if let Some(parent) = destination.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
    }
    tokio::fs::write(&destination, &png).await.map_err(write_error)?;

    info!("💾 Saved design to {} ({} bytes)", destination.display(), png.len());
    Ok(destination)
}
