//! OCR via the external `tesseract` executable.
//!
//! The image is written to a temp file and `tesseract <file> stdout` is read back.

use std::path::Path;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::extraction::ExtractionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Tiff,
    Bmp,
}

impl ImageFormat {
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Some(Self::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(Self::Gif)
        } else if bytes.starts_with(b"II*\0") || bytes.starts_with(b"MM\0*") {
            Some(Self::Tiff)
        } else if bytes.len() >= 14 && bytes.starts_with(b"BM") && bytes[6..10] == [0, 0, 0, 0]
        {
            Some(Self::Bmp)
        } else {
            None
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Self::Png => ".png",
            Self::Jpeg => ".jpg",
            Self::Gif => ".gif",
            Self::Tiff => ".tiff",
            Self::Bmp => ".bmp",
        }
    }
}

/// OCRs in-memory image bytes by staging them in a temp file.
pub async fn run_tesseract(
    tesseract_bin: &Path,
    bytes: &[u8],
    format: ImageFormat,
) -> Result<String, ExtractionError> {
    let image = tempfile::Builder::new()
        .prefix("resume-")
        .suffix(format.extension())
        .tempfile()?;
    tokio::fs::write(image.path(), bytes).await?;

    debug!(bin = %tesseract_bin.display(), ?format, "Running tesseract");
    run_tesseract_on_file(tesseract_bin, image.path()).await
}

pub async fn run_tesseract_on_file(
    tesseract_bin: &Path,
    image: &Path,
) -> Result<String, ExtractionError> {
    let output = Command::new(tesseract_bin)
        .arg(image)
        .arg("stdout")
        .output()
        .await
        .map_err(|e| {
            ExtractionError::Ocr(format!(
                "could not run '{}': {e}",
                tesseract_bin.display()
            ))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!(status = %output.status, "tesseract exited with failure");
        return Err(ExtractionError::Ocr(format!(
            "tesseract exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
