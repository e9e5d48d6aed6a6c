use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::extraction::{ocr, ExtractionError};

const RENDER_DPI: u32 = 300;

/// Extracts the text layer of a PDF. Parsing is CPU-bound, so it runs under `spawn_blocking`;
/// a panic inside the parser surfaces as `ExtractionError::Pdf` rather than taking the task down.
pub async fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let owned = bytes.to_vec();
    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&owned))
        .await
        .map_err(|e| ExtractionError::Pdf(format!("parser task failed: {e}")))?
        .map_err(|e| ExtractionError::Pdf(e.to_string()))
}

/// OCRs a PDF with no text layer: `pdftoppm` renders every page to PNG,
/// then each page goes through tesseract in page order.
pub async fn ocr_pdf_pages(
    pdftoppm_bin: &Path,
    tesseract_bin: &Path,
    bytes: &[u8],
) -> Result<String, ExtractionError> {
    let workdir = tempfile::tempdir()?;
    let input = workdir.path().join("resume.pdf");
    tokio::fs::write(&input, bytes).await?;

    let pages_dir = workdir.path().join("pages");
    tokio::fs::create_dir(&pages_dir).await?;

    debug!(bin = %pdftoppm_bin.display(), dpi = RENDER_DPI, "Rendering PDF pages");

    let output = Command::new(pdftoppm_bin)
        .arg("-png")
        .arg("-r")
        .arg(RENDER_DPI.to_string())
        .arg(&input)
        .arg(pages_dir.join("page"))
        .output()
        .await
        .map_err(|e| {
            ExtractionError::Ocr(format!(
                "could not run '{}': {e}",
                pdftoppm_bin.display()
            ))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!(status = %output.status, "pdftoppm exited with failure");
        return Err(ExtractionError::Ocr(format!(
            "pdftoppm exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    let pages = rendered_pages(&pages_dir).await?;
    if pages.is_empty() {
        return Err(ExtractionError::Ocr("pdftoppm produced no page images".to_string()));
    }

    info!(pages = pages.len(), "Running OCR on rendered PDF pages");

    let mut text = String::new();
    for page in &pages {
        text.push_str(&ocr::run_tesseract_on_file(tesseract_bin, page).await?);
        text.push('\n');
    }
    Ok(text)
}

// pdftoppm zero-pads page numbers to a common width, so a path sort is page order.
async fn rendered_pages(dir: &Path) -> Result<Vec<PathBuf>, ExtractionError> {
    let mut pages = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "png") {
            pages.push(path);
        }
    }
    pages.sort();
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_pdftoppm_reports_ocr_error() {
        let err = ocr_pdf_pages(
            Path::new("/nonexistent/bin/pdftoppm"),
            Path::new("tesseract"),
            b"%PDF-1.4\n",
        )
        .await
        .unwrap_err();
        match err {
            ExtractionError::Ocr(msg) => assert!(msg.contains("/nonexistent/bin/pdftoppm")),
            other => panic!("expected OCR error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rendered_pages_are_sorted_pngs() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["page-02.png", "page-10.png", "page-01.png", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        let pages = rendered_pages(dir.path()).await.unwrap();
        let names: Vec<_> = pages
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["page-01.png", "page-02.png", "page-10.png"]);
    }
}
