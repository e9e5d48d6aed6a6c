use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::scoring::report::DEFAULT_STRONG_MATCH_THRESHOLD;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON taxonomy file. `None` uses the built-in taxonomy.
    pub skill_taxonomy_path: Option<PathBuf>,
    pub strong_match_threshold: u8,
    pub max_upload_bytes: usize,
    pub tesseract_bin: String,
    /// Renders scanned PDF pages to images for OCR.
    pub pdftoppm_bin: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let strong_match_threshold = match lookup("STRONG_MATCH_THRESHOLD") {
            Some(raw) => {
                let value = raw
                    .parse::<u8>()
                    .context("STRONG_MATCH_THRESHOLD must be an integer between 0 and 100")?;
                if value > 100 {
                    bail!("STRONG_MATCH_THRESHOLD must be between 0 and 100, got {value}");
                }
                value
            }
            None => DEFAULT_STRONG_MATCH_THRESHOLD,
        };

        Ok(Config {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            skill_taxonomy_path: lookup("SKILL_TAXONOMY_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            strong_match_threshold,
            max_upload_bytes: match lookup("MAX_UPLOAD_BYTES") {
                Some(raw) => raw
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            tesseract_bin: lookup("TESSERACT_BIN").unwrap_or_else(|| "tesseract".to_string()),
            pdftoppm_bin: lookup("PDFTOPPM_BIN").unwrap_or_else(|| "pdftoppm".to_string()),
        })
    }
}
