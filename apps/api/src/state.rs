use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::scoring::report::ReportComposer;
use crate::taxonomy::SkillTaxonomy;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only for the life of the process.
    pub taxonomy: Arc<SkillTaxonomy>,
    pub composer: ReportComposer,
    /// Pluggable text extractor. Default: DocumentExtractor (pdf-extract, pdftoppm, tesseract).
    pub extractor: Arc<dyn TextExtractor>,
}
