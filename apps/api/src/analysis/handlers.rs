//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::pipeline::{analyze_document, analyze_text, AnalysisReport};
use crate::chart::render_score_pie;
use crate::errors::AppError;
use crate::extraction::DocumentKind;
use crate::state::AppState;
use crate::taxonomy::RoleRequirement;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub resume_text: String,
    #[serde(default)]
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct TaxonomyResponse {
    pub roles: Vec<RoleRequirement>,
    pub universe: Vec<String>,
    pub universe_size: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart upload: `resume` (PDF, image, or text file) and optional `jd_text`.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let mut resume: Option<Bytes> = None;
    let mut jd_text = String::new();

    let limit = state.config.max_upload_bytes;
    let upload_error = move |e| AppError::from_multipart(e, limit);

    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("resume") => resume = Some(field.bytes().await.map_err(upload_error)?),
            Some("jd_text") => jd_text = field.text().await.map_err(upload_error)?,
            other => debug!(field = ?other, "Ignoring unknown multipart field"),
        }
    }

    let resume =
        resume.ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;

    let report = analyze_document(
        &resume,
        &jd_text,
        state.extractor.as_ref(),
        &state.taxonomy,
        &state.composer,
    )
    .await?;

    Ok(Json(report))
}

/// POST /api/v1/analyze/text
///
/// Scores resume text that was extracted elsewhere.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }

    Ok(Json(analyze_text(
        &request.resume_text,
        &request.jd_text,
        &state.taxonomy,
        &state.composer,
        DocumentKind::PlainText,
    )))
}

/// GET /api/v1/taxonomy
pub async fn handle_get_taxonomy(State(state): State<AppState>) -> Json<TaxonomyResponse> {
    Json(TaxonomyResponse {
        roles: state.taxonomy.roles().to_vec(),
        universe: state.taxonomy.universe().map(String::from).collect(),
        universe_size: state.taxonomy.universe_size(),
    })
}

/// GET /api/v1/chart/:score
///
/// Returns the ATS score pie chart as SVG.
pub async fn handle_chart(Path(score): Path<u16>) -> Result<impl IntoResponse, AppError> {
    let score = u8::try_from(score)
        .ok()
        .filter(|s| *s <= 100)
        .ok_or_else(|| AppError::Validation(format!("score must be 0-100, got {score}")))?;

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], render_score_pie(score)))
}
