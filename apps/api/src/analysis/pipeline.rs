//! Analysis pipeline: extraction → skills → role matching → recommendation, plus JD coverage and chart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::chart::render_score_pie;
use crate::errors::AppError;
use crate::extraction::{DocumentKind, TextExtractor};
use crate::scoring::jd_keywords::{extract_jd_keywords, jd_coverage, JdCoverage};
use crate::scoring::report::{Recommendation, ReportComposer};
use crate::scoring::role_matcher::{match_roles, RoleMatch};
use crate::scoring::skill_extractor::extract_skills;
use crate::taxonomy::SkillTaxonomy;

/// Everything one analysis produces. Nothing is stored after the response is sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub source: DocumentKind,
    pub found_skills: Vec<String>,
    pub role_matches: Vec<RoleMatch>,
    pub ats_score: u8,
    pub jd_coverage: JdCoverage,
    pub recommendation: Recommendation,
    pub chart_svg: String,
}

/// Scores already-extracted resume text.
pub fn analyze_text(
    resume_text: &str,
    jd_text: &str,
    taxonomy: &SkillTaxonomy,
    composer: &ReportComposer,
    source: DocumentKind,
) -> AnalysisReport {
    let analysis_id = Uuid::new_v4();

    let found = extract_skills(resume_text, taxonomy);
    let (role_matches, ats_score) = match_roles(&found, taxonomy);
    let recommendation = composer.recommend(ats_score, &role_matches);

    let keywords = extract_jd_keywords(jd_text);
    let coverage = jd_coverage(&keywords, resume_text);

    info!(
        %analysis_id,
        ?source,
        ats_score,
        skills = found.len(),
        roles = role_matches.len(),
        jd_score = coverage.score,
        tier = ?recommendation.tier,
        "Resume analysed"
    );

    AnalysisReport {
        analysis_id,
        analyzed_at: Utc::now(),
        source,
        found_skills: found.into_iter().collect(),
        role_matches,
        ats_score,
        jd_coverage: coverage,
        recommendation,
        chart_svg: render_score_pie(ats_score),
    }
}

/// Extracts text from an uploaded document, then scores it.
/// Extraction failure short-circuits with the diagnostic; scoring never runs on it.
pub async fn analyze_document(
    bytes: &[u8],
    jd_text: &str,
    extractor: &dyn TextExtractor,
    taxonomy: &SkillTaxonomy,
    composer: &ReportComposer,
) -> Result<AnalysisReport, AppError> {
    let extracted = extractor.extract(bytes).await.map_err(|e| {
        warn!("Resume extraction failed: {e}");
        AppError::Extraction(e.diagnostic())
    })?;

    Ok(analyze_text(
        &extracted.text,
        jd_text,
        taxonomy,
        composer,
        extracted.kind,
    ))
}
