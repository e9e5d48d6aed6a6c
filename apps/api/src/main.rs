use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ats_api::config::Config;
use ats_api::extraction::DocumentExtractor;
use ats_api::routes::build_router;
use ats_api::scoring::report::ReportComposer;
use ats_api::state::AppState;
use ats_api::taxonomy::SkillTaxonomy;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so RUST_LOG from .env applies to the subscriber
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS API v{}", env!("CARGO_PKG_VERSION"));

    let taxonomy = SkillTaxonomy::load(config.skill_taxonomy_path.as_deref())
        .context("Failed to load skill taxonomy")?;

    let composer = ReportComposer::new(config.strong_match_threshold);
    info!(
        "Strong match threshold: {}%",
        composer.strong_match_threshold
    );

    let extractor = Arc::new(DocumentExtractor::new(
        &config.tesseract_bin,
        &config.pdftoppm_bin,
    ));
    info!(
        "Text extractor initialized (OCR via {}, PDF pages via {})",
        config.tesseract_bin, config.pdftoppm_bin
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        taxonomy: Arc::new(taxonomy),
        composer,
        extractor,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
