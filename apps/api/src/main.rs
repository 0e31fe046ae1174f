mod config;
mod errors;
mod models;
mod nlp_client;
mod ranking;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::nlp_client::{build_http_client, NerClient, ResumeParserClient};
use crate::ranking::entities::{
    EntityExtractors, NerExtractor, RegexExtractor, StructuredParserExtractor,
};
use crate::ranking::pipeline::{PdfTextExtractor, RankingPipeline};
use crate::ranking::skills::SkillDictionary;
use crate::ranking::storage::UploadStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume ranker v{}", env!("CARGO_PKG_VERSION"));

    let http = build_http_client(config.service_timeout)?;

    let parser = config
        .resume_parser_url
        .as_deref()
        .map(|url| ResumeParserClient::new(http.clone(), url));
    info!("Structured resume parser: {}", if parser.is_some() { "enabled" } else { "disabled" });

    // A failed probe disables NER for the process lifetime; never fatal.
    let ner = match config.ner_service_url.as_deref() {
        Some(url) => NerClient::connect(http.clone(), url).await,
        None => {
            info!("NER service not configured");
            None
        }
    };

    let entities = EntityExtractors {
        structured: Arc::new(StructuredParserExtractor::new(parser)),
        regex: Arc::new(RegexExtractor),
        ner: Arc::new(NerExtractor::new(ner)),
    };

    let skills = Arc::new(SkillDictionary::default());
    let category_names: Vec<&str> = skills.categories().iter().map(|c| c.name.as_str()).collect();
    info!(
        "Skill dictionary loaded: {} skills in [{}]",
        skills.len(),
        category_names.join(", ")
    );

    let pipeline = RankingPipeline::new(
        Arc::new(PdfTextExtractor),
        entities,
        skills,
        config.skills_weight,
        config.resume_timeout,
    );

    let state = AppState {
        uploads: UploadStore::new(config.upload_dir.clone()),
        pipeline: Arc::new(pipeline),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
