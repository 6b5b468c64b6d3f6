//! AstroPsyche service entrypoint.
//!
//! Loads configuration, wires adapters to handlers, and serves the
//! questionnaire API over HTTP.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use astropsyche::adapters::ai::{AnthropicConfig, AnthropicGenerator, MockGenerator};
use astropsyche::adapters::http::{questionnaire_routes, QuestionnaireHandlers};
use astropsyche::adapters::postgres::{PostgresQuestionnaireStore, PostgresSessionRepository};
use astropsyche::adapters::storage::FileAnswerCache;
use astropsyche::application::handlers::questionnaire::{
    CompleteQuestionnaireHandler, GenerateReportHandler, NextQuestionHandler,
    StartQuestionnaireHandler, SubmitAnswerHandler,
};
use astropsyche::config::AppConfig;
use astropsyche::domain::analysis::{Lexicon, ResponseAnalyzer};
use astropsyche::domain::profile::ProfileAggregator;
use astropsyche::ports::TextGenerator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.log_level))
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        "starting astropsyche"
    );

    // Persistence
    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;

    let repository = Arc::new(PostgresSessionRepository::new(pool.clone()));
    let store = Arc::new(PostgresQuestionnaireStore::new(pool));
    let cache = Arc::new(FileAnswerCache::new(&config.analysis.cache_dir));

    // Text generation; without a key the mock keeps dev flows working and
    // the handlers' fallback questions cover the rest.
    let generator: Arc<dyn TextGenerator> = match &config.ai.anthropic_api_key {
        Some(key) if !key.is_empty() => {
            let anthropic_config = AnthropicConfig::new(key.clone())
                .with_model(config.ai.model.clone())
                .with_timeout(config.ai.timeout())
                .with_max_retries(config.ai.max_retries);
            Arc::new(AnthropicGenerator::new(anthropic_config)?)
        }
        _ => {
            tracing::warn!("no generation API key configured, using mock generator");
            Arc::new(MockGenerator::new())
        }
    };

    // Domain services
    let analyzer = ResponseAnalyzer::new(
        Lexicon::default(),
        config.analysis.authenticity_formula,
    );
    let aggregator = ProfileAggregator::default();

    // Handlers
    let handlers = QuestionnaireHandlers::new(
        Arc::new(
            StartQuestionnaireHandler::new(repository.clone())
                .with_default_threshold(config.analysis.completion_threshold),
        ),
        Arc::new(SubmitAnswerHandler::new(
            repository.clone(),
            store.clone(),
            cache.clone(),
            analyzer,
        )),
        Arc::new(NextQuestionHandler::new(
            repository.clone(),
            generator.clone(),
        )),
        Arc::new(CompleteQuestionnaireHandler::new(
            repository,
            store.clone(),
            cache,
            aggregator,
        )),
        Arc::new(GenerateReportHandler::new(store, generator)),
    );

    let cors = if config.server.cors_origins_list().is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        let origins: Vec<axum::http::HeaderValue> = config
            .server
            .cors_origins_list()
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins).allow_methods(Any).allow_headers(Any)
    };

    let app = Router::new()
        .nest("/api/questionnaire", questionnaire_routes(handlers))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
