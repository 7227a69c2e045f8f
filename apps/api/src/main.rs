mod config;
mod db;
mod errors;
mod matching;
mod models;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::db::create_pool;
use crate::matching::normalizer::{AliasTable, KeywordNormalizer};
use crate::matching::ranker::RecommendationRanker;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing or malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Match API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (resume + job stores, read-only)
    let db = create_pool(&config.database_url, config.database_max_connections).await?;
    let store = Arc::new(PgStore::new(db));

    // Alias table: built-in, overlaid by SKILL_ALIAS_FILE when set
    let aliases = AliasTable::load(config.alias_file.as_deref())?;
    info!(
        "Alias table loaded ({} entries, overlay: {:?})",
        aliases.len(),
        config.alias_file
    );
    let normalizer = Arc::new(KeywordNormalizer::new(aliases));

    // Initialize ranker with the configured scorer (overlap by default, swap via MATCH_SCORER)
    let ranker = RecommendationRanker::new(Arc::from(config.scorer.build()))
        .with_parallel_threshold(config.parallel_threshold);
    info!(
        "Scorer: {} (parallel above {} items)",
        ranker.scorer_name(),
        config.parallel_threshold
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        resumes: store.clone(),
        jobs: store,
        normalizer,
        ranker: Arc::new(ranker),
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
