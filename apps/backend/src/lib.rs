pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vocab_core::{Clock, ReviewService};

use crate::config::Config;
use crate::db::Database;
use crate::services::vocab::VocabStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn VocabStore>,
    pub reviews: ReviewService<dyn VocabStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn VocabStore>) -> Self {
        Self {
            reviews: ReviewService::new(store.clone()),
            store,
        }
    }

    pub fn with_clock(store: Arc<dyn VocabStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            reviews: ReviewService::with_clock(store.clone(), clock),
            store,
        }
    }
}

/// Build the API router over `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Import routes
        .route("/api/import/preview", post(routes::import::preview))
        .route("/api/import", post(routes::import::import))
        // Study routes
        .route("/api/study/next", post(routes::study::next))
        .route("/api/study/answer", post(routes::study::answer))
        .route("/api/study/choice", post(routes::study::choice))
        // Set routes
        .route("/api/sets/:set_id/summary", get(routes::sets::summary))
        .route("/api/sets/:set_id/export", get(routes::sets::export))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let app = build_router(AppState::new(Arc::new(db)));

    let addr = config.bind_address();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
