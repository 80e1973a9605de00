pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use quiz_core::{IdGenerator, SequentialIds};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::db::Database;
use crate::services::extract::PlainTextExtractor;
use crate::services::ingest::IngestService;
use crate::services::storage::UploadStorage;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub uploads: Arc<UploadStorage>,
    pub ingest: Arc<IngestService>,
    pub ids: Arc<dyn IdGenerator>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Open the data directory and build every service from the config
    pub async fn open(config: ServerConfig, ids: Arc<dyn IdGenerator>) -> anyhow::Result<Self> {
        let db = Database::open(&config.data_dir).await?;
        let uploads = UploadStorage::new(config.uploads_dir()).await?;
        let ingest = IngestService::new(&config.parsers, Box::new(PlainTextExtractor), ids.clone());

        Ok(Self {
            db: Arc::new(db),
            uploads: Arc::new(uploads),
            ingest: Arc::new(ingest),
            ids,
            config: Arc::new(config),
        })
    }
}

/// Build the router with all routes
pub fn router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/api/admin/upload", post(routes::admin::upload))
        .route("/api/admin/paste", post(routes::admin::paste))
        .route("/api/admin/files", get(routes::admin::files))
        .route("/api/admin/files/:id", delete(routes::admin::delete_file))
        .route("/api/admin/questions", delete(routes::admin::clear_questions))
        .route("/api/admin/debug/:stored_name", get(routes::admin::debug_text))
        .route("/api/admin/reparse", post(routes::admin::reparse))
        .route("/api/admin/export", get(routes::admin::export))
        .route("/api/admin/stats", get(routes::admin::stats))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::admin_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        // Quiz routes
        .route("/api/questions", get(routes::quiz::questions))
        .route(
            "/api/attempts",
            get(routes::attempts::list).post(routes::attempts::create),
        )
        .route("/api/winners", get(routes::attempts::winners))
        .merge(admin_routes)
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    if config.admin_token.is_none() {
        tracing::warn!("ADMIN_TOKEN not set, admin routes are open");
    }

    tracing::info!("Opening data directory {}", config.data_dir.display());
    let state = AppState::open(config, Arc::new(SequentialIds::from_clock())).await?;
    let addr = state.config.addr();

    let app = router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
