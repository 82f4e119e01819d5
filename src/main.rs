//! UniNoter Backend
//!
//! REST backend for collaborative note-taking: topics, contributions and generated summaries,
//! persisted in a document store.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod summary;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, StoreKind};
use db::{DocumentStore, MemoryStore, Repository, SqliteStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting UniNoter Backend");
    tracing::info!("Store: {:?}", config.store);
    tracing::info!("Bind address: {}", config.bind_addr);

    let store = open_store(&config).await?;
    let repo = Arc::new(Repository::new(store));

    let state = AppState { repo: repo.clone() };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    repo.close().await;
    tracing::info!("Store closed, shutdown complete");

    Ok(())
}

/// Open the configured document store.
async fn open_store(config: &Config) -> Result<Arc<dyn DocumentStore>, Box<dyn std::error::Error>> {
    match config.store {
        StoreKind::Sqlite => {
            tracing::info!("Database path: {:?}", config.db_path);
            let pool = db::init_database(&config.db_path).await?;
            Ok(Arc::new(SqliteStore::new(pool)))
        }
        StoreKind::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Topics
        .route("/topics", get(api::list_topics).post(api::create_topic))
        .route("/topics/{id}", get(api::get_topic))
        // Contributions
        .route(
            "/topics/{id}/contributions",
            get(api::list_contributions).post(api::create_contribution),
        )
        // Summaries
        .route("/topics/{id}/generate-summary", post(api::create_summary))
        .route("/topics/{id}/summary", get(api::get_summary))
        // Invitations
        .route("/topics/{id}/invite", post(api::invite_users));

    let auth_routes = Router::new()
        .route("/create-account", post(api::create_account))
        .route("/signin", post(api::sign_in));

    Router::new()
        .route("/", get(api::root))
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .nest("/auth", auth_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
