//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use auth::{PgAuthRepository, auth_router, profile_router};
use axum::{
    Json, Router,
    http::{self, Method, header},
    routing::get,
};
use learnpath::{
    ContentSource, MockCurriculumGenerator, OpenAiCurriculumGenerator, PgLearningPathRepository,
    learnpath_router,
};
use platform::rate_limit::FixedWindowRateLimiter;
use roadmap::{RoadmapCatalog, roadmap_router};
use serde_json::{Value, json};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AiMode, AppConfig};

const RATE_LIMIT_SWEEP_PERIOD: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,learnpath=info,auth=info,roadmap=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout)
        .connect(&config.database.url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: remove expired auth sessions
    // Errors here should not prevent server startup
    let auth_repo = PgAuthRepository::new(pool.clone());
    match auth_repo.cleanup_expired().await {
        Ok(sessions) => {
            tracing::info!(
                sessions_deleted = sessions,
                "Auth session cleanup completed"
            );
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Auth session cleanup failed, continuing anyway"
            );
        }
    }

    // Content source, fixed for the lifetime of the process
    let content_source = match config.ai.clone() {
        AiMode::Mock { latency_ms } => {
            ContentSource::Mock(MockCurriculumGenerator::new().with_latency(latency_ms))
        }
        AiMode::OpenAi(openai) => ContentSource::OpenAi(OpenAiCurriculumGenerator::new(openai)?),
    };
    tracing::info!(source = content_source.name(), "Content source selected");

    let limiter = Arc::new(FixedWindowRateLimiter::new());
    limiter.spawn_sweeper(RATE_LIMIT_SWEEP_PERIOD);

    let catalog = RoadmapCatalog::embedded()?;
    tracing::info!(roadmaps = catalog.len(), "Roadmap catalog loaded");

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    let api = learnpath_router(
        PgLearningPathRepository::new(pool.clone()),
        content_source,
        limiter,
        config.learnpath.clone(),
    )
    .merge(auth_router(auth_repo.clone(), config.auth.clone()))
    .merge(profile_router(auth_repo, config.auth.clone()))
    .merge(roadmap_router(catalog));

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", config.bind_address);

    let listener = TcpListener::bind(config.bind_address).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
