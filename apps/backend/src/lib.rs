pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::games::GameStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub games: Arc<GameStore>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            games: Arc::new(GameStore::new(config.game.clone())),
        }
    }
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/games", post(routes::games::create))
        .route(
            "/api/games/:id",
            get(routes::games::get).delete(routes::games::delete),
        )
        .route("/api/games/:id/select", post(routes::games::select))
        .route("/api/games/:id/flip-back", post(routes::games::flip_back))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
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

    let config = Config::from_env()?;
    tracing::info!(
        "Flip-back delay {}ms, palette of {} colors",
        config.game.flip_back_delay_ms,
        config.game.palette.len()
    );

    let app = app(AppState::new(&config));

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
