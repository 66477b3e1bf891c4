//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wrapping the application router and its game store
//! - Helper functions for creating game requests and locating cards

pub mod fixtures;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use memory_core::GameSettings;

use memory_game_backend::config::Config;
use memory_game_backend::services::games::GameStore;
use memory_game_backend::{app, AppState};

/// Flip-back delay used by integration tests.
pub const TEST_FLIP_BACK_DELAY_MS: u64 = 50;

/// Test context holding the router and the store behind it.
pub struct TestContext {
    pub games: Arc<GameStore>,
    app: Router,
}

impl TestContext {
    /// Create a context with a short flip-back delay.
    pub fn new() -> Self {
        Self::with_settings(GameSettings {
            flip_back_delay_ms: TEST_FLIP_BACK_DELAY_MS,
            ..GameSettings::default()
        })
    }

    /// Create a context with custom game defaults.
    pub fn with_settings(game: GameSettings) -> Self {
        let config = Config {
            game,
            ..Config::default()
        };
        let state = AppState::new(&config);
        let games = state.games.clone();

        Self {
            games,
            app: app(state),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }
}

/// Advance past the flip-back delay and let the timer task run.
///
/// Call from tests on a paused clock (`#[tokio::test(start_paused = true)]`).
pub async fn wait_for_flip_back() {
    tokio::time::sleep(Duration::from_millis(TEST_FLIP_BACK_DELAY_MS + 1)).await;
    tokio::task::yield_now().await;
}
