//! In-memory store of running game sessions.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use memory_core::{Color, GameSession, GameSettings, Palette};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::{
    CreateGameRequest, GameResponse, GameSettingsOverride, MAX_FLIP_BACK_DELAY_MS,
};

/// A running game and the data shown next to it.
pub struct GameEntry {
    pub id: Uuid,
    pub summary: String,
    pub created_at: DateTime<Utc>,
    pub session: GameSession,
}

impl GameEntry {
    pub fn to_response(&self) -> GameResponse {
        GameResponse {
            id: self.id,
            summary: self.summary.clone(),
            created_at: self.created_at,
            game: self.session.snapshot(),
        }
    }
}

/// Game sessions keyed by id. Removing a game ends its session.
pub struct GameStore {
    games: RwLock<HashMap<Uuid, Arc<GameEntry>>>,
    defaults: GameSettings,
}

impl GameStore {
    pub fn new(defaults: GameSettings) -> Self {
        Self {
            games: RwLock::new(HashMap::new()),
            defaults,
        }
    }

    /// Parse the questions, shuffle the deck once and register the session.
    pub async fn create(&self, request: CreateGameRequest) -> Result<Arc<GameEntry>> {
        let settings = resolve_settings(&self.defaults, request.settings.as_ref())?;
        let pairs = request.result.pairs();
        let pair_count = pairs.len();

        let session = match request.seed {
            Some(seed) => GameSession::from_pairs_seeded(pairs, seed, settings),
            None => GameSession::from_pairs(pairs, settings),
        };

        let entry = Arc::new(GameEntry {
            id: Uuid::new_v4(),
            summary: request.result.summary_or_default().to_string(),
            created_at: Utc::now(),
            session,
        });

        self.games.write().await.insert(entry.id, entry.clone());
        tracing::info!("Started game {} with {} pairs", entry.id, pair_count);

        Ok(entry)
    }

    pub async fn get(&self, id: Uuid) -> Result<Arc<GameEntry>> {
        self.games
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Game {}", id)))
    }

    /// End a game. Returns whether it existed.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.games.write().await.remove(&id);
        if removed.is_some() {
            tracing::info!("Ended game {}", id);
        }
        removed.is_some()
    }

    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.games.read().await.is_empty()
    }
}

/// Apply request overrides on top of the server defaults.
fn resolve_settings(
    defaults: &GameSettings,
    overrides: Option<&GameSettingsOverride>,
) -> Result<GameSettings> {
    let mut settings = defaults.clone();
    let Some(overrides) = overrides else {
        return Ok(settings);
    };

    if let Some(delay) = overrides.flip_back_delay_ms {
        if delay > MAX_FLIP_BACK_DELAY_MS {
            return Err(ApiError::BadRequest(format!(
                "flip_back_delay_ms must be at most {}",
                MAX_FLIP_BACK_DELAY_MS
            )));
        }
        settings.flip_back_delay_ms = delay;
    }
    if let Some(colors) = &overrides.palette {
        let colors = colors
            .iter()
            .map(|c| Color::parse(c))
            .collect::<memory_core::Result<Vec<_>>>()?;
        settings.palette = Palette::new(colors)?;
    }

    Ok(settings)
}
