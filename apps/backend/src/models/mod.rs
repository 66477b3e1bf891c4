//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export shared types from memory-core
pub use memory_core::{CardStatus, CardView, GameSnapshot, QuizResult, Role, SelectOutcome};

/// Longest accepted flip-back delay.
pub const MAX_FLIP_BACK_DELAY_MS: u64 = 60_000;

/// Request to start a game from generated questions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateGameRequest {
    #[serde(flatten)]
    pub result: QuizResult,
    /// Fixed shuffle seed for reproducible decks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<GameSettingsOverride>,
}

/// Per-game overrides of the server's game settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSettingsOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flip_back_delay_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<Vec<String>>,
}

/// Game state returned by every game endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResponse {
    pub id: Uuid,
    pub summary: String,
    pub created_at: DateTime<Utc>,
    pub game: GameSnapshot,
}

/// Card selection request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectRequest {
    pub position: usize,
}

/// Card selection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectResponse {
    pub outcome: SelectOutcome,
    pub game: GameSnapshot,
}

/// Game deletion result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteGameResponse {
    pub deleted: bool,
}
