//! Core library for the question/answer memory game.
//!
//! Provides:
//! - Text parser turning generated questions into question/answer pairs
//! - Deck builder with a uniform, seedable shuffle computed once per session
//! - Match engine tracking flipped and matched cards plus pair colors
//! - Game session scheduling the flip-back of unresolved cards on tokio
//! - Shared types (Pair, Card, CardStatus, Palette, etc.)

pub mod deck;
pub mod engine;
pub mod error;
pub mod parser;
pub mod session;
pub mod types;

pub use deck::{Deck, DeckBuilder};
pub use engine::{IgnoreReason, MatchEngine, SelectOutcome};
pub use error::{GameError, Result};
pub use parser::{parse, QuizResult, ANSWER_PLACEHOLDER, SUMMARY_PLACEHOLDER};
pub use session::{GameSession, GameSnapshot};
pub use types::{Card, CardStatus, CardView, Color, GameSettings, Pair, Palette, Role};
