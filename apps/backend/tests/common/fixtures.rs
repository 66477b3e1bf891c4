//! Test fixtures and factory functions for creating test data.

use memory_core::{parse, Card, DeckBuilder, Role};
use serde_json::json;

/// Generate question text with the given number of question/answer pairs.
pub fn sample_questions(num_pairs: usize) -> String {
    (1..=num_pairs)
        .map(|i| format!("Question {}?\nAnswer {}.", i, i))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Create a game request body with a fixed seed.
pub fn create_game_request(questions: &str, seed: u64) -> serde_json::Value {
    json!({
        "questions": questions,
        "summary": "A short summary",
        "seed": seed
    })
}

/// Create a select request body.
pub fn select_request(position: usize) -> serde_json::Value {
    json!({ "position": position })
}

/// Deck the server builds for this text and seed.
pub fn expected_deck(questions: &str, seed: u64) -> Vec<Card> {
    DeckBuilder::with_seed(parse(questions), seed)
        .into_deck()
        .cards()
        .to_vec()
}

/// Position of the card with the given pair and role.
pub fn position_of(deck: &[Card], pair_id: &str, role: Role) -> usize {
    deck.iter()
        .position(|c| c.pair_id == pair_id && c.role == role)
        .expect("card in deck")
}
