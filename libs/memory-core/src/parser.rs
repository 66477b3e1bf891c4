//! Parser for generated question text.
//!
//! # Format
//! ```text
//! What is Rust?
//! A systems programming language.
//!
//! What is borrowing?
//! Taking a reference without taking ownership.
//! ```
//!
//! Blank lines are ignored. Remaining lines alternate question, answer.

use crate::types::Pair;
use serde::{Deserialize, Serialize};

/// Answer used when the last question has no following line.
pub const ANSWER_PLACEHOLDER: &str = "Answer not available";

/// Summary used when the generator returned none.
pub const SUMMARY_PLACEHOLDER: &str = "Summary not available";

/// Parse raw text into question/answer pairs.
pub fn parse(text: &str) -> Vec<Pair> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    lines
        .chunks(2)
        .map(|chunk| Pair::new(chunk[0], chunk.get(1).copied().unwrap_or(ANSWER_PLACEHOLDER)))
        .collect()
}

/// Output of the upstream question generator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizResult {
    #[serde(default)]
    pub questions: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl QuizResult {
    /// Question/answer pairs, empty when no questions were generated.
    pub fn pairs(&self) -> Vec<Pair> {
        self.questions.as_deref().map(parse).unwrap_or_default()
    }

    /// Summary text for display.
    pub fn summary_or_default(&self) -> &str {
        match self.summary.as_deref() {
            Some(summary) if !summary.is_empty() => summary,
            _ => SUMMARY_PLACEHOLDER,
        }
    }
}
