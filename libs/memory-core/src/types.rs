//! Core types for the memory game.

use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Which face of a pair a card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Question,
    Answer,
}

/// One question/answer unit. The question text is the pair identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub question: String,
    pub answer: String,
}

impl Pair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Identity shared by both cards of this pair.
    pub fn id(&self) -> &str {
        &self.question
    }

    /// Expand into the question card followed by the answer card.
    pub fn into_cards(self) -> [Card; 2] {
        let pair_id = self.question.clone();
        [
            Card {
                text: self.question,
                pair_id: pair_id.clone(),
                role: Role::Question,
            },
            Card {
                text: self.answer,
                pair_id,
                role: Role::Answer,
            },
        ]
    }
}

/// A single face of a pair placed at one deck position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub text: String,
    pub pair_id: String,
    pub role: Role,
}

impl Card {
    /// Two cards match when they belong to the same pair and show different faces.
    pub fn matches(&self, other: &Card) -> bool {
        self.pair_id == other.pair_id && self.role != other.role
    }
}

/// Display status of a deck position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    Hidden,
    Flipped,
    Matched,
}

impl Default for CardStatus {
    fn default() -> Self {
        Self::Hidden
    }
}

impl CardStatus {
    /// Whether the card face is shown.
    pub fn is_face_up(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// Everything a renderer needs to draw one deck position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub position: usize,
    pub role: Role,
    /// Card text, withheld while the card is hidden.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub status: CardStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// Color tag assigned to a matched pair (any CSS color string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// Validate and wrap a color string.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.contains(|c: char| c.is_whitespace() || c == ',') {
            return Err(GameError::InvalidColor {
                value: value.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Color {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Default colors handed out to matched pairs, in order.
pub const DEFAULT_COLORS: [&str; 6] = [
    "#B4D8C6", "#F8D7AA", "#E6953E", "#ADD8E6", "#FFC1C1", "#FFF5BA",
];

/// Non-empty ordered list of colors, reused cyclically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Create a palette, rejecting an empty color list.
    pub fn new(colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(GameError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Parse a comma separated list such as `#fff, #000`.
    pub fn parse_list(list: &str) -> Result<Self> {
        let colors = list
            .split(',')
            .filter(|c| !c.trim().is_empty())
            .map(Color::parse)
            .collect::<Result<Vec<_>>>()?;
        Self::new(colors)
    }

    /// Color for the n-th matched pair, wrapping around the palette.
    pub fn color_for(&self, index: usize) -> &Color {
        &self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS
                .iter()
                .map(|c| Color((*c).to_string()))
                .collect(),
        }
    }
}

impl TryFrom<Vec<Color>> for Palette {
    type Error = GameError;

    fn try_from(colors: Vec<Color>) -> Result<Self> {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<Color> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

/// Tunables for a game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    /// How long an unresolved pair stays face-up.
    pub flip_back_delay_ms: u64,
    pub palette: Palette,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            flip_back_delay_ms: 1000,
            palette: Palette::default(),
        }
    }
}

impl GameSettings {
    pub fn flip_back_delay(&self) -> Duration {
        Duration::from_millis(self.flip_back_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_expands_question_then_answer() {
        let [q, a] = Pair::new("Q1", "A1").into_cards();
        assert_eq!(q.role, Role::Question);
        assert_eq!(q.text, "Q1");
        assert_eq!(a.role, Role::Answer);
        assert_eq!(a.text, "A1");
        assert_eq!(q.pair_id, "Q1");
        assert_eq!(a.pair_id, "Q1");
    }

    #[test]
    fn cards_match_only_across_roles() {
        let [q1, a1] = Pair::new("Q1", "A1").into_cards();
        let [q2, _] = Pair::new("Q2", "A2").into_cards();
        assert!(q1.matches(&a1));
        assert!(a1.matches(&q1));
        assert!(!q1.matches(&q1.clone()));
        assert!(!q1.matches(&q2));
    }

    #[test]
    fn identical_question_and_answer_text_still_needs_both_roles() {
        let [q, a] = Pair::new("same", "same").into_cards();
        assert!(q.matches(&a));
        assert!(!q.matches(&q.clone()));
    }

    #[test]
    fn palette_cycles() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 6);
        assert_eq!(palette.color_for(0).as_str(), "#B4D8C6");
        assert_eq!(palette.color_for(6), palette.color_for(0));
        assert_eq!(palette.color_for(7).as_str(), "#F8D7AA");
    }

    #[test]
    fn empty_palette_rejected() {
        assert_eq!(Palette::new(vec![]), Err(GameError::EmptyPalette));
        assert_eq!(Palette::parse_list(" , "), Err(GameError::EmptyPalette));
    }

    #[test]
    fn palette_parse_list() {
        let palette = Palette::parse_list("red, #00ff00 ,blue").unwrap();
        let names: Vec<&str> = palette.colors().iter().map(Color::as_str).collect();
        assert_eq!(names, vec!["red", "#00ff00", "blue"]);
    }

    #[test]
    fn invalid_color_rejected() {
        assert!(matches!(
            Color::parse("light blue"),
            Err(GameError::InvalidColor { .. })
        ));
        assert!(Color::parse("   ").is_err());
    }

    #[test]
    fn settings_serde_defaults() {
        let settings = GameSettings::default();
        assert_eq!(settings.flip_back_delay(), Duration::from_millis(1000));

        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["palette"][0], "#B4D8C6");

        let empty = serde_json::json!({ "flip_back_delay_ms": 10, "palette": [] });
        assert!(serde_json::from_value::<GameSettings>(empty).is_err());
    }

    #[test]
    fn status_face_up() {
        assert!(!CardStatus::Hidden.is_face_up());
        assert!(CardStatus::Flipped.is_face_up());
        assert!(CardStatus::Matched.is_face_up());
    }
}
