//! Match engine for a memory game session.
//!
//! Each deck position moves `Hidden -> Flipped -> (Matched | Hidden)`.
//! At most two positions are flipped at a time. A second flip resolves the
//! pair immediately: a match moves both cards to the matched set, a mismatch
//! leaves them flipped. Either way no further card can be selected until
//! [`MatchEngine::clear_flipped`] is called. Matched cards stay face-up for
//! the rest of the session.

use crate::deck::Deck;
use crate::types::{Card, CardStatus, CardView, Color, Palette};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Why a selection had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    OutOfRange,
    TwoFlipped,
    AlreadyFlipped,
    AlreadyMatched,
}

/// Result of selecting a deck position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectOutcome {
    /// Nothing changed.
    Ignored { reason: IgnoreReason },
    /// First card of a pair turned face-up.
    Flipped,
    /// Second card completed a match.
    Matched { pair_id: String, color: Color },
    /// Second card did not match the first.
    Mismatched,
}

impl SelectOutcome {
    /// Whether two cards are now face-up and must be flipped back later.
    pub fn awaits_flip_back(&self) -> bool {
        matches!(self, Self::Matched { .. } | Self::Mismatched)
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored { .. })
    }
}

/// Flip and match state for one deck.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    deck: Deck,
    palette: Palette,
    /// Face-up, unresolved positions in flip order.
    flipped: Vec<usize>,
    matched: BTreeSet<usize>,
    pair_colors: HashMap<String, Color>,
    /// Set once a second card is turned, until the flip-back.
    resolving: bool,
}

impl MatchEngine {
    pub fn new(deck: Deck, palette: Palette) -> Self {
        Self {
            deck,
            palette,
            flipped: Vec::with_capacity(2),
            matched: BTreeSet::new(),
            pair_colors: HashMap::new(),
            resolving: false,
        }
    }

    /// Flip the card at `position`.
    ///
    /// Ignored while a pair awaits flip-back, for positions already flipped or
    /// matched, and for positions outside the deck.
    pub fn select(&mut self, position: usize) -> SelectOutcome {
        if let Some(reason) = self.ignore_reason(position) {
            tracing::trace!(position, ?reason, "selection ignored");
            return SelectOutcome::Ignored { reason };
        }

        self.flipped.push(position);
        let &[first, second] = self.flipped.as_slice() else {
            tracing::trace!(position, "card flipped");
            return SelectOutcome::Flipped;
        };

        self.resolving = true;
        let (a, b) = (&self.deck.cards()[first], &self.deck.cards()[second]);
        if !a.matches(b) {
            tracing::debug!(first, second, "cards do not match");
            return SelectOutcome::Mismatched;
        }

        let pair_id = a.pair_id.clone();
        self.flipped.clear();
        self.matched.insert(first);
        self.matched.insert(second);
        let color = self.assign_color(&pair_id);
        tracing::debug!(
            first,
            second,
            pair_id = %pair_id,
            color = %color,
            "pair matched"
        );

        SelectOutcome::Matched { pair_id, color }
    }

    fn ignore_reason(&self, position: usize) -> Option<IgnoreReason> {
        if position >= self.deck.len() {
            tracing::warn!(position, len = self.deck.len(), "selection outside the deck");
            Some(IgnoreReason::OutOfRange)
        } else if self.resolving {
            Some(IgnoreReason::TwoFlipped)
        } else if self.matched.contains(&position) {
            Some(IgnoreReason::AlreadyMatched)
        } else if self.flipped.contains(&position) {
            Some(IgnoreReason::AlreadyFlipped)
        } else {
            None
        }
    }

    fn assign_color(&mut self, pair_id: &str) -> Color {
        if let Some(color) = self.pair_colors.get(pair_id) {
            return color.clone();
        }
        let color = self.palette.color_for(self.pair_colors.len()).clone();
        self.pair_colors.insert(pair_id.to_string(), color.clone());
        color
    }

    /// Turn unresolved cards face-down again and accept selections.
    /// Matched cards are unaffected.
    pub fn clear_flipped(&mut self) {
        if !self.flipped.is_empty() {
            tracing::trace!(flipped = ?self.flipped, "flipping cards back");
            self.flipped.clear();
        }
        self.resolving = false;
    }

    /// Whether a resolved pair is waiting for [`MatchEngine::clear_flipped`].
    pub fn is_resolving(&self) -> bool {
        self.resolving
    }

    /// Display status of a position. Out-of-range positions are hidden.
    pub fn status(&self, position: usize) -> CardStatus {
        if self.matched.contains(&position) {
            CardStatus::Matched
        } else if self.flipped.contains(&position) {
            CardStatus::Flipped
        } else {
            CardStatus::Hidden
        }
    }

    /// Color of a matched position.
    pub fn color(&self, position: usize) -> Option<&Color> {
        if !self.matched.contains(&position) {
            return None;
        }
        let card = self.deck.get(position)?;
        self.pair_colors.get(&card.pair_id)
    }

    /// Render data for one position.
    pub fn view(&self, position: usize) -> Option<CardView> {
        let card = self.deck.get(position)?;
        Some(self.view_of(position, card))
    }

    /// Render data for every position in deck order.
    pub fn views(&self) -> Vec<CardView> {
        self.deck
            .iter()
            .enumerate()
            .map(|(position, card)| self.view_of(position, card))
            .collect()
    }

    fn view_of(&self, position: usize, card: &Card) -> CardView {
        let status = self.status(position);
        CardView {
            position,
            role: card.role,
            text: status.is_face_up().then(|| card.text.clone()),
            status,
            color: self.color(position).cloned(),
        }
    }

    /// Positions currently face-up but unresolved, in flip order.
    pub fn flipped(&self) -> &[usize] {
        &self.flipped
    }

    pub fn matched(&self) -> &BTreeSet<usize> {
        &self.matched
    }

    /// Number of pairs matched so far.
    pub fn matched_count(&self) -> usize {
        self.pair_colors.len()
    }

    pub fn pair_color(&self, pair_id: &str) -> Option<&Color> {
        self.pair_colors.get(pair_id)
    }

    /// Whether every card has been matched. An empty deck is complete.
    pub fn is_complete(&self) -> bool {
        self.matched.len() == self.deck.len()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}
