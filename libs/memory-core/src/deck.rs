//! Deck building and shuffling.
//!
//! A deck holds both cards of every pair in a uniformly random order. The
//! order is fixed for the lifetime of a session: [`DeckBuilder`] shuffles
//! once and hands out the same deck afterwards.

use crate::types::{Card, Pair};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Shuffled sequence of all cards for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Expand pairs into cards and shuffle them with `rng`.
    ///
    /// Uses a Fisher-Yates shuffle so every permutation is equally likely.
    pub fn build<R: Rng + ?Sized>(pairs: Vec<Pair>, rng: &mut R) -> Self {
        let mut cards: Vec<Card> = pairs.into_iter().flat_map(Pair::into_cards).collect();
        cards.shuffle(rng);
        Self { cards }
    }

    /// Deck in the given order, without shuffling.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of pairs in the deck.
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    pub fn get(&self, position: usize) -> Option<&Card> {
        self.cards.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Positions holding cards of the given pair.
    pub fn positions_of(&self, pair_id: &str) -> Vec<usize> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.pair_id == pair_id)
            .map(|(position, _)| position)
            .collect()
    }
}

/// Builds a session deck exactly once.
#[derive(Debug)]
pub struct DeckBuilder {
    pairs: Vec<Pair>,
    /// `None` shuffles with the thread RNG, which can reach every order.
    seed: Option<u64>,
    deck: OnceLock<Deck>,
}

impl DeckBuilder {
    /// Builder that shuffles with the thread RNG.
    pub fn new(pairs: Vec<Pair>) -> Self {
        Self {
            pairs,
            seed: None,
            deck: OnceLock::new(),
        }
    }

    /// Builder with a fixed seed, for reproducible decks.
    pub fn with_seed(pairs: Vec<Pair>, seed: u64) -> Self {
        Self {
            pairs,
            seed: Some(seed),
            deck: OnceLock::new(),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Shuffle on first call; later calls return the same deck.
    pub fn build(&self) -> &Deck {
        self.deck.get_or_init(|| shuffle(self.pairs.clone(), self.seed))
    }

    /// Take the deck out of the builder, shuffling it if needed.
    pub fn into_deck(self) -> Deck {
        let Self { pairs, seed, deck } = self;
        deck.into_inner().unwrap_or_else(|| shuffle(pairs, seed))
    }
}

fn shuffle(pairs: Vec<Pair>, seed: Option<u64>) -> Deck {
    let deck = match seed {
        Some(seed) => Deck::build(pairs, &mut ChaCha8Rng::seed_from_u64(seed)),
        None => Deck::build(pairs, &mut rand::thread_rng()),
    };
    tracing::debug!(?seed, cards = deck.len(), "deck shuffled");
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;
    use std::collections::{HashMap, HashSet};

    fn pairs(n: usize) -> Vec<Pair> {
        (1..=n)
            .map(|i| Pair::new(format!("Q{i}"), format!("A{i}")))
            .collect()
    }

    #[test]
    fn deck_has_two_cards_per_pair() {
        let deck = DeckBuilder::with_seed(pairs(5), 7).into_deck();
        assert_eq!(deck.len(), 10);
        assert_eq!(deck.pair_count(), 5);

        let mut roles: HashMap<&str, Vec<Role>> = HashMap::new();
        for card in deck.iter() {
            roles.entry(card.pair_id.as_str()).or_default().push(card.role);
        }
        assert_eq!(roles.len(), 5);
        for (_, mut r) in roles {
            r.sort_by_key(|role| *role == Role::Answer);
            assert_eq!(r, vec![Role::Question, Role::Answer]);
        }
    }

    #[test]
    fn empty_and_single_pair() {
        assert!(DeckBuilder::with_seed(vec![], 1).build().is_empty());
        let deck = DeckBuilder::with_seed(pairs(1), 1).into_deck();
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.positions_of("Q1").len(), 2);
    }

    #[test]
    fn build_is_memoized() {
        let builder = DeckBuilder::new(pairs(8));
        let first = builder.build().clone();
        for _ in 0..10 {
            assert_eq!(builder.build(), &first);
        }
        assert_eq!(builder.into_deck(), first);
    }

    #[test]
    fn same_seed_same_order() {
        let a = DeckBuilder::with_seed(pairs(6), 42).into_deck();
        let b = DeckBuilder::with_seed(pairs(6), 42).into_deck();
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_is_not_input_order() {
        let unshuffled: Vec<Card> = pairs(6).into_iter().flat_map(Pair::into_cards).collect();
        let differing = (0..20u64)
            .map(|seed| DeckBuilder::with_seed(pairs(6), seed).into_deck())
            .filter(|deck| deck.cards() != unshuffled)
            .count();
        assert!(differing >= 19);
    }

    #[test]
    fn unseeded_decks_are_not_limited_to_a_seed_space() {
        let builder = DeckBuilder::new(pairs(12));
        assert_eq!(builder.seed(), None);
        assert_eq!(DeckBuilder::with_seed(pairs(1), 5).seed(), Some(5));

        let decks: HashSet<Vec<(String, Role)>> = (0..20)
            .map(|_| {
                DeckBuilder::new(pairs(12))
                    .into_deck()
                    .iter()
                    .map(|c| (c.pair_id.clone(), c.role))
                    .collect()
            })
            .collect();
        assert!(decks.len() >= 19, "only {} distinct decks", decks.len());
    }

    #[test]
    fn shuffle_spreads_positions_evenly() {
        let runs = 6000;
        let mut counts = [0usize; 6];
        for seed in 0..runs {
            let deck = DeckBuilder::with_seed(pairs(3), seed).into_deck();
            let position = deck
                .iter()
                .position(|c| c.pair_id == "Q1" && c.role == Role::Question)
                .unwrap();
            counts[position] += 1;
        }
        // Expected 1000 per position.
        for count in counts {
            assert!((800..=1200).contains(&count), "skewed counts: {counts:?}");
        }
    }
}
