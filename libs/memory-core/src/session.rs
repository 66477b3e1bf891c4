//! Game session with scheduled flip-back.
//!
//! A [`GameSession`] wraps a [`MatchEngine`] and owns the single timer that
//! turns an unresolved pair face-down again after the configured delay.
//! The timer is a tokio task; it is aborted when superseded, when the pair
//! is flipped back early, and when the session is dropped.

use crate::deck::{Deck, DeckBuilder};
use crate::engine::{MatchEngine, SelectOutcome};
use crate::types::{CardView, GameSettings, Pair};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::task::JoinHandle;

/// Serializable view of a whole session, for renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub cards: Vec<CardView>,
    pub flipped: Vec<usize>,
    pub matched_pairs: usize,
    pub total_pairs: usize,
    pub complete: bool,
    pub flip_back_pending: bool,
}

struct SessionState {
    engine: MatchEngine,
    flip_back: Option<JoinHandle<()>>,
    /// Bumped whenever a pending flip-back is replaced or resolved.
    generation: u64,
}

impl SessionState {
    fn abort_flip_back(&mut self) {
        if let Some(handle) = self.flip_back.take() {
            handle.abort();
        }
    }

    fn flip_back_pending(&self) -> bool {
        self.flip_back
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

/// One player's game: a fixed deck, its match state and the flip-back timer.
pub struct GameSession {
    state: Arc<Mutex<SessionState>>,
    settings: GameSettings,
}

impl GameSession {
    pub fn new(deck: Deck, settings: GameSettings) -> Self {
        let engine = MatchEngine::new(deck, settings.palette.clone());
        Self {
            state: Arc::new(Mutex::new(SessionState {
                engine,
                flip_back: None,
                generation: 0,
            })),
            settings,
        }
    }

    /// Start a session from parsed pairs, shuffled with a random seed.
    pub fn from_pairs(pairs: Vec<Pair>, settings: GameSettings) -> Self {
        Self::new(DeckBuilder::new(pairs).into_deck(), settings)
    }

    /// Start a session whose deck order is fixed by `seed`.
    pub fn from_pairs_seeded(pairs: Vec<Pair>, seed: u64, settings: GameSettings) -> Self {
        Self::new(DeckBuilder::with_seed(pairs, seed).into_deck(), settings)
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        lock_state(&self.state)
    }

    /// Select a card and, once two are face-up, schedule their flip-back.
    ///
    /// # Panics
    /// Must be called from within a tokio runtime when the selection turns a
    /// second card face-up.
    pub fn select(&self, position: usize) -> SelectOutcome {
        let mut state = self.lock();
        let outcome = state.engine.select(position);

        if outcome.awaits_flip_back() {
            state.abort_flip_back();
            state.generation += 1;
            state.flip_back = Some(self.spawn_flip_back(state.generation));
        }

        outcome
    }

    fn spawn_flip_back(&self, generation: u64) -> JoinHandle<()> {
        let weak: Weak<Mutex<SessionState>> = Arc::downgrade(&self.state);
        let delay = self.settings.flip_back_delay();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let Some(shared) = weak.upgrade() else {
                return;
            };
            let mut state = lock_state(&shared);
            if state.generation == generation {
                state.engine.clear_flipped();
                state.flip_back = None;
            }
        })
    }

    /// Flip unresolved cards back immediately, cancelling the timer.
    pub fn flip_back_now(&self) {
        let mut state = self.lock();
        state.abort_flip_back();
        state.generation += 1;
        state.engine.clear_flipped();
    }

    pub fn is_flip_back_pending(&self) -> bool {
        self.lock().flip_back_pending()
    }

    /// Run a read-only query against the engine.
    pub fn with_engine<R>(&self, f: impl FnOnce(&MatchEngine) -> R) -> R {
        f(&self.lock().engine)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let state = self.lock();
        let engine = &state.engine;
        GameSnapshot {
            cards: engine.views(),
            flipped: engine.flipped().to_vec(),
            matched_pairs: engine.matched_count(),
            total_pairs: engine.deck().pair_count(),
            complete: engine.is_complete(),
            flip_back_pending: state.flip_back_pending(),
        }
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.lock().abort_flip_back();
    }
}

fn lock_state(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    // The state stays consistent across a panic in a reader.
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
