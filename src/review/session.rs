use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{CardStatus, VocabularyCard};
use crate::store::CardStore;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReviewError {
    #[error("No card is being presented")]
    NotActive,

    #[error("Flip the card before grading it")]
    CardNotRevealed,

    #[error("The review pass is not complete yet")]
    NotComplete,
}

pub type Result<T> = std::result::Result<T, ReviewError>;

/// Which side of the presented card is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Front,
    Back,
}

/// The user's verdict on a presented card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Grade {
    Again,
    Mastered,
}

impl Grade {
    pub fn status(&self) -> CardStatus {
        match self {
            Self::Again => CardStatus::Learning,
            Self::Mastered => CardStatus::Mastered,
        }
    }
}

/// State of a review session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ReviewState {
    /// The deck has no cards; nothing can happen
    Empty,
    /// A card is presented
    Active { side: Side },
    /// Every queued card has been graded
    Complete,
}

/// Graded count against queue size for the current pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

/// Result of grading the presented card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeOutcome {
    pub card_id: String,
    pub status: CardStatus,
    pub state: ReviewState,
}

/// One practice pass over a deck
#[derive(Debug)]
pub struct ReviewSession {
    queue: VecDeque<VocabularyCard>,
    state: ReviewState,
    progress: Progress,
    rng: StdRng,
}

impl ReviewSession {
    /// Start a session with a freshly seeded shuffle
    pub fn start(deck_cards: Vec<VocabularyCard>) -> Self {
        Self::with_rng(deck_cards, StdRng::from_entropy())
    }

    /// Start a session whose shuffles are driven by `rng`.
    ///
    /// The queue is every card not yet mastered, or the whole deck when all
    /// cards are mastered.
    pub fn with_rng(deck_cards: Vec<VocabularyCard>, rng: StdRng) -> Self {
        let mut session = Self {
            queue: VecDeque::new(),
            state: ReviewState::Empty,
            progress: Progress { current: 0, total: 0 },
            rng,
        };

        if deck_cards.is_empty() {
            return session;
        }

        let mut pending: Vec<VocabularyCard> = deck_cards
            .iter()
            .filter(|c| c.status != CardStatus::Mastered)
            .cloned()
            .collect();
        if pending.is_empty() {
            pending = deck_cards;
        }

        session.fill_queue(pending);
        session
    }

    fn fill_queue(&mut self, mut cards: Vec<VocabularyCard>) {
        cards.shuffle(&mut self.rng);
        self.progress = Progress {
            current: 0,
            total: cards.len(),
        };
        self.queue = cards.into();
        self.state = ReviewState::Active { side: Side::Front };
        log::debug!("Review queue filled with {} card(s)", self.progress.total);
    }

    pub fn state(&self) -> ReviewState {
        self.state
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Cards still waiting, the presented one included
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// The presented card, while the session is active
    pub fn current_card(&self) -> Option<&VocabularyCard> {
        match self.state {
            ReviewState::Active { .. } => self.queue.front(),
            _ => None,
        }
    }

    /// Turn the presented card over
    pub fn flip(&mut self) -> Result<Side> {
        match self.state {
            ReviewState::Active { side } => {
                let side = match side {
                    Side::Front => Side::Back,
                    Side::Back => Side::Front,
                };
                self.state = ReviewState::Active { side };
                Ok(side)
            }
            _ => Err(ReviewError::NotActive),
        }
    }

    /// Grade the presented card, record its new status in `store`, and move on.
    ///
    /// Only a revealed card can be graded, and each presentation is graded once.
    pub fn grade(&mut self, store: &mut CardStore, grade: Grade) -> Result<GradeOutcome> {
        match self.state {
            ReviewState::Active { side: Side::Back } => {}
            ReviewState::Active { side: Side::Front } => return Err(ReviewError::CardNotRevealed),
            _ => return Err(ReviewError::NotActive),
        }

        let card_id = match self.queue.front() {
            Some(card) => card.id.clone(),
            None => return Err(ReviewError::NotActive),
        };

        let status = grade.status();
        if !store.update_status(&card_id, status) {
            log::warn!("Graded card {} is no longer in the store", card_id);
        }

        self.queue.pop_front();
        self.progress.current += 1;
        self.state = if self.queue.is_empty() {
            ReviewState::Complete
        } else {
            ReviewState::Active { side: Side::Front }
        };

        log::debug!(
            "Graded card {} as {} ({}/{})",
            card_id,
            status,
            self.progress.current,
            self.progress.total
        );

        Ok(GradeOutcome {
            card_id,
            status,
            state: self.state,
        })
    }

    /// Start another pass over `deck_cards`, the deck as it is now, mastered
    /// cards included. A deck emptied in the meantime ends up `Empty`.
    pub fn review_again(&mut self, deck_cards: Vec<VocabularyCard>) -> Result<()> {
        if self.state != ReviewState::Complete {
            return Err(ReviewError::NotComplete);
        }

        if deck_cards.is_empty() {
            self.queue.clear();
            self.progress = Progress { current: 0, total: 0 };
            self.state = ReviewState::Empty;
            return Ok(());
        }

        self.fill_queue(deck_cards);
        Ok(())
    }
}
