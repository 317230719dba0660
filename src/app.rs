//! Application state and the operations that change it
//!
//! [`LingoApp`] owns the decks, the cards, the current lookup result and the
//! review session. Every change to decks or cards is written through to the
//! persisted collections right away.

use rand::rngs::StdRng;
use thiserror::Error;

use crate::cards::{Deck, Language, Meaning, VocabularyCard};
use crate::decks::DeckRegistry;
use crate::generation::CardGenerator;
use crate::history;
use crate::review::{Grade, GradeOutcome, ReviewError, ReviewSession, Side};
use crate::router::save_card_to_deck;
use crate::selector::{self, TargetTab};
use crate::storage::{CollectionStorage, KeyValueStore, StorageError};
use crate::store::{CardStore, DeckProgress};

/// Message shown when a lookup fails
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate card content. Please check your network or API key.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Review error: {0}")]
    Review(#[from] ReviewError),

    #[error("Deck not found: {0}")]
    DeckNotFound(String),

    #[error("No lookup result to save")]
    NoCurrentResult,

    #[error("No review session in progress")]
    NoReviewSession,
}

pub type Result<T> = std::result::Result<T, AppError>;

/// The card produced by the latest lookup and the tab it is viewed under
#[derive(Debug, Clone)]
pub struct CurrentResult {
    pub card: VocabularyCard,
    pub tab: TargetTab,
}

/// What a lookup produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The term was blank; nothing happened
    Skipped,
    /// A card was generated; `saved` lists the ids of auto-saved instances
    Found { saved: Vec<String> },
    /// Generation failed; the message is meant for the user
    Failed { message: String },
}

pub struct LingoApp<S: KeyValueStore> {
    storage: CollectionStorage<S>,
    decks: DeckRegistry,
    cards: CardStore,
    current: Option<CurrentResult>,
    review: Option<ActiveReview>,
}

/// A review session and the deck it runs over
struct ActiveReview {
    deck_id: String,
    session: ReviewSession,
}

impl<S: KeyValueStore> LingoApp<S> {
    /// Load persisted decks and cards from `store`
    pub fn open(store: S) -> Result<Self> {
        let mut storage = CollectionStorage::new(store);
        let loaded = storage.load_decks();
        let loaded_count = loaded.len();
        let decks = DeckRegistry::from_loaded(loaded);
        let cards = CardStore::new(storage.load_cards());

        if decks.decks().len() != loaded_count {
            storage.save_decks(decks.decks())?;
        }

        log::info!(
            "Loaded {} deck(s) and {} card(s)",
            decks.decks().len(),
            cards.len()
        );

        Ok(Self {
            storage,
            decks,
            cards,
            current: None,
            review: None,
        })
    }

    pub fn decks(&self) -> &[Deck] {
        self.decks.decks()
    }

    pub fn deck(&self, deck_id: &str) -> Option<&Deck> {
        self.decks.get(deck_id)
    }

    pub fn cards(&self) -> &[VocabularyCard] {
        self.cards.cards()
    }

    pub fn deck_cards(&self, deck_id: &str) -> Vec<VocabularyCard> {
        self.cards.cards_in_deck(deck_id)
    }

    pub fn deck_progress(&self, deck_id: &str) -> DeckProgress {
        self.cards.deck_progress(deck_id)
    }

    fn persist_decks(&mut self) -> Result<()> {
        self.storage.save_decks(self.decks.decks())?;
        Ok(())
    }

    fn persist_cards(&mut self) -> Result<()> {
        self.storage.save_cards(self.cards.cards())?;
        Ok(())
    }

    fn require_deck(&self, deck_id: &str) -> Result<()> {
        if self.decks.contains(deck_id) {
            Ok(())
        } else {
            Err(AppError::DeckNotFound(deck_id.to_string()))
        }
    }

    // ==================== Decks ====================

    /// Create a deck. A blank name is ignored and gives `None`.
    pub fn create_deck(&mut self, name: &str) -> Result<Option<String>> {
        let Some(id) = self.decks.create_deck(name) else {
            return Ok(None);
        };
        self.persist_decks()?;
        Ok(Some(id))
    }

    // ==================== Lookup ====================

    /// Generate a card for `term` and make it the current result.
    ///
    /// English and Korean results are saved into their master deck right away.
    pub async fn lookup<G>(&mut self, generator: &G, term: &str) -> Result<LookupOutcome>
    where
        G: CardGenerator + ?Sized,
    {
        let term = term.trim();
        if term.is_empty() {
            return Ok(LookupOutcome::Skipped);
        }

        self.current = None;

        let card = match generator.generate(term).await {
            Ok(card) => card,
            Err(e) => {
                log::error!("Card generation for '{}' failed: {}", term, e);
                return Ok(LookupOutcome::Failed {
                    message: GENERATION_FAILED_MESSAGE.to_string(),
                });
            }
        };

        let saved = match card.detected_language {
            Language::English | Language::Korean => self.save_card(&card, None)?,
            Language::Japanese | Language::Unknown => Vec::new(),
        };

        self.current = Some(CurrentResult {
            card,
            tab: TargetTab::default(),
        });

        Ok(LookupOutcome::Found { saved })
    }

    pub fn current(&self) -> Option<&CurrentResult> {
        self.current.as_ref()
    }

    /// Switch the target-language tab of the current result
    pub fn set_tab(&mut self, tab: TargetTab) {
        if let Some(current) = self.current.as_mut() {
            current.tab = tab;
        }
    }

    /// Meanings of the current result as shown under its tab
    pub fn visible_meanings(&self) -> Vec<&Meaning> {
        match &self.current {
            Some(current) => selector::visible_meanings(&current.card, current.tab.language_name()),
            None => Vec::new(),
        }
    }

    /// Deck preselected for saving the current result
    pub fn default_save_deck(&self) -> Option<String> {
        let current = self.current.as_ref()?;
        selector::default_save_deck(&current.card, current.tab, self.decks.decks())
    }

    /// Decks already holding the current result as shown
    pub fn saved_deck_ids(&self) -> Vec<String> {
        match &self.current {
            Some(current) => {
                let shown = selector::card_for_save(&current.card, current.tab);
                self.cards.saved_deck_ids(&shown)
            }
            None => Vec::new(),
        }
    }

    /// Save the current result, as shown under its tab, into `deck_id`
    pub fn save_current(&mut self, deck_id: &str) -> Result<Vec<String>> {
        let current = self.current.as_ref().ok_or(AppError::NoCurrentResult)?;
        let card = selector::card_for_save(&current.card, current.tab);
        self.save_card(&card, Some(deck_id))
    }

    /// Route `card` into `target_deck_id` and its master deck
    pub fn save_card(&mut self, card: &VocabularyCard, target_deck_id: Option<&str>) -> Result<Vec<String>> {
        if let Some(deck_id) = target_deck_id {
            self.require_deck(deck_id)?;
        }

        let created = save_card_to_deck(&mut self.cards, card, target_deck_id);
        if !created.is_empty() {
            self.persist_cards()?;
        }
        Ok(created)
    }

    // ==================== Cards ====================

    /// Delete a card instance. Unknown ids are ignored.
    pub fn delete_card(&mut self, card_id: &str) -> Result<Option<VocabularyCard>> {
        let removed = self.cards.delete(card_id);
        if removed.is_some() {
            self.persist_cards()?;
        }
        Ok(removed)
    }

    /// Cards matching `query`, most recent first
    pub fn history(&self, query: &str) -> Vec<&VocabularyCard> {
        history::recent_first(history::filter(self.cards.cards(), query))
    }

    // ==================== Review ====================

    /// Start reviewing a deck. `rng` fixes the shuffle; `None` seeds from entropy.
    pub fn start_review(&mut self, deck_id: &str, rng: Option<StdRng>) -> Result<&ReviewSession> {
        self.require_deck(deck_id)?;

        let deck_cards = self.cards.cards_in_deck(deck_id);
        let session = match rng {
            Some(rng) => ReviewSession::with_rng(deck_cards, rng),
            None => ReviewSession::start(deck_cards),
        };
        log::info!(
            "Started review of deck {} with {} card(s) queued",
            deck_id,
            session.progress().total
        );

        let review = self.review.insert(ActiveReview {
            deck_id: deck_id.to_string(),
            session,
        });
        Ok(&review.session)
    }

    /// The running review session, if any
    pub fn review(&self) -> Option<&ReviewSession> {
        self.review.as_ref().map(|r| &r.session)
    }

    pub fn flip_review(&mut self) -> Result<Side> {
        let review = self.review.as_mut().ok_or(AppError::NoReviewSession)?;
        Ok(review.session.flip()?)
    }

    /// Grade the presented card and persist its new status
    pub fn grade_review(&mut self, grade: Grade) -> Result<GradeOutcome> {
        let review = self.review.as_mut().ok_or(AppError::NoReviewSession)?;
        let outcome = review.session.grade(&mut self.cards, grade)?;
        self.persist_cards()?;
        Ok(outcome)
    }

    /// Another pass over the reviewed deck as it is now
    pub fn review_again(&mut self) -> Result<()> {
        let review = self.review.as_mut().ok_or(AppError::NoReviewSession)?;
        let deck_cards = self.cards.cards_in_deck(&review.deck_id);
        Ok(review.session.review_again(deck_cards)?)
    }

    pub fn end_review(&mut self) {
        self.review = None;
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use rand::SeedableRng;

    use super::*;
    use crate::cards::models::fixtures::meaning;
    use crate::cards::{CardStatus, DEFAULT_DECK_ID_EN, DEFAULT_DECK_ID_KR};
    use crate::generation::{self, GenerationError};
    use crate::review::{Progress, ReviewState};
    use crate::storage::{FileStorage, MemoryStore};
    use tempfile::TempDir;

    struct FixedGenerator {
        language: Language,
        meanings: Vec<Meaning>,
    }

    #[async_trait]
    impl CardGenerator for FixedGenerator {
        async fn generate(&self, term: &str) -> generation::Result<VocabularyCard> {
            Ok(VocabularyCard::new(term.to_string(), self.language, self.meanings.clone()))
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl CardGenerator for FailingGenerator {
        async fn generate(&self, _term: &str) -> generation::Result<VocabularyCard> {
            Err(GenerationError::EmptyResponse)
        }
    }

    fn english(definition: &str) -> FixedGenerator {
        FixedGenerator {
            language: Language::English,
            meanings: vec![meaning("General", definition)],
        }
    }

    fn japanese() -> FixedGenerator {
        FixedGenerator {
            language: Language::Japanese,
            meanings: vec![
                meaning("English (General)", "thank you"),
                meaning("Korean (Casual)", "고마워"),
            ],
        }
    }

    fn memory_app() -> LingoApp<MemoryStore> {
        LingoApp::open(MemoryStore::default()).unwrap()
    }

    #[test]
    fn test_open_adds_default_decks() {
        let app = memory_app();
        let ids: Vec<&str> = app.decks().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec![DEFAULT_DECK_ID_EN, DEFAULT_DECK_ID_KR]);
    }

    #[tokio::test]
    async fn test_hello_end_to_end() {
        let mut app = memory_app();

        let outcome = app.lookup(&english("こんにちは"), "hello").await.unwrap();
        assert!(matches!(outcome, LookupOutcome::Found { ref saved } if saved.len() == 1));
        assert_eq!(app.saved_deck_ids(), vec![DEFAULT_DECK_ID_EN.to_string()]);

        let found = app.history("hello");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].deck_id.as_deref(), Some(DEFAULT_DECK_ID_EN));

        let session = app
            .start_review(DEFAULT_DECK_ID_EN, Some(StdRng::seed_from_u64(1)))
            .unwrap();
        assert_eq!(session.progress(), Progress { current: 0, total: 1 });

        app.flip_review().unwrap();
        let outcome = app.grade_review(Grade::Mastered).unwrap();

        assert_eq!(outcome.state, ReviewState::Complete);
        assert_eq!(app.review().unwrap().progress(), Progress { current: 1, total: 1 });
        assert_eq!(app.cards()[0].status, CardStatus::Mastered);
    }

    #[tokio::test]
    async fn test_blank_lookup_is_skipped() {
        let mut app = memory_app();
        let outcome = app.lookup(&english("x"), "   ").await.unwrap();
        assert_eq!(outcome, LookupOutcome::Skipped);
        assert!(app.current().is_none());
    }

    #[tokio::test]
    async fn test_failed_lookup_clears_result() {
        let mut app = memory_app();
        app.lookup(&english("こんにちは"), "hello").await.unwrap();

        let outcome = app.lookup(&FailingGenerator, "world").await.unwrap();

        assert_eq!(
            outcome,
            LookupOutcome::Failed {
                message: GENERATION_FAILED_MESSAGE.to_string()
            }
        );
        assert!(app.current().is_none());
        assert_eq!(app.cards().len(), 1);
    }

    #[tokio::test]
    async fn test_japanese_not_auto_saved() {
        let mut app = memory_app();
        let outcome = app.lookup(&japanese(), "ありがとう").await.unwrap();

        assert_eq!(outcome, LookupOutcome::Found { saved: Vec::new() });
        assert!(app.cards().is_empty());
        assert_eq!(app.default_save_deck().as_deref(), Some(DEFAULT_DECK_ID_EN));
    }

    #[tokio::test]
    async fn test_save_japanese_under_korean_tab() {
        let mut app = memory_app();
        app.lookup(&japanese(), "ありがとう").await.unwrap();
        app.set_tab(TargetTab::Korean);

        assert_eq!(app.visible_meanings().len(), 1);
        let deck = app.default_save_deck().unwrap();
        assert_eq!(deck, DEFAULT_DECK_ID_KR);

        let created = app.save_current(&deck).unwrap();

        assert_eq!(created.len(), 1);
        let saved = &app.cards()[0];
        assert_eq!(saved.deck_id.as_deref(), Some(DEFAULT_DECK_ID_KR));
        assert_eq!(saved.meanings.len(), 1);
        assert_eq!(saved.meanings[0].definition, "고마워");
        assert_eq!(app.saved_deck_ids(), vec![DEFAULT_DECK_ID_KR.to_string()]);
    }

    #[tokio::test]
    async fn test_save_into_custom_deck() {
        let mut app = memory_app();
        let travel = app.create_deck("Travel").unwrap().unwrap();
        app.lookup(&english("こんにちは"), "hello").await.unwrap();

        assert_eq!(app.save_current(&travel).unwrap().len(), 1);
        assert!(app.save_current(&travel).unwrap().is_empty());
        assert_eq!(app.deck_progress(&travel).total_cards, 1);
        assert!(matches!(app.save_current("nope"), Err(AppError::DeckNotFound(_))));
    }

    #[test]
    fn test_save_without_result() {
        let mut app = memory_app();
        assert!(matches!(
            app.save_current(DEFAULT_DECK_ID_EN),
            Err(AppError::NoCurrentResult)
        ));
    }

    #[test]
    fn test_blank_deck_name_ignored() {
        let mut app = memory_app();
        assert_eq!(app.create_deck("  ").unwrap(), None);
        assert_eq!(app.decks().len(), 2);
    }

    #[test]
    fn test_review_empty_deck() {
        let mut app = memory_app();
        let session = app.start_review(DEFAULT_DECK_ID_KR, None).unwrap();
        assert_eq!(session.state(), ReviewState::Empty);
        assert!(matches!(app.grade_review(Grade::Again), Err(AppError::Review(_))));
    }

    #[tokio::test]
    async fn test_review_again_skips_deleted_cards() {
        let mut app = memory_app();
        app.lookup(&english("こんにちは"), "hello").await.unwrap();
        app.lookup(&english("さようなら"), "goodbye").await.unwrap();

        app.start_review(DEFAULT_DECK_ID_EN, Some(StdRng::seed_from_u64(8)))
            .unwrap();
        for _ in 0..2 {
            app.flip_review().unwrap();
            app.grade_review(Grade::Mastered).unwrap();
        }

        let deleted = app.cards()[0].id.clone();
        app.delete_card(&deleted).unwrap();
        app.review_again().unwrap();

        let session = app.review().unwrap();
        assert_eq!(session.progress(), Progress { current: 0, total: 1 });
        assert_ne!(session.current_card().unwrap().id, deleted);
    }

    #[test]
    fn test_review_requires_session() {
        let mut app = memory_app();
        assert!(matches!(app.flip_review(), Err(AppError::NoReviewSession)));
    }

    #[tokio::test]
    async fn test_changes_survive_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().to_path_buf();

        {
            let mut app = LingoApp::open(FileStorage::new(path.clone())).unwrap();
            let travel = app.create_deck("Travel").unwrap().unwrap();
            app.lookup(&english("こんにちは"), "hello").await.unwrap();
            app.save_current(&travel).unwrap();
            app.start_review(&travel, Some(StdRng::seed_from_u64(3))).unwrap();
            app.flip_review().unwrap();
            app.grade_review(Grade::Again).unwrap();
        }

        let app = LingoApp::open(FileStorage::new(path)).unwrap();
        assert_eq!(app.decks().len(), 3);
        assert_eq!(app.cards().len(), 2);
        let travel = &app.decks()[2];
        assert_eq!(app.deck_cards(&travel.id)[0].status, CardStatus::Learning);
    }

    #[tokio::test]
    async fn test_delete_card() {
        let mut app = memory_app();
        app.lookup(&english("こんにちは"), "hello").await.unwrap();
        let id = app.cards()[0].id.clone();

        assert!(app.delete_card("missing").unwrap().is_none());
        assert!(app.delete_card(&id).unwrap().is_some());
        assert!(app.history("").is_empty());
    }
}
