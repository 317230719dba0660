pub mod deck;
pub mod decks;
pub mod delete;
pub mod history;
pub mod lookup;
pub mod recognize;
pub mod review;
