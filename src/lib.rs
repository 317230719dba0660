pub mod app;
pub mod cards;
pub mod config;
pub mod decks;
pub mod generation;
pub mod history;
pub mod review;
pub mod router;
pub mod selector;
pub mod storage;
pub mod store;
