//! Review sessions
//!
//! A session is one binary-graded pass over a deck: cards are shuffled, shown
//! front then back, and graded Again or Mastered until the queue runs out.
//! There is no interval scheduling.

mod session;

pub use session::*;
