//! Card representation, deck issuance, and combination evaluation.
//!
//! This crate provides the foundational types for representing cards and
//! computing the relative strength of an arbitrary 2–5 card combination.
//!
//! ## Core Types
//!
//! - [`Rank`] — One of 13 ordered card ranks
//! - [`Suit`] — One of 4 suits, unordered except for flush detection
//! - [`Face`] — A `(Rank, Suit)` value; two cards may share a face
//! - [`Card`] — An identified card instance; identity is the id, not the face
//! - [`Deck`] — A single shuffled issuance, drawn without replacement
//!
//! ## Evaluation
//!
//! - [`Evaluator`] — Derives shape, flush, and straight structure from faces
//! - [`Strength`] — Totally ordered `(category, kickers)` pair with a label
//! - [`Shape`] — Combination category (high card through straight flush)
//! - [`Kickers`] — Ordered tie-breaking rank vector
mod card;
mod deck;
mod error;
mod evaluator;
mod face;
mod kicks;
mod rank;
mod shape;
mod strength;
mod suit;

pub use card::*;
pub use deck::*;
pub use error::*;
pub use evaluator::*;
pub use face::*;
pub use kicks::*;
pub use rank::*;
pub use shape::*;
pub use strength::*;
pub use suit::*;
