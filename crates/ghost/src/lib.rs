//! The ghost: gridghost's automated opponent.
//!
//! Depth-limited minimax with alpha-beta pruning over the gameplay
//! crate's pure apply function. The ghost only ever simulates on
//! copies; the orchestrator's authoritative board is never touched.
//!
//! ## Core Operations
//!
//! - [`best_move`] — full-strength search at a given depth
//! - [`Difficulty`] / [`decide`] — tiered strength for practice rooms
//! - [`hint`] — depth-2 suggestion with a cosmetic rationale
mod difficulty;
mod hint;
mod search;

pub use difficulty::*;
pub use hint::*;
pub use search::*;
