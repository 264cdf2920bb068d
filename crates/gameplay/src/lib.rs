//! Pure state transitions for gridghost matches.
//!
//! Everything here is a function from board to board: the orchestrator
//! owns the authoritative copy and may discard any speculative
//! application, so nothing in this crate mutates in place.
//!
//! ## Core Operations
//!
//! - [`validate`] / [`apply`] — the move validator and applier
//! - [`legal`] — legal-move enumeration for search and simulation
//! - [`strike`] / [`due`] — the randomized hazard mutator
//! - [`Outcome`] — per-player result and point scoring
mod hazard;
mod outcome;
mod rules;

pub use hazard::*;
pub use outcome::*;
pub use rules::*;
