//! Historical records of completed matches.
//!
//! The orchestrator persists one [`MatchRecord`] per completed match
//! through the [`Archive`] port, fire-and-forget: a persistence failure
//! is logged and never blocks gameplay.
//!
//! ## Core Types
//!
//! - [`MatchRecord`] — final board, per-player outcomes, move log
//! - [`PlayerResult`] / [`PlayRecord`] — record components
//! - [`Archive`] — the persistence port
//! - [`Room`] — marker type for room identity
mod archive;
mod record;
mod room;

pub use archive::*;
pub use record::*;
pub use room::*;
