//! Recursive board model for gridghost.
//!
//! The board is a 3x3 master grid whose cells are claimed by winning the
//! corresponding 3x3 sub-grid. The same three-in-a-row predicate resolves
//! both layers; that symmetry is the central design idea and [`Grid`]
//! preserves it by being generic over the cell type.
//!
//! ## Core Types
//!
//! - [`Mark`] — a player's marker, X or O
//! - [`Claim`] — ownership state of a master-grid cell
//! - [`GameResult`] — final outcome of a match
//! - [`Grid`] — any 3x3 layer with the shared win predicate
//! - [`Board`] — the full recursive board
//! - [`Target`] — address of a single playable cell
mod board;
mod grid;
mod mark;
mod target;

pub use board::*;
pub use grid::*;
pub use mark::*;
pub use target::*;
