//! Async match orchestration for gridghost rooms.
//!
//! A [`Room`] owns one match: two seats, the recursive board, the
//! hazard beat counter, and the move log. Every state transition runs
//! under a single-admission slot so that validate, apply, hazard, and
//! broadcast are one atomic step per room; a second command arriving
//! while the slot is held is refused with [`RoomError::Busy`] and the
//! board is untouched.
//!
//! ## Architecture
//!
//! ```text
//! ClientMessage --decode--> Room command --...--> Event --encode--> ServerMessage
//!                              |
//!                     slot (try_lock) + inner state
//! ```
//!
//! - [`Room`] — orchestrator: join, play, reset, reconnect, leave, hint
//! - [`Table`] — seats and their outbound channels
//! - [`Event`] / [`Protocol`] — domain events and their wire encoding
//! - [`Scoreboard`] — points port, implemented by the hosting layer
mod event;
mod message;
mod ports;
mod protocol;
mod room;
mod table;

pub use event::*;
pub use message::*;
pub use ports::*;
pub use protocol::*;
pub use room::*;
pub use table::*;
