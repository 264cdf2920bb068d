//! Core type aliases, traits, and constants for gridghost.
//!
//! This crate provides the foundational types and configuration parameters
//! used throughout the gridghost workspace.

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Sub-grid index on the master grid, row-major in 0..9.
pub type GridIdx = usize;
/// Row or column coordinate within a 3x3 grid, in 0..3.
pub type Coord = usize;
/// Seat index within a room (0 = first player to join, plays X).
pub type Position = usize;
/// Point deltas awarded at match completion.
pub type Points = i16;
/// Minimax evaluation scores.
pub type Score = i32;

// ============================================================================
// TRAITS
// ============================================================================
/// Unique identifier trait for domain entities.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Generic ID wrapper providing compile-time type safety over uuid::Uuid.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
    /// Cast ID<T> to ID<U> while preserving the underlying UUID.
    /// Useful for converting between marker types.
    pub fn cast<U>(self) -> ID<U> {
        ID {
            inner: self.inner,
            marker: PhantomData,
        }
    }
}

impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self {
            inner: uuid::Uuid::now_v7(),
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

/// Marker type for verified member identities.
/// The identity collaborator owns the actual user record; the engine
/// only ever handles `ID<Member>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Member;

// ============================================================================
// MATCH PARAMETERS
// ============================================================================
/// Number of players in a room.
pub const N: usize = 2;
/// Number of sub-grids on the master grid.
pub const GRIDS: usize = 9;
/// Side length of every grid layer.
pub const SIDE: usize = 3;

/// Applied moves between hazard strikes.
pub const HAZARD_INTERVAL: u64 = 5;
/// Pause after a hazard broadcast so players can read the banner.
pub const HAZARD_DISPLAY: std::time::Duration = std::time::Duration::from_secs(2);
/// Delay before the ghost replies in practice rooms.
pub const GHOST_REPLY_DELAY: std::time::Duration = std::time::Duration::from_secs(1);
/// Interval between periodic full-state broadcasts.
pub const SYNC_INTERVAL: std::time::Duration = std::time::Duration::from_millis(500);
/// Grace period for a dropped session to rebind before its room
/// expires.
pub const RECONNECT_WINDOW: std::time::Duration = std::time::Duration::from_secs(30);

/// Points awarded for winning a match.
pub const WIN_POINTS: Points = 10;
/// Points awarded for a tied match.
pub const TIE_POINTS: Points = 2;
/// Points deducted for losing a match.
pub const LOSS_POINTS: Points = -5;

// ============================================================================
// GHOST SEARCH PARAMETERS
// ============================================================================
/// Search depth for easy difficulty.
pub const DEPTH_EASY: u8 = 1;
/// Search depth for medium difficulty (also used for hints).
pub const DEPTH_MEDIUM: u8 = 2;
/// Search depth for hard difficulty.
pub const DEPTH_HARD: u8 = 4;
/// Probability that easy difficulty plays uniformly at random instead.
pub const EASY_BLUNDER: f64 = 0.3;
/// Base score for a terminal win/loss, before the depth preference term.
pub const TERMINAL_SCORE: Score = 10;
/// Heuristic weight per owned master-grid cell.
pub const MASTER_CELL_WEIGHT: Score = 3;
/// Heuristic bonus for owning the center master cell.
pub const CENTER_BONUS: Score = 2;
/// Heuristic bonus per owned corner master cell.
pub const CORNER_BONUS: Score = 1;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Milliseconds since the Unix epoch, for sync timestamps and move logs.
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.unwrap();
        println!();
        log::warn!("violent interrupt received, exiting immediately");
        std::process::exit(0);
    });
}
