use gg_board::Board;
use gg_board::GameResult;
use gg_board::Mark;
use gg_core::ID;
use gg_core::Member;
use gg_gameplay::Hazard;
use gg_ghost::Hint;
use gg_records::PlayRecord;
use gg_records::PlayerResult;

/// Domain events emitted by a room in response to commands, the sync
/// timer, and hazard beats. Encoded into [`crate::ServerMessage`] by
/// [`crate::Protocol`] before leaving the process.
#[derive(Debug, Clone)]
pub enum Event {
    /// First seat filled; waiting for an opponent.
    Waiting,
    /// Both seats filled; the match began with a fresh board.
    Started {
        board: Board,
        seats: Vec<(ID<Member>, Mark)>,
    },
    /// A hazard landed. Broadcast before the state it produced, so
    /// clients can show the banner over the pre-strike board.
    Hazard(Hazard),
    /// An applied move (and any hazard folded into the same step).
    StateChanged {
        board: Board,
        last_move: PlayRecord,
        hazard: Option<Hazard>,
    },
    /// Periodic full-state broadcast for drift recovery.
    Sync { board: Board, timestamp: u64 },
    /// The match ended. `winner` is `None` on forfeit; the banner is
    /// the flavor line shown over the final board.
    Completed {
        winner: Option<GameResult>,
        results: Vec<PlayerResult>,
        banner: String,
    },
    /// A completed room restarted with a fresh board.
    Reset { board: Board },
    /// The addressed player rebound their session.
    Reconnected {
        board: Board,
        mark: Mark,
        seats: Vec<(ID<Member>, Mark)>,
    },
    /// The other player rebound their session.
    OpponentReconnected,
    /// The other player left an active match.
    OpponentLeft,
    /// Tutorial suggestion for the addressed player.
    Hint(Hint),
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::Started { .. } => write!(f, "started"),
            Self::Hazard(hazard) => write!(f, "hazard {}", hazard),
            Self::StateChanged { last_move, .. } => write!(f, "moved {}", last_move.target),
            Self::Sync { .. } => write!(f, "sync"),
            Self::Completed { winner, .. } => match winner {
                Some(result) => write!(f, "completed {}", result),
                None => write!(f, "completed by forfeit"),
            },
            Self::Reset { .. } => write!(f, "reset"),
            Self::Reconnected { mark, .. } => write!(f, "reconnected {}", mark),
            Self::OpponentReconnected => write!(f, "opponent reconnected"),
            Self::OpponentLeft => write!(f, "opponent left"),
            Self::Hint(hint) => write!(f, "hint {}", hint.target),
        }
    }
}
