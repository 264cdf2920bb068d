use gg_board::Board;
use gg_board::GameResult;
use gg_board::Mark;
use gg_board::Target;
use gg_gameplay::Hazard;
use gg_gameplay::Rejection;
use gg_records::PlayRecord;
use gg_records::PlayerResult;
use serde::Deserialize;
use serde::Serialize;

/// A seat as shown to clients.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerInfo {
    pub member: String,
    pub mark: Mark,
}

/// Server-to-client wire messages, tagged by `type`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Waiting {
        message: String,
    },
    Started {
        board: Board,
        players: Vec<PlayerInfo>,
    },
    Hazard {
        hazard: Hazard,
        message: String,
    },
    StateChanged {
        board: Board,
        last_move: PlayRecord,
        hazard: Option<Hazard>,
    },
    Sync {
        board: Board,
        timestamp: u64,
    },
    Completed {
        winner: Option<GameResult>,
        results: Vec<PlayerResult>,
        message: String,
    },
    Reset {
        board: Board,
    },
    Reconnected {
        board: Board,
        mark: Mark,
        players: Vec<PlayerInfo>,
    },
    OpponentReconnected {
        message: String,
    },
    OpponentLeft {
        message: String,
    },
    Hint {
        target: Target,
        reason: String,
    },
    Rejected {
        reason: Rejection,
        message: String,
    },
    Busy {
        message: String,
    },
    Error {
        message: String,
    },
}

impl ServerMessage {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            log::error!("[protocol] failed to serialize outbound message: {}", e);
            String::from(r#"{"type":"error","message":"internal serialization failure"}"#)
        })
    }
}

/// Client-to-server wire messages, tagged by `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Move { grid: usize, row: usize, col: usize },
    Reset,
    Hint,
    Leave,
}

impl ClientMessage {
    pub fn target(&self) -> Option<Target> {
        match self {
            Self::Move { grid, row, col } => Some(Target::new(*grid, *row, *col)),
            _ => None,
        }
    }
}
