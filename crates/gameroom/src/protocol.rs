use crate::ClientMessage;
use crate::Event;
use crate::PlayerInfo;
use crate::RoomError;
use crate::ServerMessage;
use gg_board::Mark;
use gg_core::ID;
use gg_core::Member;

/// Translation between domain events and the JSON wire surface. Keeps
/// banner strings and seat formatting out of the orchestrator.
pub struct Protocol;

impl Protocol {
    pub fn encode(event: Event) -> ServerMessage {
        match event {
            Event::Waiting => ServerMessage::Waiting {
                message: "Waiting for opponent...".to_string(),
            },
            Event::Started { board, seats } => ServerMessage::Started {
                board,
                players: Self::players(seats),
            },
            Event::Hazard(hazard) => ServerMessage::Hazard {
                message: hazard.message(),
                hazard,
            },
            Event::StateChanged {
                board,
                last_move,
                hazard,
            } => ServerMessage::StateChanged {
                board,
                last_move,
                hazard,
            },
            Event::Sync { board, timestamp } => ServerMessage::Sync { board, timestamp },
            Event::Completed {
                winner,
                results,
                banner,
            } => ServerMessage::Completed {
                winner,
                results,
                message: banner,
            },
            Event::Reset { board } => ServerMessage::Reset { board },
            Event::Reconnected { board, mark, seats } => ServerMessage::Reconnected {
                board,
                mark,
                players: Self::players(seats),
            },
            Event::OpponentReconnected => ServerMessage::OpponentReconnected {
                message: "Your opponent reconnected".to_string(),
            },
            Event::OpponentLeft => ServerMessage::OpponentLeft {
                message: "Your opponent left the match".to_string(),
            },
            Event::Hint(hint) => ServerMessage::Hint {
                target: hint.target,
                reason: hint.reason,
            },
        }
    }

    /// Error reply for the player whose command was refused.
    pub fn reject(error: &RoomError) -> ServerMessage {
        match error {
            RoomError::Busy => ServerMessage::Busy {
                message: error.to_string(),
            },
            RoomError::Invalid(rejection) => ServerMessage::Rejected {
                reason: *rejection,
                message: rejection.to_string(),
            },
            other => ServerMessage::Error {
                message: other.to_string(),
            },
        }
    }

    pub fn decode(text: &str) -> Result<ClientMessage, serde_json::Error> {
        serde_json::from_str(text)
    }

    fn players(seats: Vec<(ID<Member>, Mark)>) -> Vec<PlayerInfo> {
        seats
            .into_iter()
            .map(|(member, mark)| PlayerInfo {
                member: member.to_string(),
                mark,
            })
            .collect()
    }
}
