use crate::Room;
use gg_board::Board;
use gg_board::Mark;
use gg_board::Target;
use gg_core::ID;
use gg_core::Member;
use gg_core::Points;
use gg_core::Unique;
use gg_gameplay::Outcome;
use serde::Serialize;

/// One player's line in a completed match.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerResult {
    pub member: uuid::Uuid,
    pub mark: Mark,
    pub outcome: Outcome,
    pub points: Points,
}

impl PlayerResult {
    pub fn new(member: ID<Member>, mark: Mark, outcome: Outcome) -> Self {
        Self {
            member: member.inner(),
            mark,
            outcome,
            points: outcome.points(),
        }
    }
}

/// One applied move in a match, in admission order.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlayRecord {
    pub mark: Mark,
    pub target: Target,
    pub at_millis: u64,
}

/// Complete record of a finished match, persisted for reconnection
/// audit and history display.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord {
    id: uuid::Uuid,
    room: uuid::Uuid,
    final_board: Board,
    players: Vec<PlayerResult>,
    moves: Vec<PlayRecord>,
    duration_secs: u64,
}

impl MatchRecord {
    pub fn new(
        room: ID<Room>,
        final_board: Board,
        players: Vec<PlayerResult>,
        moves: Vec<PlayRecord>,
        duration_secs: u64,
    ) -> Self {
        Self {
            id: ID::<Self>::default().inner(),
            room: room.inner(),
            final_board,
            players,
            moves,
            duration_secs,
        }
    }
    pub fn room(&self) -> ID<Room> {
        ID::from(self.room)
    }
    pub fn final_board(&self) -> &Board {
        &self.final_board
    }
    pub fn players(&self) -> &[PlayerResult] {
        &self.players
    }
    pub fn moves(&self) -> &[PlayRecord] {
        &self.moves
    }
    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }
}

impl Unique for MatchRecord {
    fn id(&self) -> ID<Self> {
        ID::from(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_round_trip_fields() {
        let room = ID::<Room>::default();
        let players = vec![
            PlayerResult::new(ID::default(), Mark::X, Outcome::Win),
            PlayerResult::new(ID::default(), Mark::O, Outcome::Loss),
        ];
        let record = MatchRecord::new(room, Board::new(), players, Vec::new(), 42);
        assert_eq!(record.room(), room);
        assert_eq!(record.duration_secs(), 42);
        assert_eq!(record.players()[0].points, 10);
        assert_eq!(record.players()[1].points, -5);
    }
}
