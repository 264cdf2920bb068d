use crate::RoomError;
use crate::ServerMessage;
use gg_board::Mark;
use gg_core::ID;
use gg_core::Member;
use gg_core::N;
use tokio::sync::mpsc::UnboundedSender;

/// One occupied seat: the member behind it, the mark they play, and
/// their outbound channel. The channel is `None` while the session is
/// dropped; the seat itself survives disconnection so the member can
/// rebind.
#[derive(Debug)]
pub struct Seat {
    member: ID<Member>,
    name: String,
    mark: Mark,
    sender: Option<UnboundedSender<ServerMessage>>,
}

impl Seat {
    pub fn member(&self) -> ID<Member> {
        self.member
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn mark(&self) -> Mark {
        self.mark
    }
}

/// The seats of a room. First member to join plays X, second plays O.
#[derive(Debug, Default)]
pub struct Table {
    seats: Vec<Seat>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn is_full(&self) -> bool {
        self.seats.len() >= N
    }
    pub fn seat(&self, member: ID<Member>) -> Option<&Seat> {
        self.seats.iter().find(|s| s.member == member)
    }
    pub fn mark_of(&self, member: ID<Member>) -> Option<Mark> {
        self.seat(member).map(Seat::mark)
    }
    /// Seated members in join order, for client rosters.
    pub fn seated(&self) -> Vec<(ID<Member>, Mark)> {
        self.seats.iter().map(|s| (s.member, s.mark)).collect()
    }

    /// Seat a new member. Marks are assigned by arrival order.
    pub fn join(
        &mut self,
        member: ID<Member>,
        name: String,
        sender: UnboundedSender<ServerMessage>,
    ) -> Result<Mark, RoomError> {
        if self.seat(member).is_some() {
            return Err(RoomError::AlreadySeated);
        }
        if self.is_full() {
            return Err(RoomError::Full);
        }
        let mark = match self.seats.len() {
            0 => Mark::X,
            _ => Mark::O,
        };
        self.seats.push(Seat {
            member,
            name,
            mark,
            sender: Some(sender),
        });
        Ok(mark)
    }

    /// Point an existing seat at a fresh session channel. Idempotent.
    pub fn rebind(
        &mut self,
        member: ID<Member>,
        sender: UnboundedSender<ServerMessage>,
    ) -> Result<Mark, RoomError> {
        let seat = self
            .seats
            .iter_mut()
            .find(|s| s.member == member)
            .ok_or(RoomError::NotAParticipant)?;
        seat.sender = Some(sender);
        Ok(seat.mark)
    }

    /// Drop a seat's channel without vacating it.
    pub fn unbind(&mut self, member: ID<Member>) {
        if let Some(seat) = self.seats.iter_mut().find(|s| s.member == member) {
            seat.sender = None;
        }
    }

    /// True when no seat holds a live session channel.
    pub fn deserted(&self) -> bool {
        self.seats.iter().all(|s| s.sender.is_none())
    }

    pub fn unicast(&self, member: ID<Member>, message: ServerMessage) {
        if let Some(seat) = self.seat(member) {
            Self::send(seat, message);
        }
    }
    pub fn broadcast(&self, message: ServerMessage) {
        for seat in &self.seats {
            Self::send(seat, message.clone());
        }
    }
    /// Everyone except the named member.
    pub fn others(&self, member: ID<Member>, message: ServerMessage) {
        for seat in self.seats.iter().filter(|s| s.member != member) {
            Self::send(seat, message.clone());
        }
    }

    fn send(seat: &Seat, message: ServerMessage) {
        if let Some(sender) = &seat.sender {
            if sender.send(message).is_err() {
                log::debug!("[table] dropped message for {} ({})", seat.name, seat.mark);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn marks_follow_arrival_order_and_third_seat_is_refused() {
        let mut table = Table::new();
        let (tx, _rx) = unbounded_channel();
        let a = ID::default();
        let b = ID::default();
        let c = ID::default();
        assert_eq!(table.join(a, "ann".into(), tx.clone()), Ok(Mark::X));
        assert_eq!(table.join(b, "bob".into(), tx.clone()), Ok(Mark::O));
        assert_eq!(table.join(c, "cyd".into(), tx.clone()), Err(RoomError::Full));
        assert_eq!(table.join(a, "ann".into(), tx), Err(RoomError::AlreadySeated));
        assert_eq!(table.mark_of(a), Some(Mark::X));
        assert_eq!(table.mark_of(c), None);
    }
    #[test]
    fn rebind_survives_a_dropped_session() {
        let mut table = Table::new();
        let (old, _) = unbounded_channel();
        let member = ID::default();
        table.join(member, "ann".into(), old).expect("seat");
        table.unbind(member);
        let (new, mut rx) = unbounded_channel();
        assert_eq!(table.rebind(member, new), Ok(Mark::X));
        table.unicast(
            member,
            ServerMessage::Waiting {
                message: "hi".into(),
            },
        );
        assert!(rx.try_recv().is_ok());
        assert_eq!(
            table.rebind(ID::default(), unbounded_channel().0),
            Err(RoomError::NotAParticipant)
        );
    }
    #[test]
    fn deserted_tracks_live_channels() {
        let mut table = Table::new();
        assert!(table.deserted());
        let (tx, _rx) = unbounded_channel();
        let a = ID::default();
        let b = ID::default();
        table.join(a, "ann".into(), tx.clone()).expect("seat");
        table.join(b, "bob".into(), tx).expect("seat");
        assert!(!table.deserted());
        table.unbind(a);
        assert!(!table.deserted());
        table.unbind(b);
        assert!(table.deserted());
        let (new, _rx) = unbounded_channel();
        table.rebind(a, new).expect("rebind");
        assert!(!table.deserted());
    }
    #[test]
    fn others_skips_the_named_member() {
        let mut table = Table::new();
        let (tx_a, mut rx_a) = unbounded_channel();
        let (tx_b, mut rx_b) = unbounded_channel();
        let a = ID::default();
        let b = ID::default();
        table.join(a, "ann".into(), tx_a).expect("seat");
        table.join(b, "bob".into(), tx_b).expect("seat");
        table.others(
            a,
            ServerMessage::OpponentLeft {
                message: "gone".into(),
            },
        );
        assert!(rx_a.try_recv().is_err());
        assert!(rx_b.try_recv().is_ok());
    }
}
