use actix_ws::Message;
use actix_ws::MessageStream;
use actix_ws::Session;
use futures::StreamExt;
use gg_core::ID;
use gg_core::Member;
use gg_core::RECONNECT_WINDOW;
use gg_core::SYNC_INTERVAL;
use gg_core::Unique;
use gg_gameroom::ClientMessage;
use gg_gameroom::Departure;
use gg_gameroom::Kind;
use gg_gameroom::Protocol;
use gg_gameroom::Room;
use gg_gameroom::Scoreboard;
use gg_gameroom::ServerMessage;
use gg_gameroom::Status;
use gg_ghost::Difficulty;
use gg_records::Archive;
use gg_records::Room as RoomId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::sync::mpsc::unbounded_channel;

/// Manages live rooms and their lifecycles. Each room gets its own
/// sync timer task; the timer stops when the room leaves the map.
pub struct Arena {
    archive: Arc<dyn Archive>,
    scoreboard: Arc<dyn Scoreboard>,
    rooms: RwLock<HashMap<ID<RoomId>, Arc<Room>>>,
}

impl Arena {
    pub fn new(archive: Arc<dyn Archive>, scoreboard: Arc<dyn Scoreboard>) -> Self {
        Self {
            archive,
            scoreboard,
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Opens a two-human room and returns its ID for sharing.
    pub async fn open(self: &Arc<Self>) -> ID<RoomId> {
        let room = Arc::new(Room::versus(
            self.archive.clone(),
            self.scoreboard.clone(),
        ));
        self.adopt(room).await
    }

    /// Opens a human-versus-ghost room at the given difficulty.
    pub async fn practice(self: &Arc<Self>, difficulty: Difficulty) -> ID<RoomId> {
        let room = Arc::new(Room::practice(difficulty));
        self.adopt(room).await
    }

    pub async fn get(&self, id: ID<RoomId>) -> anyhow::Result<Arc<Room>> {
        self.rooms
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("room not found"))
    }

    /// Removes a room; its sync timer notices and stops.
    pub async fn close(&self, id: ID<RoomId>) -> anyhow::Result<()> {
        self.rooms
            .write()
            .await
            .remove(&id)
            .map(|_| log::info!("[arena] room {} closed", id))
            .ok_or_else(|| anyhow::anyhow!("room not found"))
    }

    async fn adopt(self: &Arc<Self>, room: Arc<Room>) -> ID<RoomId> {
        let id = room.id();
        self.rooms.write().await.insert(id, room.clone());
        log::debug!("[arena] created room {}", id);
        let arena = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(SYNC_INTERVAL);
            loop {
                ticker.tick().await;
                if !arena.rooms.read().await.contains_key(&room.id()) {
                    break;
                }
                room.sync().await;
            }
            log::debug!("[arena] sync timer for room {} stopped", id);
        });
        id
    }

    /// Bridges one WebSocket session to a room: seats (or rebinds) the
    /// member, then pumps messages both ways until the session ends.
    /// A session that ends without an explicit leave only drops the
    /// member's channel, keeping the reconnection window open.
    pub async fn bridge(
        self: &Arc<Self>,
        id: ID<RoomId>,
        member: ID<Member>,
        name: String,
        mut session: Session,
        mut stream: MessageStream,
    ) -> anyhow::Result<()> {
        let room = self.get(id).await?;
        let (tx, mut rx) = unbounded_channel::<ServerMessage>();
        room.join(member, name, tx)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        log::debug!("[bridge {}] {} connected", id, member);
        let arena = self.clone();
        actix_web::rt::spawn(async move {
            let mut departed = false;
            'sesh: loop {
                tokio::select! {
                    biased;
                    msg = rx.recv() => match msg {
                        Some(msg) => if session.text(msg.to_json()).await.is_err() { break 'sesh },
                        None => break 'sesh,
                    },
                    msg = stream.next() => match msg {
                        Some(Ok(Message::Text(text))) => {
                            if arena.dispatch(&room, member, &text, &mut session).await {
                                departed = true;
                                break 'sesh;
                            }
                        }
                        Some(Ok(Message::Close(_))) => break 'sesh,
                        Some(Err(_)) => break 'sesh,
                        None => break 'sesh,
                        _ => continue 'sesh,
                    },
                }
            }
            if !departed {
                room.disconnect(member).await;
                arena.reap(&room).await;
            }
            log::debug!("[bridge {}] {} disconnected", id, member);
        });
        Ok(())
    }

    /// Routes one inbound frame. Returns true when the member left the
    /// room for good and the session should close.
    async fn dispatch(
        &self,
        room: &Arc<Room>,
        member: ID<Member>,
        text: &str,
        session: &mut Session,
    ) -> bool {
        let message = match Protocol::decode(text) {
            Ok(message) => message,
            Err(e) => {
                log::debug!("[bridge {}] undecodable frame: {}", room.id(), e);
                let reply = ServerMessage::Error {
                    message: "could not decode message".to_string(),
                };
                let _ = session.text(reply.to_json()).await;
                return false;
            }
        };
        let result = match message {
            ClientMessage::Move { .. } => match message.target() {
                Some(target) => room.play(member, target).await,
                None => return false,
            },
            ClientMessage::Reset => room.reset(member).await,
            ClientMessage::Hint => room.hint(member).await,
            ClientMessage::Leave => {
                match room.leave(member).await {
                    Ok(departure) => {
                        self.retire(room, departure).await;
                        return true;
                    }
                    Err(e) => Err(e),
                }
            }
        };
        if let Err(e) = result {
            let _ = session.text(Protocol::reject(&e).to_json()).await;
        }
        false
    }

    /// Release a room nobody can hear. A completed room with no bound
    /// sessions closes on the spot; a waiting or active one gets a
    /// grace window to rebind before it expires, so a dropped socket
    /// does not strand its room and sync timer forever.
    pub async fn reap(self: &Arc<Self>, room: &Arc<Room>) {
        if !room.deserted().await {
            return;
        }
        if room.status().await == Status::Completed {
            let _ = self.close(room.id()).await;
            return;
        }
        let arena = self.clone();
        let room = room.clone();
        tokio::spawn(async move {
            tokio::time::sleep(RECONNECT_WINDOW).await;
            if room.deserted().await {
                log::info!("[arena] room {} expired unclaimed", room.id());
                let _ = arena.close(room.id()).await;
            }
        });
    }

    /// Room disposal policy after an explicit leave. Forfeited versus
    /// rooms linger so the remaining player can read the result; their
    /// own leave then closes the room.
    pub async fn retire(&self, room: &Arc<Room>, departure: Departure) {
        let close = match departure {
            Departure::Dissolved => true,
            Departure::Departed => true,
            Departure::Forfeited => matches!(room.kind(), Kind::Practice { .. }),
        };
        if close {
            let _ = self.close(room.id()).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gg_gameroom::NullScoreboard;
    use gg_records::NullArchive;

    fn arena() -> Arc<Arena> {
        Arc::new(Arena::new(
            Arc::new(NullArchive),
            Arc::new(NullScoreboard),
        ))
    }

    #[tokio::test]
    async fn open_get_close_round_trip() {
        let arena = arena();
        let id = arena.open().await;
        assert!(arena.get(id).await.is_ok());
        arena.close(id).await.expect("close");
        assert!(arena.get(id).await.is_err());
        assert!(arena.close(id).await.is_err());
    }

    #[tokio::test]
    async fn practice_rooms_are_practice_kind() {
        let arena = arena();
        let id = arena.practice(Difficulty::Hard).await;
        let room = arena.get(id).await.expect("room");
        assert_eq!(
            room.kind(),
            Kind::Practice {
                difficulty: Difficulty::Hard
            }
        );
    }

    #[tokio::test]
    async fn deserted_completed_rooms_close_on_reap() {
        let arena = arena();
        let id = arena.open().await;
        let room = arena.get(id).await.expect("room");
        let a = ID::default();
        let b = ID::default();
        let (tx_a, _rx_a) = unbounded_channel();
        let (tx_b, _rx_b) = unbounded_channel();
        room.join(a, "ann".into(), tx_a).await.expect("seat");
        room.join(b, "bob".into(), tx_b).await.expect("seat");
        // Forfeit completes the match; the room lingers for bob.
        room.leave(a).await.expect("forfeit");
        arena.reap(&room).await;
        assert!(arena.get(id).await.is_ok());
        // Bob's socket drops without an explicit leave.
        room.disconnect(b).await;
        arena.reap(&room).await;
        assert!(arena.get(id).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn unfinished_rooms_expire_after_the_grace_window() {
        let arena = arena();
        let id = arena.open().await;
        let room = arena.get(id).await.expect("room");
        let a = ID::default();
        let (tx_a, _rx_a) = unbounded_channel();
        room.join(a, "ann".into(), tx_a).await.expect("seat");
        room.disconnect(a).await;
        arena.reap(&room).await;
        assert!(arena.get(id).await.is_ok());
        tokio::time::sleep(RECONNECT_WINDOW * 2).await;
        assert!(arena.get(id).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn rebinding_within_the_grace_window_keeps_the_room() {
        let arena = arena();
        let id = arena.open().await;
        let room = arena.get(id).await.expect("room");
        let a = ID::default();
        let (tx_a, _rx_a) = unbounded_channel();
        room.join(a, "ann".into(), tx_a).await.expect("seat");
        room.disconnect(a).await;
        arena.reap(&room).await;
        let (tx_a, _rx_a) = unbounded_channel();
        room.reconnect(a, tx_a).await.expect("rebind");
        tokio::time::sleep(RECONNECT_WINDOW * 2).await;
        assert!(arena.get(id).await.is_ok());
    }

    #[tokio::test]
    async fn retirement_policy_by_departure() {
        let arena = arena();
        let id = arena.open().await;
        let room = arena.get(id).await.expect("room");
        arena.retire(&room, Departure::Forfeited).await;
        assert!(arena.get(id).await.is_ok());
        arena.retire(&room, Departure::Departed).await;
        assert!(arena.get(id).await.is_err());

        let id = arena.practice(Difficulty::Easy).await;
        let room = arena.get(id).await.expect("room");
        arena.retire(&room, Departure::Forfeited).await;
        assert!(arena.get(id).await.is_err());
    }
}
