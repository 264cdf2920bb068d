use crate::Event;
use crate::NullScoreboard;
use crate::Protocol;
use crate::Scoreboard;
use crate::ServerMessage;
use crate::Table;
use gg_board::Board;
use gg_board::GameResult;
use gg_board::Mark;
use gg_board::Target;
use gg_core::GHOST_REPLY_DELAY;
use gg_core::HAZARD_DISPLAY;
use gg_core::ID;
use gg_core::Member;
use gg_core::Unique;
use gg_core::now_millis;
use gg_gameplay::Hazard;
use gg_gameplay::Outcome;
use gg_gameplay::Rejection;
use gg_gameplay::apply;
use gg_gameplay::due;
use gg_gameplay::strike;
use gg_gameplay::validate;
use gg_ghost::Difficulty;
use gg_ghost::decide;
use gg_ghost::hint;
use gg_records::Archive;
use gg_records::MatchRecord;
use gg_records::NullArchive;
use gg_records::PlayRecord;
use gg_records::PlayerResult;
use gg_records::Room as RoomId;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::Instant;

/// Lifecycle of a room's match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// One seat filled, waiting for an opponent. Practice rooms skip
    /// this state.
    Waiting,
    /// Match in progress.
    Active,
    /// Match finished. The room lingers so players can read the result
    /// and request a rematch; sync broadcasts stop here.
    Completed,
}

/// What flavor of match a room hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Two humans. Completion awards points and persists a record.
    Versus,
    /// One human against the ghost. Nothing is awarded or persisted.
    Practice { difficulty: Difficulty },
}

/// Why a room command was refused. The board is unchanged in every
/// case; only the submitting player is told.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomError {
    /// Another command holds the admission slot. Resubmit after the
    /// next state broadcast.
    Busy,
    Full,
    AlreadySeated,
    NotAParticipant,
    NotActive,
    NotCompleted,
    NotPractice,
    Invalid(Rejection),
}

impl std::fmt::Display for RoomError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Busy => write!(f, "room is busy, try again"),
            Self::Full => write!(f, "room is full"),
            Self::AlreadySeated => write!(f, "already seated in this room"),
            Self::NotAParticipant => write!(f, "not a participant in this room"),
            Self::NotActive => write!(f, "match is not active"),
            Self::NotCompleted => write!(f, "match is not completed"),
            Self::NotPractice => write!(f, "hints are only available in practice rooms"),
            Self::Invalid(rejection) => write!(f, "{}", rejection),
        }
    }
}

impl std::error::Error for RoomError {}

impl From<Rejection> for RoomError {
    fn from(rejection: Rejection) -> Self {
        Self::Invalid(rejection)
    }
}

/// How a member's departure resolved, so the hosting layer knows
/// whether to drop the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Departure {
    /// The only seated player left before the match began; the room is
    /// worthless and should be closed.
    Dissolved,
    /// A player abandoned an active match; it completed as a forfeit.
    Forfeited,
    /// The match was already completed; nothing changed.
    Departed,
}

/// Mutable match state, guarded by the room's inner mutex.
struct Inner {
    status: Status,
    board: Board,
    moves: u64,
    table: Table,
    log: Vec<PlayRecord>,
    started: Option<Instant>,
    awarded: bool,
}

impl Inner {
    fn new() -> Self {
        Self {
            status: Status::Waiting,
            board: Board::new(),
            moves: 0,
            table: Table::new(),
            log: Vec::new(),
            started: None,
            awarded: false,
        }
    }
    /// Fresh match state for a start or a rematch. Seats are kept.
    fn rearm(&mut self) {
        self.status = Status::Active;
        self.board = Board::new();
        self.moves = 0;
        self.log.clear();
        self.started = Some(Instant::now());
        self.awarded = false;
    }
}

/// One match room. All command handlers take `&self`; rooms are shared
/// behind `Arc` between sessions and the sync timer.
///
/// Mutations run under two locks: the admission `slot`, taken
/// non-blocking so a second command during an in-flight step is
/// refused as [`RoomError::Busy`], and the `inner` state mutex. The
/// slot is held across validate, apply, hazard pause, ghost reply, and
/// broadcast, so each of those sequences is atomic per room. Rooms
/// never share locks; a stuck room cannot stall its neighbors.
pub struct Room {
    id: ID<RoomId>,
    kind: Kind,
    slot: Mutex<()>,
    inner: Mutex<Inner>,
    archive: Arc<dyn Archive>,
    scoreboard: Arc<dyn Scoreboard>,
}

impl Unique<RoomId> for Room {
    fn id(&self) -> ID<RoomId> {
        self.id
    }
}

impl Room {
    /// Two-human room. Completion flows through the given ports.
    pub fn versus(archive: Arc<dyn Archive>, scoreboard: Arc<dyn Scoreboard>) -> Self {
        Self {
            id: ID::default(),
            kind: Kind::Versus,
            slot: Mutex::new(()),
            inner: Mutex::new(Inner::new()),
            archive,
            scoreboard,
        }
    }

    /// Human-versus-ghost room. Nothing is awarded or persisted.
    pub fn practice(difficulty: Difficulty) -> Self {
        Self {
            id: ID::default(),
            kind: Kind::Practice { difficulty },
            slot: Mutex::new(()),
            inner: Mutex::new(Inner::new()),
            archive: Arc::new(NullArchive),
            scoreboard: Arc::new(NullScoreboard),
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }
    pub async fn status(&self) -> Status {
        self.inner.lock().await.status
    }
    pub async fn is_participant(&self, member: ID<Member>) -> bool {
        self.inner.lock().await.table.seat(member).is_some()
    }
    /// True when no participant holds a live session channel. The
    /// hosting layer uses this to expire rooms nobody can hear.
    pub async fn deserted(&self) -> bool {
        self.inner.lock().await.table.deserted()
    }

    /// Seat a member. The first versus joiner waits; the second starts
    /// the match. Practice rooms start on the first (only) seat.
    /// Joining a room you are already seated in rebinds your session
    /// instead.
    pub async fn join(
        &self,
        member: ID<Member>,
        name: String,
        sender: UnboundedSender<ServerMessage>,
    ) -> Result<(), RoomError> {
        let mut inner = self.inner.lock().await;
        if inner.table.seat(member).is_some() {
            return Self::rebind(&mut inner, member, sender);
        }
        if inner.status == Status::Completed {
            return Err(RoomError::NotActive);
        }
        if inner.status == Status::Active {
            // Versus rooms reach Active only when full; a practice
            // room's single human seat is claimed at start.
            return Err(RoomError::Full);
        }
        let mark = inner.table.join(member, name, sender)?;
        log::info!("[room {}] {} seated as {}", self.id, member, mark);
        match self.kind {
            Kind::Practice { .. } => Self::begin(&mut inner),
            Kind::Versus if inner.table.is_full() => Self::begin(&mut inner),
            Kind::Versus => inner.table.unicast(member, Protocol::encode(Event::Waiting)),
        }
        Ok(())
    }

    /// Rebind a seated member to a fresh session channel and replay
    /// the full state to them. Safe to call repeatedly.
    pub async fn reconnect(
        &self,
        member: ID<Member>,
        sender: UnboundedSender<ServerMessage>,
    ) -> Result<(), RoomError> {
        let mut inner = self.inner.lock().await;
        Self::rebind(&mut inner, member, sender)
    }

    /// Drop a member's session channel without vacating their seat,
    /// leaving the reconnection window open.
    pub async fn disconnect(&self, member: ID<Member>) {
        self.inner.lock().await.table.unbind(member);
        log::info!("[room {}] {} disconnected", self.id, member);
    }

    /// Admit, validate, and apply one move, folding in the hazard beat
    /// and (in practice rooms) the ghost's reply.
    pub async fn play(&self, member: ID<Member>, target: Target) -> Result<(), RoomError> {
        let _slot = self.slot.try_lock().map_err(|_| RoomError::Busy)?;
        let mut inner = self.inner.lock().await;
        if inner.status != Status::Active {
            return Err(RoomError::NotActive);
        }
        let mark = inner
            .table
            .mark_of(member)
            .ok_or(RoomError::NotAParticipant)?;
        validate(&inner.board, target, mark)?;
        self.advance(&mut inner, target, mark).await;
        if inner.status == Status::Active {
            if let Kind::Practice { difficulty } = self.kind {
                self.ghost_reply(&mut inner, difficulty).await;
            }
        }
        Ok(())
    }

    /// Restart a completed match with a fresh board, same seats.
    pub async fn reset(&self, member: ID<Member>) -> Result<(), RoomError> {
        let _slot = self.slot.try_lock().map_err(|_| RoomError::Busy)?;
        let mut inner = self.inner.lock().await;
        if inner.table.seat(member).is_none() {
            return Err(RoomError::NotAParticipant);
        }
        if inner.status != Status::Completed {
            return Err(RoomError::NotCompleted);
        }
        inner.rearm();
        log::info!("[room {}] rematch requested by {}", self.id, member);
        let event = Event::Reset {
            board: inner.board.clone(),
        };
        inner.table.broadcast(Protocol::encode(event));
        Ok(())
    }

    /// Depth-2 move suggestion, practice rooms only.
    pub async fn hint(&self, member: ID<Member>) -> Result<(), RoomError> {
        let inner = self.inner.lock().await;
        let Kind::Practice { .. } = self.kind else {
            return Err(RoomError::NotPractice);
        };
        if inner.status != Status::Active {
            return Err(RoomError::NotActive);
        }
        let mark = inner
            .table
            .mark_of(member)
            .ok_or(RoomError::NotAParticipant)?;
        if inner.board.turn() != mark {
            return Err(RoomError::Invalid(Rejection::WrongTurn));
        }
        let mut rng = SmallRng::from_os_rng();
        match hint(&inner.board, mark, &mut rng) {
            Some(hint) => inner.table.unicast(member, Protocol::encode(Event::Hint(hint))),
            None => log::debug!("[room {}] no hint available", self.id),
        }
        Ok(())
    }

    /// Remove a member for good. Leaving an active match forfeits it:
    /// the board completes as-is, with no winner, and both players
    /// record a loss.
    pub async fn leave(&self, member: ID<Member>) -> Result<Departure, RoomError> {
        // Waits for any in-flight move rather than refusing, so the
        // forfeit serializes after it.
        let _slot = self.slot.lock().await;
        let mut inner = self.inner.lock().await;
        if inner.table.seat(member).is_none() {
            return Err(RoomError::NotAParticipant);
        }
        inner.table.unbind(member);
        match inner.status {
            Status::Waiting => {
                inner.status = Status::Completed;
                log::info!("[room {}] dissolved before start", self.id);
                Ok(Departure::Dissolved)
            }
            Status::Active => {
                log::info!("[room {}] {} forfeited", self.id, member);
                inner.table.others(member, Protocol::encode(Event::OpponentLeft));
                self.complete(&mut inner).await;
                Ok(Departure::Forfeited)
            }
            Status::Completed => Ok(Departure::Departed),
        }
    }

    /// Periodic full-state broadcast for drift recovery. Returns true
    /// when a broadcast went out; waiting and completed rooms stay
    /// quiet.
    pub async fn sync(&self) -> bool {
        let inner = self.inner.lock().await;
        match inner.status {
            Status::Completed => false,
            Status::Waiting => true,
            Status::Active => {
                let event = Event::Sync {
                    board: inner.board.clone(),
                    timestamp: now_millis(),
                };
                inner.table.broadcast(Protocol::encode(event));
                true
            }
        }
    }
}

/// Internal transitions. All run under both the slot and inner locks.
impl Room {
    fn begin(inner: &mut Inner) {
        inner.rearm();
        let event = Event::Started {
            board: inner.board.clone(),
            seats: inner.table.seated(),
        };
        inner.table.broadcast(Protocol::encode(event));
    }

    fn rebind(
        inner: &mut Inner,
        member: ID<Member>,
        sender: UnboundedSender<ServerMessage>,
    ) -> Result<(), RoomError> {
        let mark = inner.table.rebind(member, sender)?;
        let event = Event::Reconnected {
            board: inner.board.clone(),
            mark,
            seats: inner.table.seated(),
        };
        inner.table.unicast(member, Protocol::encode(event));
        inner.table.others(member, Protocol::encode(Event::OpponentReconnected));
        Ok(())
    }

    /// Apply one pre-validated mark, run the hazard beat, broadcast the
    /// new state, and complete the match if it just ended.
    async fn advance(&self, inner: &mut Inner, target: Target, mark: Mark) {
        inner.board = apply(&inner.board, target, mark);
        inner.moves += 1;
        let last = PlayRecord {
            mark,
            target,
            at_millis: now_millis(),
        };
        inner.log.push(last);
        log::debug!("[room {}] move {}: {} at {}", self.id, inner.moves, mark, target);
        let hazard = self.hazard_beat(inner).await;
        let event = Event::StateChanged {
            board: inner.board.clone(),
            last_move: last,
            hazard,
        };
        inner.table.broadcast(Protocol::encode(event));
        if inner.board.game_over() {
            self.complete(inner).await;
        }
    }

    /// Strike every fifth applied move, unless the match just ended.
    /// Broadcasts the banner first and pauses so players can read it
    /// over the pre-strike board; the admission slot stays held.
    async fn hazard_beat(&self, inner: &mut Inner) -> Option<Hazard> {
        if !due(inner.moves) || inner.board.game_over() {
            return None;
        }
        let mut rng = SmallRng::from_os_rng();
        match strike(&inner.board, &mut rng) {
            None => {
                log::debug!("[room {}] hazard beat skipped, no eligible target", self.id);
                None
            }
            Some((board, hazard)) => {
                inner.board = board;
                inner.board.reanchor();
                // A lock can claim the last open master cell, leaving
                // nobody a legal move.
                if inner.board.master_full() && !inner.board.game_over() {
                    inner.board.set_winner(GameResult::Tie);
                }
                log::info!("[room {}] hazard at move {}: {}", self.id, inner.moves, hazard);
                inner.table.broadcast(Protocol::encode(Event::Hazard(hazard.clone())));
                tokio::time::sleep(HAZARD_DISPLAY).await;
                Some(hazard)
            }
        }
    }

    /// Flavor line shown over the final board. The practice human
    /// always plays X.
    fn banner(&self, winner: Option<GameResult>) -> String {
        match (self.kind, winner) {
            (Kind::Practice { .. }, Some(GameResult::Won(Mark::X))) => {
                "You beat the Ghost!".to_string()
            }
            (Kind::Practice { .. }, Some(GameResult::Won(Mark::O))) => {
                "The Ghost got you this time!".to_string()
            }
            (Kind::Practice { .. }, _) => "A draw against the Ghost!".to_string(),
            (Kind::Versus, Some(GameResult::Won(mark))) => {
                format!("{} wins the match!", mark)
            }
            (Kind::Versus, Some(GameResult::Tie)) => "The match is a tie!".to_string(),
            (Kind::Versus, None) => "Match forfeited".to_string(),
        }
    }

    async fn ghost_reply(&self, inner: &mut Inner, difficulty: Difficulty) {
        tokio::time::sleep(GHOST_REPLY_DELAY).await;
        let mark = inner.board.turn();
        let mut rng = SmallRng::from_os_rng();
        match decide(&inner.board, mark, difficulty, &mut rng) {
            Some(target) => self.advance(inner, target, mark).await,
            None => log::warn!("[room {}] ghost has no legal reply", self.id),
        }
    }

    /// Close out the match from the board as it stands. Broadcasts
    /// results, then (versus only) awards points exactly once and
    /// persists the record fire-and-forget.
    async fn complete(&self, inner: &mut Inner) {
        inner.status = Status::Completed;
        let winner = inner.board.winner();
        let results: Vec<PlayerResult> = inner
            .table
            .seated()
            .into_iter()
            .map(|(member, mark)| PlayerResult::new(member, mark, Outcome::of(winner, mark)))
            .collect();
        let event = Event::Completed {
            winner,
            results: results.clone(),
            banner: self.banner(winner),
        };
        inner.table.broadcast(Protocol::encode(event));
        log::info!("[room {}] completed after {} moves", self.id, inner.moves);
        if let Kind::Practice { .. } = self.kind {
            return;
        }
        if !inner.awarded {
            inner.awarded = true;
            for result in &results {
                let member = ID::from(result.member);
                if let Err(e) = self
                    .scoreboard
                    .award(member, result.outcome, result.points)
                    .await
                {
                    log::warn!("[room {}] failed to award {}: {}", self.id, member, e);
                }
            }
        }
        let duration = inner.started.map(|s| s.elapsed().as_secs()).unwrap_or(0);
        let record = MatchRecord::new(
            self.id,
            inner.board.clone(),
            results,
            inner.log.clone(),
            duration,
        );
        if let Err(e) = self.archive.save_match(&record).await {
            log::warn!("[room {}] failed to persist match: {}", self.id, e);
        }
    }
}
