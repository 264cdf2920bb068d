use crate::MatchRecord;
use gg_core::Unique;

/// Persistence port for completed matches.
///
/// Invoked fire-and-forget at completion: the orchestrator logs a
/// failure and moves on, it never retries and never blocks gameplay.
#[async_trait::async_trait]
pub trait Archive: Send + Sync {
    async fn save_match(&self, record: &MatchRecord) -> anyhow::Result<()>;
}

/// Archive that records nothing. Used for practice rooms and for
/// running without a database.
#[derive(Debug, Default)]
pub struct NullArchive;

#[async_trait::async_trait]
impl Archive for NullArchive {
    async fn save_match(&self, record: &MatchRecord) -> anyhow::Result<()> {
        log::debug!("[archive] dropping record for room {}", record.room());
        Ok(())
    }
}

#[cfg(feature = "database")]
pub use postgres::PgArchive;

#[cfg(feature = "database")]
mod postgres {
    use super::*;
    use std::sync::Arc;
    use tokio_postgres::Client;

    const MATCHES: &str = "matches";

    /// Postgres-backed archive. Boards and move logs are stored as
    /// JSON text; queries against them are an offline concern.
    pub struct PgArchive {
        client: Arc<Client>,
    }

    impl PgArchive {
        pub fn new(client: Arc<Client>) -> Self {
            Self { client }
        }
        /// Creates the matches table if missing.
        pub async fn migrate(&self) -> anyhow::Result<()> {
            self.client
                .batch_execute(const_format::concatcp!(
                    "CREATE TABLE IF NOT EXISTS ",
                    MATCHES,
                    " (
                        id            UUID PRIMARY KEY,
                        room_id       UUID NOT NULL,
                        final_board   TEXT NOT NULL,
                        players       TEXT NOT NULL,
                        moves         TEXT NOT NULL,
                        duration_secs BIGINT NOT NULL
                    );"
                ))
                .await?;
            Ok(())
        }
    }

    #[async_trait::async_trait]
    impl Archive for PgArchive {
        async fn save_match(&self, record: &MatchRecord) -> anyhow::Result<()> {
            let board = serde_json::to_string(record.final_board())?;
            let players = serde_json::to_string(record.players())?;
            let moves = serde_json::to_string(record.moves())?;
            self.client
                .execute(
                    const_format::concatcp!(
                        "INSERT INTO ",
                        MATCHES,
                        " (id, room_id, final_board, players, moves, duration_secs)
                          VALUES ($1, $2, $3, $4, $5, $6)"
                    ),
                    &[
                        &record.id().inner(),
                        &record.room().inner(),
                        &board,
                        &players,
                        &moves,
                        &(record.duration_secs() as i64),
                    ],
                )
                .await?;
            log::info!("recorded match {} for room {}", record.id(), record.room());
            Ok(())
        }
    }
}
