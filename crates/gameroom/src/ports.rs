use gg_core::ID;
use gg_core::Member;
use gg_core::Points;
use gg_gameplay::Outcome;

/// Points port. The identity collaborator owns member totals; the
/// orchestrator reports one delta per player, exactly once per
/// completed versus match. Practice matches never reach this.
#[async_trait::async_trait]
pub trait Scoreboard: Send + Sync {
    async fn award(&self, member: ID<Member>, outcome: Outcome, delta: Points)
    -> anyhow::Result<()>;
}

/// Scoreboard that keeps no totals. Used for practice rooms and for
/// running without an identity collaborator.
#[derive(Debug, Default)]
pub struct NullScoreboard;

#[async_trait::async_trait]
impl Scoreboard for NullScoreboard {
    async fn award(
        &self,
        member: ID<Member>,
        outcome: Outcome,
        delta: Points,
    ) -> anyhow::Result<()> {
        log::debug!("[scoreboard] {} {} ({:+})", member, outcome, delta);
        Ok(())
    }
}
