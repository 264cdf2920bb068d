use gg_board::GameResult;
use gg_board::Mark;
use gg_core::LOSS_POINTS;
use gg_core::Points;
use gg_core::TIE_POINTS;
use gg_core::WIN_POINTS;
use serde::Serialize;

/// Per-player result of a completed match.
///
/// Derived from the final board as-is. A forfeited match has no board
/// winner, so both players record a loss; there is no separate forfeit
/// category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Tie,
    Loss,
}

impl Outcome {
    /// This player's result given the board's final winner field.
    pub fn of(winner: Option<GameResult>, mark: Mark) -> Self {
        match winner {
            Some(GameResult::Won(w)) if w == mark => Self::Win,
            Some(GameResult::Tie) => Self::Tie,
            _ => Self::Loss,
        }
    }
    /// Point delta awarded at completion: win +10, tie +2, loss -5.
    pub fn points(self) -> Points {
        match self {
            Self::Win => WIN_POINTS,
            Self::Tie => TIE_POINTS,
            Self::Loss => LOSS_POINTS,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Win => write!(f, "win"),
            Self::Tie => write!(f, "tie"),
            Self::Loss => write!(f, "loss"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn outcomes_from_final_winner() {
        let won = Some(GameResult::Won(Mark::X));
        assert_eq!(Outcome::of(won, Mark::X), Outcome::Win);
        assert_eq!(Outcome::of(won, Mark::O), Outcome::Loss);
        assert_eq!(Outcome::of(Some(GameResult::Tie), Mark::X), Outcome::Tie);
        // Forfeit path: no winner on the board scores as a loss.
        assert_eq!(Outcome::of(None, Mark::O), Outcome::Loss);
    }
    #[test]
    fn point_deltas() {
        assert_eq!(Outcome::Win.points(), 10);
        assert_eq!(Outcome::Tie.points(), 2);
        assert_eq!(Outcome::Loss.points(), -5);
    }
}
