use crate::best_move;
use gg_board::Board;
use gg_board::Mark;
use gg_board::Target;
use gg_core::DEPTH_EASY;
use gg_core::DEPTH_HARD;
use gg_core::DEPTH_MEDIUM;
use gg_core::EASY_BLUNDER;
use gg_gameplay::legal;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Deserialize;
use serde::Serialize;

/// Ghost strength tier for practice rooms. Fixes the search depth;
/// easy additionally blunders into a uniformly random legal move 30%
/// of the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn depth(self) -> u8 {
        match self {
            Self::Easy => DEPTH_EASY,
            Self::Medium => DEPTH_MEDIUM,
            Self::Hard => DEPTH_HARD,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

/// The ghost's reply at a given difficulty. `None` when no legal move
/// exists.
pub fn decide<R>(board: &Board, mark: Mark, difficulty: Difficulty, rng: &mut R) -> Option<Target>
where
    R: Rng + ?Sized,
{
    if difficulty == Difficulty::Easy && rng.random::<f64>() < EASY_BLUNDER {
        return legal(board).choose(rng).copied();
    }
    best_move(board, mark, difficulty.depth())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gg_gameplay::validate;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn tier_depths() {
        assert_eq!(Difficulty::Easy.depth(), 1);
        assert_eq!(Difficulty::Medium.depth(), 2);
        assert_eq!(Difficulty::Hard.depth(), 4);
    }
    #[test]
    fn every_tier_produces_a_valid_move() {
        let board = Board::new();
        let mut rng = SmallRng::seed_from_u64(23);
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            for _ in 0..20 {
                let target = decide(&board, Mark::X, difficulty, &mut rng).expect("moves exist");
                assert_eq!(validate(&board, target, Mark::X), Ok(()));
            }
        }
    }
}
