use serde::Deserialize;
use serde::Serialize;

/// A player's marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The opposing marker.
    pub fn other(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::O => write!(f, "O"),
        }
    }
}

/// Ownership state of a master-grid cell.
///
/// A cell is claimed when its sub-grid is won, fills without a winner,
/// or is locked by a hazard. Only `Won` cells count toward the
/// master-grid three-in-a-row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Claim {
    Won(Mark),
    Tie,
    Locked,
}

impl Claim {
    /// The winning marker, if any. `Tie` and `Locked` map to `None`,
    /// which makes them non-matching under the shared win predicate.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Self::Won(mark) => Some(mark),
            Self::Tie | Self::Locked => None,
        }
    }
}

impl std::fmt::Display for Claim {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Won(mark) => write!(f, "{}", mark),
            Self::Tie => write!(f, "tie"),
            Self::Locked => write!(f, "locked"),
        }
    }
}

/// Final outcome of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    Won(Mark),
    Tie,
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Won(mark) => write!(f, "{} wins", mark),
            Self::Tie => write!(f, "tie"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn other_flips() {
        assert_eq!(Mark::X.other(), Mark::O);
        assert_eq!(Mark::O.other(), Mark::X);
    }
    #[test]
    fn only_won_claims_carry_a_mark() {
        assert_eq!(Claim::Won(Mark::X).mark(), Some(Mark::X));
        assert_eq!(Claim::Tie.mark(), None);
        assert_eq!(Claim::Locked.mark(), None);
    }
}
