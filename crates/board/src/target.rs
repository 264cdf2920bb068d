use gg_core::Coord;
use gg_core::GRIDS;
use gg_core::GridIdx;
use gg_core::SIDE;
use serde::Deserialize;
use serde::Serialize;

/// Address of a single playable cell: sub-grid index plus in-grid
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub grid: GridIdx,
    pub row: Coord,
    pub col: Coord,
}

impl Target {
    pub fn new(grid: GridIdx, row: Coord, col: Coord) -> Self {
        Self { grid, row, col }
    }
    /// True when all three coordinates are inside the board.
    pub fn in_range(&self) -> bool {
        self.grid < GRIDS && self.row < SIDE && self.col < SIDE
    }
    /// The sub-grid the opponent is sent to: a move at (row, col)
    /// activates the sub-grid at the same position on the master grid.
    pub fn next_grid(&self) -> GridIdx {
        self.row * SIDE + self.col
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "g{}({},{})", self.grid, self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn range_check() {
        assert!(Target::new(8, 2, 2).in_range());
        assert!(!Target::new(9, 0, 0).in_range());
        assert!(!Target::new(0, 3, 0).in_range());
        assert!(!Target::new(0, 0, 3).in_range());
    }
    #[test]
    fn center_cell_sends_to_center_grid() {
        assert_eq!(Target::new(0, 1, 1).next_grid(), 4);
        assert_eq!(Target::new(7, 0, 2).next_grid(), 2);
        assert_eq!(Target::new(3, 2, 0).next_grid(), 6);
    }
}
