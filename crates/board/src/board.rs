use crate::Claim;
use crate::GameResult;
use crate::Grid;
use crate::Mark;
use crate::Target;
use gg_core::GRIDS;
use gg_core::GridIdx;
use gg_core::SIDE;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeSet;

/// The full recursive board: nine sub-grids, the master grid they
/// resolve into, and the turn/active/winner bookkeeping.
///
/// The mutating methods here are engine primitives. Ordinary play goes
/// through the gameplay crate's validate/apply pair; only the hazard
/// mutator may clear or swap occupied cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    master: Grid<Claim>,
    subs: [Grid<Mark>; GRIDS],
    active: Option<GridIdx>,
    turn: Mark,
    winner: Option<GameResult>,
    locked: BTreeSet<GridIdx>,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            master: Grid::default(),
            subs: std::array::from_fn(|_| Grid::default()),
            active: None,
            turn: Mark::X,
            winner: None,
            locked: BTreeSet::new(),
        }
    }
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn master(&self) -> &Grid<Claim> {
        &self.master
    }
    pub fn sub(&self, grid: GridIdx) -> &Grid<Mark> {
        &self.subs[grid]
    }
    /// The sub-grid the current mover is restricted to. `None` means
    /// any unresolved sub-grid is legal.
    pub fn active(&self) -> Option<GridIdx> {
        self.active
    }
    pub fn turn(&self) -> Mark {
        self.turn
    }
    pub fn winner(&self) -> Option<GameResult> {
        self.winner
    }
    pub fn game_over(&self) -> bool {
        self.winner.is_some()
    }
    /// Sub-grid indices disabled by hazard locks. Distinct from won
    /// grids: a locked grid blocks moves but was completed by no one.
    pub fn locked(&self) -> &BTreeSet<GridIdx> {
        &self.locked
    }
    /// Ownership of the master cell corresponding to a sub-grid.
    pub fn claim(&self, grid: GridIdx) -> Option<Claim> {
        self.master.get(grid / SIDE, grid % SIDE)
    }
    /// True when the sub-grid's master cell is still unclaimed.
    pub fn is_open(&self, grid: GridIdx) -> bool {
        self.claim(grid).is_none()
    }
    /// The marker at a cell address.
    pub fn cell(&self, target: Target) -> Option<Mark> {
        self.subs[target.grid].get(target.row, target.col)
    }
    /// All occupied cell addresses, row-major across sub-grids.
    pub fn occupied(&self) -> Vec<Target> {
        (0..GRIDS)
            .flat_map(|grid| {
                self.subs[grid]
                    .cells()
                    .filter(|(_, _, cell)| cell.is_some())
                    .map(move |(row, col, _)| Target::new(grid, row, col))
            })
            .collect()
    }
    /// Match winner implied by the master grid, through the same
    /// predicate that resolves sub-grids.
    pub fn master_winner(&self) -> Option<Mark> {
        self.master.project(Claim::mark).winner()
    }
    /// True when every master cell is claimed.
    pub fn master_full(&self) -> bool {
        self.master.is_full()
    }
}

/// Engine primitives. Callers are responsible for validation.
impl Board {
    pub fn mark_cell(&mut self, target: Target, mark: Mark) {
        self.subs[target.grid].set(target.row, target.col, Some(mark));
    }
    /// Hazard primitive: reset a cell to empty, returning what it held.
    pub fn clear_cell(&mut self, target: Target) -> Option<Mark> {
        let cleared = self.cell(target);
        self.subs[target.grid].set(target.row, target.col, None);
        cleared
    }
    /// Hazard primitive: exchange the markers at two cell addresses.
    pub fn swap_cells(&mut self, first: Target, second: Target) {
        let a = self.cell(first);
        let b = self.cell(second);
        self.subs[first.grid].set(first.row, first.col, b);
        self.subs[second.grid].set(second.row, second.col, a);
    }
    pub fn set_claim(&mut self, grid: GridIdx, claim: Claim) {
        self.master.set(grid / SIDE, grid % SIDE, Some(claim));
    }
    /// Hazard primitive: disable a sub-grid for the rest of the match.
    pub fn lock(&mut self, grid: GridIdx) {
        self.set_claim(grid, Claim::Locked);
        self.locked.insert(grid);
    }
    pub fn set_active(&mut self, active: Option<GridIdx>) {
        self.active = active;
    }
    pub fn set_turn(&mut self, turn: Mark) {
        self.turn = turn;
    }
    pub fn set_winner(&mut self, winner: GameResult) {
        self.winner = Some(winner);
    }
    /// Drop the active-sub-grid restriction if it points at a grid
    /// that is no longer open. Called after every hazard strike.
    pub fn reanchor(&mut self) {
        if let Some(grid) = self.active {
            if !self.is_open(grid) {
                self.active = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_board() {
        let board = Board::new();
        assert_eq!(board.turn(), Mark::X);
        assert_eq!(board.active(), None);
        assert!(!board.game_over());
        assert!((0..GRIDS).all(|g| board.is_open(g)));
        assert!(board.occupied().is_empty());
    }
    #[test]
    fn claim_addresses_row_major() {
        let mut board = Board::new();
        board.set_claim(5, Claim::Won(Mark::O));
        assert_eq!(board.master().get(1, 2), Some(Claim::Won(Mark::O)));
        assert_eq!(board.claim(5), Some(Claim::Won(Mark::O)));
        assert!(!board.is_open(5));
    }
    #[test]
    fn lock_claims_and_records() {
        let mut board = Board::new();
        board.lock(3);
        assert_eq!(board.claim(3), Some(Claim::Locked));
        assert!(board.locked().contains(&3));
        assert!(!board.is_open(3));
    }
    #[test]
    fn swap_exchanges_markers() {
        let mut board = Board::new();
        let a = Target::new(0, 0, 0);
        let b = Target::new(0, 0, 1);
        board.mark_cell(a, Mark::X);
        board.mark_cell(b, Mark::O);
        board.swap_cells(a, b);
        assert_eq!(board.cell(a), Some(Mark::O));
        assert_eq!(board.cell(b), Some(Mark::X));
    }
    #[test]
    fn reanchor_releases_closed_grids() {
        let mut board = Board::new();
        board.set_active(Some(4));
        board.lock(4);
        board.reanchor();
        assert_eq!(board.active(), None);
        board.set_active(Some(2));
        board.reanchor();
        assert_eq!(board.active(), Some(2));
    }
}
