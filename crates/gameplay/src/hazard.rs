use gg_board::Board;
use gg_board::Mark;
use gg_board::Target;
use gg_core::GRIDS;
use gg_core::GridIdx;
use gg_core::HAZARD_INTERVAL;
use gg_core::SIDE;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

/// A single environment mutation that landed on the board.
///
/// Carries the affected coordinates so clients can animate the change;
/// [`Hazard::message`] is the banner text shown to both players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Hazard {
    LockSubGrid { grid: GridIdx },
    SwapCells { first: Target, second: Target },
    ClearCell { cell: Target, cleared: Mark },
}

impl Hazard {
    pub fn message(&self) -> String {
        match self {
            Self::LockSubGrid { grid } => {
                format!("Hazard Zone! Sub-grid {} has been LOCKED!", grid + 1)
            }
            Self::SwapCells { .. } => {
                "Hazard Zone! Two adjacent cells have been SWAPPED!".to_string()
            }
            Self::ClearCell { cleared, .. } => {
                format!("Hazard Zone! A {} mark has been CLEARED!", cleared)
            }
        }
    }
}

impl std::fmt::Display for Hazard {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::LockSubGrid { grid } => write!(f, "lock g{}", grid),
            Self::SwapCells { first, second } => write!(f, "swap {} {}", first, second),
            Self::ClearCell { cell, cleared } => write!(f, "clear {} ({})", cell, cleared),
        }
    }
}

/// True exactly when the applied-move counter lands on a hazard beat:
/// after the 5th, 10th, 15th... successfully applied move.
pub fn due(moves: u64) -> bool {
    moves > 0 && moves % HAZARD_INTERVAL == 0
}

/// Perturb the board with one uniformly-chosen mutation kind.
///
/// Returns the successor board and the event to broadcast, or `None`
/// when the chosen kind has no eligible target, in which case the
/// trigger is skipped for this beat. Never touches `turn` or `winner`;
/// the orchestrator re-derives the active sub-grid afterwards.
pub fn strike<R>(board: &Board, rng: &mut R) -> Option<(Board, Hazard)>
where
    R: Rng + ?Sized,
{
    match rng.random_range(0..3) {
        0 => lock_sub_grid(board, rng),
        1 => swap_cells(board, rng),
        _ => clear_cell(board, rng),
    }
}

/// Lock a uniformly-chosen sub-grid whose master cell is still empty.
fn lock_sub_grid<R>(board: &Board, rng: &mut R) -> Option<(Board, Hazard)>
where
    R: Rng + ?Sized,
{
    let open: Vec<GridIdx> = (0..GRIDS).filter(|g| board.is_open(*g)).collect();
    let grid = *open.choose(rng)?;
    let mut next = board.clone();
    next.lock(grid);
    Some((next, Hazard::LockSubGrid { grid }))
}

/// Exchange a uniformly-chosen occupied cell with an occupied neighbor
/// in the same sub-grid.
fn swap_cells<R>(board: &Board, rng: &mut R) -> Option<(Board, Hazard)>
where
    R: Rng + ?Sized,
{
    let occupied = board.occupied();
    let first = *occupied.choose(rng)?;
    let neighbors = occupied_neighbors(board, first);
    let second = *neighbors.choose(rng)?;
    let mut next = board.clone();
    next.swap_cells(first, second);
    Some((next, Hazard::SwapCells { first, second }))
}

/// Reset a uniformly-chosen occupied cell to empty.
fn clear_cell<R>(board: &Board, rng: &mut R) -> Option<(Board, Hazard)>
where
    R: Rng + ?Sized,
{
    let occupied = board.occupied();
    let cell = *occupied.choose(rng)?;
    let mut next = board.clone();
    let cleared = next.clear_cell(cell)?;
    Some((next, Hazard::ClearCell { cell, cleared }))
}

/// Occupied cells in the 8-neighborhood of a cell, within its sub-grid.
fn occupied_neighbors(board: &Board, cell: Target) -> Vec<Target> {
    const DIRECTIONS: [(isize, isize); 8] = [
        (-1, 0),
        (1, 0),
        (0, -1),
        (0, 1),
        (-1, -1),
        (-1, 1),
        (1, -1),
        (1, 1),
    ];
    DIRECTIONS
        .iter()
        .filter_map(|(dr, dc)| {
            let row = cell.row.checked_add_signed(*dr)?;
            let col = cell.col.checked_add_signed(*dc)?;
            (row < SIDE && col < SIDE).then(|| Target::new(cell.grid, row, col))
        })
        .filter(|t| board.cell(*t).is_some())
        .collect()
}
