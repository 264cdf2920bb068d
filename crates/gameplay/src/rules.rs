use gg_board::Board;
use gg_board::Claim;
use gg_board::GameResult;
use gg_board::Mark;
use gg_board::Target;
use gg_core::GRIDS;
use serde::Serialize;

/// Why a candidate move was refused. Always recoverable: the board is
/// unchanged and only the submitting player is told.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    GameOver,
    WrongTurn,
    OutOfRange,
    SubGridNotActive,
    CellOccupied,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::GameOver => write!(f, "game is already over"),
            Self::WrongTurn => write!(f, "not your turn"),
            Self::OutOfRange => write!(f, "cell address out of range"),
            Self::SubGridNotActive => write!(f, "that sub-grid is not playable"),
            Self::CellOccupied => write!(f, "cell is already occupied"),
        }
    }
}

impl std::error::Error for Rejection {}

/// Check a candidate move against the current board. The board is
/// untouched either way.
pub fn validate(board: &Board, target: Target, mark: Mark) -> Result<(), Rejection> {
    if board.game_over() {
        return Err(Rejection::GameOver);
    }
    if board.turn() != mark {
        return Err(Rejection::WrongTurn);
    }
    if !target.in_range() {
        return Err(Rejection::OutOfRange);
    }
    if board.active().is_some_and(|active| active != target.grid) {
        return Err(Rejection::SubGridNotActive);
    }
    if !board.is_open(target.grid) {
        return Err(Rejection::SubGridNotActive);
    }
    if board.cell(target).is_some() {
        return Err(Rejection::CellOccupied);
    }
    Ok(())
}

/// Apply a pre-validated move, returning the successor board.
///
/// Writes the marker, resolves the sub-grid into its master cell (win
/// or full-grid tie), resolves the match over the master grid, derives
/// the next active sub-grid from the move's in-grid position, and flips
/// the turn unless the game just ended.
pub fn apply(board: &Board, target: Target, mark: Mark) -> Board {
    let mut next = board.clone();
    next.mark_cell(target, mark);
    if next.is_open(target.grid) {
        if let Some(winner) = next.sub(target.grid).winner() {
            next.set_claim(target.grid, Claim::Won(winner));
        } else if next.sub(target.grid).is_full() {
            next.set_claim(target.grid, Claim::Tie);
        }
    }
    if let Some(winner) = next.master_winner() {
        next.set_winner(GameResult::Won(winner));
    } else if next.master_full() {
        next.set_winner(GameResult::Tie);
    }
    let sent = target.next_grid();
    next.set_active(next.is_open(sent).then_some(sent));
    if !next.game_over() {
        next.set_turn(mark.other());
    }
    next
}

/// Every cell the current mover may legally play, honoring the active
/// sub-grid restriction and hazard locks. Used by the ghost for
/// enumeration and by tests as the ground truth for [`validate`].
pub fn legal(board: &Board) -> Vec<Target> {
    if board.game_over() {
        return Vec::new();
    }
    let grids: Vec<_> = match board.active() {
        Some(grid) => vec![grid],
        None => (0..GRIDS).filter(|g| board.is_open(*g)).collect(),
    };
    grids
        .into_iter()
        .filter(|grid| board.is_open(*grid))
        .flat_map(|grid| {
            board
                .sub(grid)
                .cells()
                .filter(|(_, _, cell)| cell.is_none())
                .map(move |(row, col, _)| Target::new(grid, row, col))
                .collect::<Vec<_>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(board: Board, grid: usize, row: usize, col: usize) -> Board {
        let target = Target::new(grid, row, col);
        let mark = board.turn();
        validate(&board, target, mark).expect("legal move");
        apply(&board, target, mark)
    }

    #[test]
    fn rejects_after_game_over() {
        let mut board = Board::new();
        board.set_winner(GameResult::Won(Mark::X));
        assert_eq!(
            validate(&board, Target::new(0, 0, 0), Mark::X),
            Err(Rejection::GameOver)
        );
    }
    #[test]
    fn rejects_wrong_turn() {
        let board = Board::new();
        assert_eq!(
            validate(&board, Target::new(0, 0, 0), Mark::O),
            Err(Rejection::WrongTurn)
        );
    }
    #[test]
    fn rejects_out_of_range() {
        let board = Board::new();
        assert_eq!(
            validate(&board, Target::new(9, 0, 0), Mark::X),
            Err(Rejection::OutOfRange)
        );
        assert_eq!(
            validate(&board, Target::new(0, 3, 1), Mark::X),
            Err(Rejection::OutOfRange)
        );
    }
    #[test]
    fn rejects_inactive_sub_grid() {
        let mut board = Board::new();
        board.set_active(Some(4));
        assert_eq!(
            validate(&board, Target::new(0, 0, 0), Mark::X),
            Err(Rejection::SubGridNotActive)
        );
    }
    #[test]
    fn rejects_locked_sub_grid() {
        let mut board = Board::new();
        board.lock(2);
        assert_eq!(
            validate(&board, Target::new(2, 0, 0), Mark::X),
            Err(Rejection::SubGridNotActive)
        );
    }
    #[test]
    fn rejects_occupied_cell_regardless_of_turn() {
        let mut board = Board::new();
        board.mark_cell(Target::new(0, 0, 0), Mark::O);
        assert_eq!(
            validate(&board, Target::new(0, 0, 0), Mark::X),
            Err(Rejection::CellOccupied)
        );
        board.set_turn(Mark::O);
        assert_eq!(
            validate(&board, Target::new(0, 0, 0), Mark::O),
            Err(Rejection::CellOccupied)
        );
    }
    #[test]
    fn center_move_activates_center_grid() {
        let board = play(Board::new(), 4, 1, 1);
        assert_eq!(board.active(), Some(4));
        assert_eq!(board.turn(), Mark::O);
        assert_eq!(board.cell(Target::new(4, 1, 1)), Some(Mark::X));
    }
    #[test]
    fn activation_falls_back_to_any_when_grid_is_closed() {
        let mut board = Board::new();
        board.lock(4);
        board.set_active(None);
        // X plays the center cell of grid 0, which would send O to the
        // locked grid 4.
        let next = apply(&board, Target::new(0, 1, 1), Mark::X);
        assert_eq!(next.active(), None);
    }
    #[test]
    fn winning_a_sub_grid_claims_the_master_cell() {
        let mut board = Board::new();
        board.mark_cell(Target::new(0, 0, 0), Mark::X);
        board.mark_cell(Target::new(0, 0, 1), Mark::X);
        board.set_active(Some(0));
        let next = apply(&board, Target::new(0, 0, 2), Mark::X);
        assert_eq!(next.claim(0), Some(Claim::Won(Mark::X)));
        assert_eq!(next.sub(0).winner(), Some(Mark::X));
        // (0,2) sends to grid 2, which is still open.
        assert_eq!(next.active(), Some(2));
    }
    #[test]
    fn full_sub_grid_without_winner_ties_its_master_cell() {
        let mut board = Board::new();
        // X O X / X O O / O X _ then X fills the last cell.
        let layout = [
            (0, 0, Mark::X),
            (0, 1, Mark::O),
            (0, 2, Mark::X),
            (1, 0, Mark::X),
            (1, 1, Mark::O),
            (1, 2, Mark::O),
            (2, 0, Mark::O),
            (2, 1, Mark::X),
        ];
        for (row, col, mark) in layout {
            board.mark_cell(Target::new(3, row, col), mark);
        }
        let next = apply(&board, Target::new(3, 2, 2), Mark::X);
        assert_eq!(next.claim(3), Some(Claim::Tie));
        assert!(!next.game_over());
    }
    #[test]
    fn master_three_in_a_row_ends_the_match() {
        let mut board = Board::new();
        board.set_claim(0, Claim::Won(Mark::X));
        board.set_claim(1, Claim::Won(Mark::X));
        board.mark_cell(Target::new(2, 0, 0), Mark::X);
        board.mark_cell(Target::new(2, 0, 1), Mark::X);
        board.set_active(Some(2));
        let next = apply(&board, Target::new(2, 0, 2), Mark::X);
        assert_eq!(next.winner(), Some(GameResult::Won(Mark::X)));
        assert!(next.game_over());
        // Turn is frozen once the game ends.
        assert_eq!(next.turn(), Mark::X);
    }
    #[test]
    fn all_grids_resolved_without_master_winner_is_a_tie() {
        let mut board = Board::new();
        // X O X / O X O / O X O over the master grid: no triple matches.
        let claims = [
            Claim::Won(Mark::X),
            Claim::Won(Mark::O),
            Claim::Won(Mark::X),
            Claim::Won(Mark::O),
            Claim::Tie,
            Claim::Won(Mark::O),
            Claim::Won(Mark::O),
            Claim::Won(Mark::X),
        ];
        for (grid, claim) in claims.into_iter().enumerate() {
            board.set_claim(grid, claim);
        }
        // Grid 8 resolves as a tie on this move.
        let layout = [
            (0, 0, Mark::X),
            (0, 1, Mark::O),
            (0, 2, Mark::X),
            (1, 0, Mark::X),
            (1, 1, Mark::O),
            (1, 2, Mark::O),
            (2, 0, Mark::O),
            (2, 1, Mark::X),
        ];
        for (row, col, mark) in layout {
            board.mark_cell(Target::new(8, row, col), mark);
        }
        board.set_active(Some(8));
        let next = apply(&board, Target::new(8, 2, 2), Mark::X);
        assert_eq!(next.winner(), Some(GameResult::Tie));
    }
    #[test]
    fn legal_respects_active_restriction_and_locks() {
        let mut board = Board::new();
        board.set_active(Some(4));
        let moves = legal(&board);
        assert_eq!(moves.len(), 9);
        assert!(moves.iter().all(|t| t.grid == 4));

        board.set_active(None);
        board.lock(0);
        board.set_claim(1, Claim::Won(Mark::O));
        let moves = legal(&board);
        assert!(moves.iter().all(|t| t.grid != 0 && t.grid != 1));
        assert_eq!(moves.len(), 7 * 9);
    }
    #[test]
    fn every_legal_move_validates() {
        let mut board = Board::new();
        board.lock(6);
        board.set_active(None);
        for target in legal(&board) {
            assert_eq!(validate(&board, target, board.turn()), Ok(()));
        }
    }
}
