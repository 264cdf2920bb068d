use gg_board::Board;
use gg_board::Claim;
use gg_board::Mark;
use gg_board::Target;
use gg_core::CENTER_BONUS;
use gg_core::CORNER_BONUS;
use gg_core::MASTER_CELL_WEIGHT;
use gg_core::Score;
use gg_core::TERMINAL_SCORE;
use gg_gameplay::apply;
use gg_gameplay::legal;

/// Best legal move for `mark` under depth-limited minimax.
///
/// Returns `None` only when no legal move exists. Every candidate is
/// simulated through the same apply function ordinary play uses, so
/// the result always validates.
pub fn best_move(board: &Board, mark: Mark, depth: u8) -> Option<Target> {
    let mut best: Option<(Score, Target)> = None;
    for target in legal(board) {
        let next = apply(board, target, mark);
        let score = minimax(
            &next,
            depth.saturating_sub(1),
            Score::MIN,
            Score::MAX,
            false,
            mark,
        );
        match best {
            Some((top, _)) if score <= top => {}
            _ => best = Some((score, target)),
        }
    }
    best.map(|(_, target)| target)
}

/// Alpha-beta minimax. `depth` is the remaining search budget;
/// terminal positions prefer faster wins and slower losses by folding
/// the remaining depth into the score.
fn minimax(
    board: &Board,
    depth: u8,
    mut alpha: Score,
    mut beta: Score,
    maximizing: bool,
    me: Mark,
) -> Score {
    if board.game_over() {
        return match board.winner().and_then(|r| match r {
            gg_board::GameResult::Won(w) => Some(w),
            gg_board::GameResult::Tie => None,
        }) {
            Some(w) if w == me => TERMINAL_SCORE + Score::from(depth),
            Some(_) => -TERMINAL_SCORE - Score::from(depth),
            None => 0,
        };
    }
    if depth == 0 {
        return evaluate(board, me);
    }
    let mover = if maximizing { me } else { me.other() };
    if maximizing {
        let mut max = Score::MIN;
        for target in legal(board) {
            let next = apply(board, target, mover);
            let score = minimax(&next, depth - 1, alpha, beta, false, me);
            max = max.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        max
    } else {
        let mut min = Score::MAX;
        for target in legal(board) {
            let next = apply(board, target, mover);
            let score = minimax(&next, depth - 1, alpha, beta, true, me);
            min = min.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        min
    }
}

/// Static evaluation of a non-terminal position from `me`'s side:
/// master-cell control, with bonuses for the center and corners.
/// Locked and tied cells score nothing for either side.
fn evaluate(board: &Board, me: Mark) -> Score {
    let mut score = 0;
    for (_, _, cell) in board.master().cells() {
        match cell.and_then(Claim::mark) {
            Some(w) if w == me => score += MASTER_CELL_WEIGHT,
            Some(_) => score -= MASTER_CELL_WEIGHT,
            None => {}
        }
    }
    if board.master().get(1, 1).and_then(Claim::mark) == Some(me) {
        score += CENTER_BONUS;
    }
    for (row, col) in [(0, 0), (0, 2), (2, 0), (2, 2)] {
        if board.master().get(row, col).and_then(Claim::mark) == Some(me) {
            score += CORNER_BONUS;
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use gg_gameplay::validate;

    #[test]
    fn search_result_always_validates() {
        let mut board = Board::new();
        board.lock(3);
        board.set_active(None);
        for depth in 1..=4 {
            let target = best_move(&board, Mark::X, depth).expect("moves exist");
            assert_eq!(validate(&board, target, Mark::X), Ok(()));
        }
    }
    #[test]
    fn takes_an_immediate_master_win() {
        let mut board = Board::new();
        board.set_claim(0, Claim::Won(Mark::X));
        board.set_claim(1, Claim::Won(Mark::X));
        board.mark_cell(Target::new(2, 1, 0), Mark::X);
        board.mark_cell(Target::new(2, 1, 1), Mark::X);
        board.set_active(Some(2));
        let target = best_move(&board, Mark::X, 2).expect("moves exist");
        assert_eq!(target, Target::new(2, 1, 2));
    }
    #[test]
    fn depth_four_ghost_blocks_an_imminent_win() {
        // X owns master cells 0 and 1 and completes the top master row
        // by taking sub-grid 2 at (0,2). Every other sub-grid is
        // resolved, so whatever O plays, X gets back into sub-grid 2;
        // O's only non-losing move is the block at (0,2).
        let mut board = Board::new();
        board.set_claim(0, Claim::Won(Mark::X));
        board.set_claim(1, Claim::Won(Mark::X));
        for grid in 3..9 {
            board.set_claim(grid, Claim::Tie);
        }
        board.mark_cell(Target::new(2, 0, 0), Mark::X);
        board.mark_cell(Target::new(2, 0, 1), Mark::X);
        // O marks placed to rule out X double threats inside grid 2.
        board.mark_cell(Target::new(2, 1, 1), Mark::O);
        board.mark_cell(Target::new(2, 2, 2), Mark::O);
        board.set_turn(Mark::O);
        board.set_active(Some(2));
        let target = best_move(&board, Mark::O, 4).expect("moves exist");
        assert_eq!(target, Target::new(2, 0, 2));
    }
    #[test]
    fn evaluation_prefers_master_control() {
        let mut board = Board::new();
        board.set_claim(4, Claim::Won(Mark::X));
        board.set_claim(0, Claim::Won(Mark::O));
        // X: +3 for the cell, +2 center, -3 for O's corner cell.
        assert_eq!(evaluate(&board, Mark::X), 2);
        // O: +3 for the cell, +1 corner, -3 for X's center cell.
        assert_eq!(evaluate(&board, Mark::O), 1);
    }
    #[test]
    fn locked_cells_score_nothing() {
        let mut board = Board::new();
        board.lock(4);
        board.set_claim(8, Claim::Tie);
        assert_eq!(evaluate(&board, Mark::X), 0);
        assert_eq!(evaluate(&board, Mark::O), 0);
    }
    #[test]
    fn no_moves_means_no_suggestion() {
        let mut board = Board::new();
        board.set_winner(gg_board::GameResult::Tie);
        assert_eq!(best_move(&board, Mark::X, 3), None);
    }
}
