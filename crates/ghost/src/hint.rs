use crate::best_move;
use gg_board::Board;
use gg_board::Mark;
use gg_board::Target;
use gg_core::DEPTH_MEDIUM;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

/// A suggested move for the tutorial, with a rationale line.
///
/// The rationale is cosmetic: one of a fixed template set, carrying no
/// contract about why the search actually chose the move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hint {
    pub target: Target,
    pub reason: String,
}

/// Depth-2 suggestion for the player. `None` when no legal move exists.
pub fn hint<R>(board: &Board, mark: Mark, rng: &mut R) -> Option<Hint>
where
    R: Rng + ?Sized,
{
    let target = best_move(board, mark, DEPTH_MEDIUM)?;
    Some(Hint {
        target,
        reason: rationale(target, rng),
    })
}

fn rationale<R>(target: Target, rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    let templates: [String; 4] = [
        format!("Playing here controls sub-grid {}", target.grid + 1),
        "This move sends opponent to a favorable position".to_string(),
        "Strategic center/corner control".to_string(),
        "Blocks opponent's winning threat".to_string(),
    ];
    templates.choose(rng).cloned().unwrap_or_default()
}
