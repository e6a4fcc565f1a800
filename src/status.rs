use crate::board::{Board, Side};
use crate::moves::execute::legal_moves;
use crate::moves::square_control::in_check;

/// Verdict for the side to move. Xiangqi has no stalemate draw: a side
/// with no legal move has lost, mated or not. Draws by agreement are the
/// caller's business, not the core's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InPlay,
    Won(Side),
}

pub fn position_status(board: &mut Board, side_to_move: Side) -> GameStatus {
    if legal_moves(board, side_to_move).is_empty() {
        GameStatus::Won(side_to_move.opposite())
    } else {
        GameStatus::InPlay
    }
}

/// Thin rules-layer alias over the targeted attack probe.
#[inline]
pub fn side_in_check(board: &Board, side: Side) -> bool {
    in_check(board, side)
}
