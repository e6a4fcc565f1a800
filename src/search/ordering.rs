use crate::board::{Board, Side};
use crate::moves::types::Move;
use crate::search::context::SearchContext;
use crate::search::psqt::piece_value;

const HASH_MOVE_SCORE: i32 = -2_000_000_000;
const CAPTURE_BASE: i32 = 1_000_000;
const KILLER1_SCORE: i32 = 900_000;
const KILLER2_SCORE: i32 = 800_000;

/// `victim * 10 - attacker`, both as piece values; zero for quiet moves.
/// Only ranks captures against each other — a king capturing anything
/// scores negative, so capture detection must test the target square, not
/// this sign.
pub fn mvv_lva_score(board: &Board, mv: Move) -> i32 {
    let Some(victim) = board.piece_at(mv.to) else {
        return 0;
    };
    let attacker = board
        .piece_at(mv.from)
        .map(|p| piece_value(p.kind))
        .unwrap_or(0);
    piece_value(victim.kind) * 10 - attacker
}

/// Victim value alone; the quiescence MVV ordering.
pub fn mvv_score(board: &Board, mv: Move) -> i32 {
    board
        .piece_at(mv.to)
        .map(|p| piece_value(p.kind))
        .unwrap_or(0)
}

/// Hash move, captures by MVV/LVA, killers, history. Every capture ranks
/// ahead of every killer and quiet. The sort is stable, so equally scored
/// moves keep their generation order and tie-breaking stays deterministic.
pub fn order_moves(
    moves: &mut [Move],
    board: &Board,
    side: Side,
    hash_move: Option<Move>,
    killers: &[Option<Move>; 2],
    ctx: &SearchContext,
) {
    moves.sort_by_cached_key(|&mv| {
        if hash_move == Some(mv) {
            return HASH_MOVE_SCORE;
        }

        if board.piece_at(mv.to).is_some() {
            return -(CAPTURE_BASE + mvv_lva_score(board, mv));
        }

        if killers[0] == Some(mv) {
            return -KILLER1_SCORE;
        }
        if killers[1] == Some(mv) {
            return -KILLER2_SCORE;
        }

        // History saturates well below the killer band.
        -(ctx.history_score(side, mv) as i32)
    });
}
