use crate::board::{PIECE_KINDS, PieceKind, Side};
use crate::dark::board::{DARK_CELLS, DarkBoard};
use crate::dark::movegen::is_threatened;

/// Not the rank order: the cannon's jump keeps it dangerous all game, and
/// pawns are priced above their rank because they alone answer the king.
#[inline(always)]
pub fn dark_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::King => 1000,
        PieceKind::Advisor => 500,
        PieceKind::Cannon => 400,
        PieceKind::Elephant => 350,
        PieceKind::Rook => 250,
        PieceKind::Horse => 180,
        PieceKind::Pawn => 120,
    }
}

pub const DARK_MAX_VALUE: i32 = 1000;

/// A face-down piece cannot act or defend until a tempo is spent on it.
const HIDDEN_NUMER: i32 = 7;
const HIDDEN_DENOM: i32 = 10;

/// A revealed piece standing in capture range is part lost.
const THREAT_DENOM: i32 = 4;

/// Material-dominated score from `side`'s perspective.
///
/// Only public knowledge enters the score. Revealed pieces count at face
/// value (discounted while threatened). Face-down cells are never read
/// individually: which identities are still down is known to both players
/// (the inventory minus everything revealed so far), but not where, so
/// the whole hidden population is priced in aggregate from `hidden_pool`
/// counts. Inside `expect_flip` the substituted cell is revealed, which
/// moves exactly that one piece from the aggregate to the board.
pub fn evaluate_dark(board: &DarkBoard, side: Side) -> i32 {
    let mut score = 0;
    for idx in 0..DARK_CELLS as u8 {
        let Some(p) = board.get(idx) else {
            continue;
        };
        if !p.revealed {
            continue;
        }
        let mut v = dark_value(p.kind);
        if is_threatened(board, idx) {
            v -= dark_value(p.kind) / THREAT_DENOM;
        }
        if p.side == side {
            score += v;
        } else {
            score -= v;
        }
    }

    // Every hidden cell is a uniform draw without replacement from the
    // pool, so summed over all of them the expected material is the pool
    // total per side.
    let (counts, _) = board.hidden_pool();
    let mut hidden = 0;
    for owner in [Side::Red, Side::Black] {
        let sign = if owner == side { 1 } else { -1 };
        for kind in PIECE_KINDS {
            let count = counts[owner.index()][kind.index()] as i32;
            hidden += sign * count * dark_value(kind);
        }
    }
    score + hidden * HIDDEN_NUMER / HIDDEN_DENOM
}
