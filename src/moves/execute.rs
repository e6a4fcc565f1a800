use crate::board::{Board, Side};
use crate::moves::movegen::generate_pseudo_legal;
use crate::moves::square_control::{in_check, kings_facing};
use crate::moves::types::{Move, MoveBuffer, Undo};

/// Apply `mv`, returning the record `undo_move` needs. The caller must have
/// filtered the move through `generate_legal`; feeding an arbitrary move
/// corrupts the incremental state, which debug builds catch via
/// `assert_hash` after the matching `undo_move`.
pub fn make_move(board: &mut Board, mv: Move) -> Undo {
    let piece = board
        .piece_at(mv.from)
        .expect("make_move from an empty square");
    let captured = board.piece_at(mv.to);

    // Clear the origin first: `set` keeps the king cache in step, and the
    // destination write must win when the mover is a king.
    board.set(mv.from.row(), mv.from.col(), None);
    board.set(mv.to.row(), mv.to.col(), Some(piece));
    board.toggle_side_key();

    Undo {
        from: mv.from,
        to: mv.to,
        piece,
        captured,
    }
}

/// Exact inverse of `make_move`: grid, hash, count and king cache are
/// restored bit-identically.
pub fn undo_move(board: &mut Board, undo: &Undo) {
    board.toggle_side_key();
    // Destination first so a king mover's cache entry is rewritten by the
    // origin write below.
    board.set(undo.to.row(), undo.to.col(), undo.captured);
    board.set(undo.from.row(), undo.from.col(), Some(undo.piece));
}

/// A null move only hands the turn over: the hash flips its side key and
/// nothing else changes.
pub fn make_null_move(board: &mut Board) {
    board.toggle_side_key();
}

pub fn undo_null_move(board: &mut Board) {
    board.toggle_side_key();
}

/// Legal moves for `side`: pseudo-legal moves that neither leave the own
/// king attacked nor the two kings facing. Filtering makes and unmakes
/// each candidate in place.
pub fn generate_legal(
    board: &mut Board,
    side: Side,
    out: &mut impl MoveBuffer,
    scratch: &mut impl MoveBuffer,
) {
    scratch.clear();
    generate_pseudo_legal(board, side, scratch);
    for i in 0..scratch.len() {
        let mv = scratch[i];
        let undo = make_move(board, mv);
        let ok = !in_check(board, side) && !kings_facing(board);
        undo_move(board, &undo);
        if ok {
            out.push(mv);
        }
    }
}

/// Convenience for callers that don't manage their own buffers (status
/// checks, tests). The search keeps per-ply arenas instead.
pub fn legal_moves(board: &mut Board, side: Side) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    let mut scratch = Vec::with_capacity(128);
    generate_legal(board, side, &mut out, &mut scratch);
    out
}
