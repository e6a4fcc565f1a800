use crate::board::{
    Board, PieceKind, Side, Square, crossed_river, in_board, in_palace, on_home_side,
};
use crate::moves::types::{Move, MoveBuffer};

pub const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Horse jumps paired with the leg square that must be empty, both as
/// offsets from the horse. For `(±2, ±1)` the leg is `(±1, 0)`; for
/// `(±1, ±2)` it is `(0, ±1)`.
pub const HORSE_JUMPS: [((i8, i8), (i8, i8)); 8] = [
    ((2, 1), (1, 0)),
    ((2, -1), (1, 0)),
    ((-2, 1), (-1, 0)),
    ((-2, -1), (-1, 0)),
    ((1, 2), (0, 1)),
    ((1, -2), (0, -1)),
    ((-1, 2), (0, 1)),
    ((-1, -2), (0, -1)),
];

/// Elephant steps paired with the eye square, both as offsets.
pub const ELEPHANT_STEPS: [((i8, i8), (i8, i8)); 4] = [
    ((2, 2), (1, 1)),
    ((2, -2), (1, -1)),
    ((-2, 2), (-1, 1)),
    ((-2, -2), (-1, -1)),
];

/// Push `from -> (row, col)` when the target is on the board and not
/// occupied by a friendly piece.
#[inline(always)]
fn push_step(board: &Board, side: Side, from: Square, row: i8, col: i8, out: &mut impl MoveBuffer) {
    if !in_board(row, col) {
        return;
    }
    match board.get(row, col) {
        Some(p) if p.side == side => {}
        _ => out.push(Move::new(from, Square::from_coords(row, col))),
    }
}

pub fn generate_king_moves(board: &Board, from: Square, side: Side, out: &mut impl MoveBuffer) {
    for (dr, dc) in ORTHOGONAL {
        let (r, c) = (from.row() + dr, from.col() + dc);
        if in_palace(side, r, c) {
            push_step(board, side, from, r, c, out);
        }
    }
}

pub fn generate_advisor_moves(board: &Board, from: Square, side: Side, out: &mut impl MoveBuffer) {
    for (dr, dc) in DIAGONAL {
        let (r, c) = (from.row() + dr, from.col() + dc);
        if in_palace(side, r, c) {
            push_step(board, side, from, r, c, out);
        }
    }
}

pub fn generate_elephant_moves(board: &Board, from: Square, side: Side, out: &mut impl MoveBuffer) {
    for ((dr, dc), (er, ec)) in ELEPHANT_STEPS {
        let (r, c) = (from.row() + dr, from.col() + dc);
        if !in_board(r, c) || !on_home_side(side, r) {
            continue;
        }
        // The elephant eye must be empty.
        if !board.is_empty(from.row() + er, from.col() + ec) {
            continue;
        }
        push_step(board, side, from, r, c, out);
    }
}

pub fn generate_rook_moves(board: &Board, from: Square, side: Side, out: &mut impl MoveBuffer) {
    for (dr, dc) in ORTHOGONAL {
        let (mut r, mut c) = (from.row() + dr, from.col() + dc);
        while in_board(r, c) {
            match board.get(r, c) {
                None => out.push(Move::new(from, Square::from_coords(r, c))),
                Some(p) => {
                    if p.side != side {
                        out.push(Move::new(from, Square::from_coords(r, c)));
                    }
                    break;
                }
            }
            r += dr;
            c += dc;
        }
    }
}

pub fn generate_horse_moves(board: &Board, from: Square, side: Side, out: &mut impl MoveBuffer) {
    for ((dr, dc), (lr, lc)) in HORSE_JUMPS {
        if !board.is_empty(from.row() + lr, from.col() + lc) {
            continue;
        }
        let (r, c) = (from.row() + dr, from.col() + dc);
        if in_board(r, c) {
            push_step(board, side, from, r, c, out);
        }
    }
}

pub fn generate_cannon_moves(board: &Board, from: Square, side: Side, out: &mut impl MoveBuffer) {
    for (dr, dc) in ORTHOGONAL {
        let (mut r, mut c) = (from.row() + dr, from.col() + dc);
        let mut screened = false;
        while in_board(r, c) {
            match board.get(r, c) {
                None => {
                    if !screened {
                        out.push(Move::new(from, Square::from_coords(r, c)));
                    }
                }
                Some(p) => {
                    if screened {
                        if p.side != side {
                            out.push(Move::new(from, Square::from_coords(r, c)));
                        }
                        break;
                    }
                    screened = true;
                }
            }
            r += dr;
            c += dc;
        }
    }
}

pub fn generate_pawn_moves(board: &Board, from: Square, side: Side, out: &mut impl MoveBuffer) {
    push_step(board, side, from, from.row() + side.forward(), from.col(), out);
    if crossed_river(side, from.row()) {
        push_step(board, side, from, from.row(), from.col() - 1, out);
        push_step(board, side, from, from.row(), from.col() + 1, out);
    }
}

/// Pseudo-legal moves for the piece standing on `(row, col)`; no-op when
/// the square is empty. Writes into the caller's scratch buffer.
pub fn generate_piece_moves(board: &Board, row: i8, col: i8, out: &mut impl MoveBuffer) {
    let Some(piece) = board.get(row, col) else {
        return;
    };
    let from = Square::from_coords(row, col);
    match piece.kind {
        PieceKind::King => generate_king_moves(board, from, piece.side, out),
        PieceKind::Advisor => generate_advisor_moves(board, from, piece.side, out),
        PieceKind::Elephant => generate_elephant_moves(board, from, piece.side, out),
        PieceKind::Rook => generate_rook_moves(board, from, piece.side, out),
        PieceKind::Horse => generate_horse_moves(board, from, piece.side, out),
        PieceKind::Cannon => generate_cannon_moves(board, from, piece.side, out),
        PieceKind::Pawn => generate_pawn_moves(board, from, piece.side, out),
    }
}

/// All pseudo-legal moves for `side`, grid order (row-major) so the move
/// order, and with it tie-breaking downstream, is deterministic.
pub fn generate_pseudo_legal(board: &Board, side: Side, out: &mut impl MoveBuffer) {
    for (sq, piece) in board.iter() {
        if piece.side == side {
            generate_piece_moves(board, sq.row(), sq.col(), out);
        }
    }
}
