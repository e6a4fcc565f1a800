//! Piece values, phase weights and the tapered piece-square tables.
//!
//! Tables are Red-oriented: row 0 is the far (Black) back rank, row 9 is
//! Red's own back rank. Black values mirror vertically via `9 - row`.

use crate::board::{Board, PieceKind, Side};

pub const KING_VALUE: i32 = 10000;
pub const ROOK_VALUE: i32 = 900;
pub const CANNON_VALUE: i32 = 450;
pub const HORSE_VALUE: i32 = 450;
pub const ELEPHANT_VALUE: i32 = 200;
pub const ADVISOR_VALUE: i32 = 200;
pub const PAWN_VALUE: i32 = 100;

#[inline(always)]
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::King => KING_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Cannon => CANNON_VALUE,
        PieceKind::Horse => HORSE_VALUE,
        PieceKind::Elephant => ELEPHANT_VALUE,
        PieceKind::Advisor => ADVISOR_VALUE,
        PieceKind::Pawn => PAWN_VALUE,
    }
}

/// Phase weight per kind; kings and pawns carry none.
#[inline(always)]
pub fn phase_weight(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::King | PieceKind::Pawn => 0,
        PieceKind::Advisor | PieceKind::Elephant => 1,
        PieceKind::Rook => 5,
        PieceKind::Horse | PieceKind::Cannon => 3,
    }
}

pub const TOTAL_PHASE: i32 = 28;

/// Phase scalar in 0..=256; 256 is the full middlegame.
pub fn game_phase(board: &Board) -> i32 {
    let current: i32 = board.iter().map(|(_, p)| phase_weight(p.kind)).sum();
    (current * 256 / TOTAL_PHASE).min(256)
}

type Pst = [[i32; 9]; 10];

pub static KING_TABLE: (Pst, Pst) = (
    // mg: stay home; stepping out of the back palace row is a liability.
    [
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, -12, -16, -12, 0, 0, 0],
        [0, 0, 0, -8, -10, -8, 0, 0, 0],
        [0, 0, 0, 2, 6, 2, 0, 0, 0],
    ],
    // eg: a slightly active king helps once the heavy pieces are gone.
    [
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 2, 6, 2, 0, 0, 0],
        [0, 0, 0, 4, 8, 4, 0, 0, 0],
        [0, 0, 0, 0, 4, 0, 0, 0, 0],
    ],
);

pub static ADVISOR_TABLE: (Pst, Pst) = (
    [
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 8, 0, 0, 0, 0],
        [0, 0, 0, 3, 0, 3, 0, 0, 0],
    ],
    [
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 6, 0, 0, 0, 0],
        [0, 0, 0, 2, 0, 2, 0, 0, 0],
    ],
);

pub static ELEPHANT_TABLE: (Pst, Pst) = (
    [
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 2, 0, 0, 0, 2, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [-2, 0, 0, 0, 10, 0, 0, 0, -2],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 5, 0, 0, 0, 5, 0, 0],
    ],
    [
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 3, 0, 0, 0, 3, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 12, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 6, 0, 0, 0, 6, 0, 0],
    ],
);

pub static ROOK_TABLE: (Pst, Pst) = (
    [
        [12, 14, 12, 14, 14, 14, 12, 14, 12],
        [16, 18, 18, 20, 20, 20, 18, 18, 16],
        [10, 12, 12, 14, 14, 14, 12, 12, 10],
        [12, 14, 14, 16, 16, 16, 14, 14, 12],
        [10, 12, 12, 14, 14, 14, 12, 12, 10],
        [6, 8, 8, 10, 10, 10, 8, 8, 6],
        [4, 6, 6, 8, 8, 8, 6, 6, 4],
        [2, 4, 4, 6, 6, 6, 4, 4, 2],
        [0, 2, 2, 6, 2, 6, 2, 2, 0],
        [-2, 2, 2, 4, 2, 4, 2, 2, -2],
    ],
    [
        [6, 7, 6, 7, 7, 7, 6, 7, 6],
        [8, 9, 9, 10, 10, 10, 9, 9, 8],
        [5, 6, 6, 7, 7, 7, 6, 6, 5],
        [6, 7, 7, 8, 8, 8, 7, 7, 6],
        [5, 6, 6, 7, 7, 7, 6, 6, 5],
        [3, 4, 4, 5, 5, 5, 4, 4, 3],
        [2, 3, 3, 4, 4, 4, 3, 3, 2],
        [1, 2, 2, 3, 3, 3, 2, 2, 1],
        [0, 1, 1, 3, 1, 3, 1, 1, 0],
        [-1, 1, 1, 2, 1, 2, 1, 1, -1],
    ],
);

pub static HORSE_TABLE: (Pst, Pst) = (
    [
        [-8, -4, 0, 2, -2, 2, 0, -4, -8],
        [-4, 2, 6, 10, 4, 10, 6, 2, -4],
        [0, 8, 12, 14, 12, 14, 12, 8, 0],
        [2, 10, 14, 16, 14, 16, 14, 10, 2],
        [0, 8, 12, 14, 16, 14, 12, 8, 0],
        [-2, 4, 8, 10, 12, 10, 8, 4, -2],
        [-4, 2, 6, 6, 8, 6, 6, 2, -4],
        [-6, 0, 2, 4, 2, 4, 2, 0, -6],
        [-8, -2, 0, 2, 0, 2, 0, -2, -8],
        [-10, -6, -2, 0, -2, 0, -2, -6, -10],
    ],
    [
        [-6, -3, 0, 1, -1, 1, 0, -3, -6],
        [-3, 1, 4, 7, 3, 7, 4, 1, -3],
        [0, 5, 8, 10, 8, 10, 8, 5, 0],
        [1, 7, 10, 12, 10, 12, 10, 7, 1],
        [0, 5, 8, 10, 12, 10, 8, 5, 0],
        [-1, 3, 5, 7, 9, 7, 5, 3, -1],
        [-3, 1, 4, 4, 6, 4, 4, 1, -3],
        [-4, 0, 1, 3, 1, 3, 1, 0, -4],
        [-6, -1, 0, 1, 0, 1, 0, -1, -6],
        [-8, -4, -1, 0, -1, 0, -1, -4, -8],
    ],
);

pub static CANNON_TABLE: (Pst, Pst) = (
    [
        [4, 4, 2, 6, 10, 6, 2, 4, 4],
        [2, 2, 0, 4, 8, 4, 0, 2, 2],
        [0, 2, 4, 6, 10, 6, 4, 2, 0],
        [0, 0, 2, 4, 6, 4, 2, 0, 0],
        [2, 2, 4, 6, 8, 6, 4, 2, 2],
        [0, 2, 2, 4, 6, 4, 2, 2, 0],
        [0, 0, 2, 2, 4, 2, 2, 0, 0],
        [2, 4, 2, 2, 6, 2, 2, 4, 2],
        [0, 2, 0, 2, 2, 2, 0, 2, 0],
        [0, 0, 2, 2, 0, 2, 2, 0, 0],
    ],
    [
        [2, 2, 1, 3, 5, 3, 1, 2, 2],
        [1, 1, 0, 2, 4, 2, 0, 1, 1],
        [0, 1, 2, 3, 5, 3, 2, 1, 0],
        [0, 0, 1, 2, 3, 2, 1, 0, 0],
        [1, 1, 2, 3, 4, 3, 2, 1, 1],
        [0, 1, 1, 2, 3, 2, 1, 1, 0],
        [0, 0, 1, 1, 2, 1, 1, 0, 0],
        [1, 2, 1, 1, 3, 1, 1, 2, 1],
        [0, 1, 0, 1, 1, 1, 0, 1, 0],
        [0, 0, 1, 1, 0, 1, 1, 0, 0],
    ],
);

pub static PAWN_TABLE: (Pst, Pst) = (
    [
        [0, 3, 6, 9, 12, 9, 6, 3, 0],
        [18, 36, 56, 80, 120, 80, 56, 36, 18],
        [14, 26, 42, 60, 80, 60, 42, 26, 14],
        [10, 20, 30, 34, 40, 34, 30, 20, 10],
        [6, 12, 18, 18, 20, 18, 18, 12, 6],
        [2, 0, 8, 0, 8, 0, 8, 0, 2],
        [0, 0, -2, 0, 4, 0, -2, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
    ],
    [
        [10, 10, 10, 15, 15, 15, 10, 10, 10],
        [50, 60, 70, 80, 90, 80, 70, 60, 50],
        [40, 50, 55, 60, 70, 60, 55, 50, 40],
        [30, 35, 40, 45, 50, 45, 40, 35, 30],
        [15, 20, 25, 30, 30, 30, 25, 20, 15],
        [5, 8, 10, 10, 12, 10, 10, 8, 5],
        [2, 2, 2, 2, 4, 2, 2, 2, 2],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
    ],
);

fn tables_for(kind: PieceKind) -> (&'static Pst, &'static Pst) {
    match kind {
        PieceKind::King => (&KING_TABLE.0, &KING_TABLE.1),
        PieceKind::Advisor => (&ADVISOR_TABLE.0, &ADVISOR_TABLE.1),
        PieceKind::Elephant => (&ELEPHANT_TABLE.0, &ELEPHANT_TABLE.1),
        PieceKind::Rook => (&ROOK_TABLE.0, &ROOK_TABLE.1),
        PieceKind::Horse => (&HORSE_TABLE.0, &HORSE_TABLE.1),
        PieceKind::Cannon => (&CANNON_TABLE.0, &CANNON_TABLE.1),
        PieceKind::Pawn => (&PAWN_TABLE.0, &PAWN_TABLE.1),
    }
}

/// Tapered square bonus for a piece of `kind`/`side` on `(row, col)`.
#[inline]
pub fn pst_value(kind: PieceKind, side: Side, row: i8, col: i8, phase: i32) -> i32 {
    let (mg, eg) = tables_for(kind);
    let r = match side {
        Side::Red => row,
        Side::Black => 9 - row,
    } as usize;
    let c = col as usize;
    (mg[r][c] * phase + eg[r][c] * (256 - phase)) >> 8
}
