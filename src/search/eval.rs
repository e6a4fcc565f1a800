use crate::board::{Board, PieceKind, Side, Square, crossed_river, in_board};
use crate::moves::square_control::in_check;
use crate::search::psqt::{game_phase, piece_value, pst_value};

const CHECK_BONUS: i32 = 200;

const ADVISOR_SAFETY: i32 = 20;
const ELEPHANT_SAFETY: i32 = 12;
const ADVISOR_PAIR: i32 = 25;
const ELEPHANT_PAIR: i32 = 15;
const MISSING_ADVISORS: i32 = 40;
const MISSING_ELEPHANTS: i32 = 25;

const ROOK_ACTIVITY: i32 = 30;
const HORSE_ACTIVITY: i32 = 20;
const CANNON_ACTIVITY: i32 = 15;

const CONNECTED_PAWNS: i32 = 15;
const ROOK_OPEN_FILE: i32 = 20;

const KING_FILE_ROOK: i32 = 40;
const KING_FILE_CANNON: i32 = 35;

/// Score from `side`'s perspective; positive is better for `side`.
/// Symmetric by construction: every term is computed per side and
/// subtracted, so a mirrored position negates.
pub fn evaluate(board: &Board, side: Side) -> i32 {
    let phase = game_phase(board);
    side_score(board, side, phase) - side_score(board, side.opposite(), phase)
}

fn side_score(board: &Board, us: Side, phase: i32) -> i32 {
    let mut score = 0;
    let them = us.opposite();
    let enemy_king = board.find_king(them);
    let total = board.piece_count() as i32;

    let mut advisors = 0;
    let mut elephants = 0;
    let mut enemy_heavy = false;

    for (sq, p) in board.iter() {
        if p.side != us {
            if matches!(p.kind, PieceKind::Rook | PieceKind::Cannon) {
                enemy_heavy = true;
            }
            continue;
        }

        score += piece_value(p.kind);
        score += pst_value(p.kind, us, sq.row(), sq.col(), phase);

        match p.kind {
            PieceKind::Advisor => advisors += 1,
            PieceKind::Elephant => elephants += 1,
            PieceKind::Rook => {
                if crossed_river(us, sq.row()) {
                    score += ROOK_ACTIVITY;
                }
                score += tropism(sq, enemy_king);
                score += rook_open_file(board, us, sq);
            }
            PieceKind::Horse => {
                if crossed_river(us, sq.row()) {
                    score += HORSE_ACTIVITY;
                }
                score += tropism(sq, enemy_king);
                score += horse_mobility(board, sq);
            }
            PieceKind::Cannon => {
                if crossed_river(us, sq.row()) {
                    score += CANNON_ACTIVITY;
                }
                score += tropism(sq, enemy_king);
                score += cannon_screens(board, sq, total);
            }
            PieceKind::Pawn => score += connected_pawn(board, us, sq),
            PieceKind::King => {}
        }
    }

    if in_check(board, them) {
        score += CHECK_BONUS;
    }

    score += (king_guard(advisors, elephants, enemy_heavy) * phase) >> 8;
    score -= king_exposure(board, us);

    score
}

/// Advisor/elephant shield, scaled by phase at the call site since it
/// matters most in the middlegame.
fn king_guard(advisors: i32, elephants: i32, enemy_heavy: bool) -> i32 {
    let mut guard = advisors * ADVISOR_SAFETY + elephants * ELEPHANT_SAFETY;
    if advisors >= 2 {
        guard += ADVISOR_PAIR;
    }
    if elephants >= 2 {
        guard += ELEPHANT_PAIR;
    }
    if enemy_heavy {
        if advisors == 0 {
            guard -= MISSING_ADVISORS;
        }
        if elephants == 0 {
            guard -= MISSING_ELEPHANTS;
        }
    }
    guard
}

/// `max(0, 14 - manhattan) * 2` toward the enemy king.
fn tropism(sq: Square, enemy_king: Option<Square>) -> i32 {
    let Some(k) = enemy_king else {
        return 0;
    };
    let d = (sq.row() - k.row()).abs() + (sq.col() - k.col()).abs();
    (14 - d as i32).max(0) * 2
}

fn rook_open_file(board: &Board, us: Side, sq: Square) -> i32 {
    for r in 0..10 {
        if board
            .get(r, sq.col())
            .is_some_and(|p| p.side == us && p.kind == PieceKind::Pawn)
        {
            return 0;
        }
    }
    ROOK_OPEN_FILE
}

fn connected_pawn(board: &Board, us: Side, sq: Square) -> i32 {
    // Count each adjacent pair once, from its left member.
    if board
        .get(sq.row(), sq.col() + 1)
        .is_some_and(|p| p.side == us && p.kind == PieceKind::Pawn)
    {
        CONNECTED_PAWNS
    } else {
        0
    }
}

/// Cannons live off screens: worth more while the board is crowded, plus a
/// capped bonus per piece sharing the cannon's rank or file.
fn cannon_screens(board: &Board, sq: Square, total: i32) -> i32 {
    let mut screens = 0;
    for c in 0..9 {
        if c != sq.col() && board.get(sq.row(), c).is_some() {
            screens += 1;
        }
    }
    for r in 0..10 {
        if r != sq.row() && board.get(r, sq.col()).is_some() {
            screens += 1;
        }
    }
    (total - 16) * 2 + screens.min(4) * 5
}

/// `12 - blocked_legs * 8` over the four orthogonal leg squares.
fn horse_mobility(board: &Board, sq: Square) -> i32 {
    let mut blocked = 0;
    for (dr, dc) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
        let (r, c) = (sq.row() + dr, sq.col() + dc);
        if in_board(r, c) && board.get(r, c).is_some() {
            blocked += 1;
        }
    }
    12 - blocked * 8
}

/// Walk forward along the king's file: a bare enemy rook first, or an
/// enemy cannon behind exactly one screen, is a standing threat.
fn king_exposure(board: &Board, us: Side) -> i32 {
    let Some(king) = board.find_king(us) else {
        return 0;
    };
    let them = us.opposite();
    let dr = us.forward();
    let (mut r, c) = (king.row() + dr, king.col());
    let mut between = 0;
    while in_board(r, c) {
        if let Some(p) = board.get(r, c) {
            if between == 0 {
                if p.side == them && p.kind == PieceKind::Rook {
                    return KING_FILE_ROOK;
                }
            } else {
                if p.side == them && p.kind == PieceKind::Cannon {
                    return KING_FILE_CANNON;
                }
                return 0;
            }
            between += 1;
        }
        r += dr;
    }
    0
}
