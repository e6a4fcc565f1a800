use crate::board::{Board, PieceKind, Side, crossed_river, in_board, in_palace};
use crate::moves::movegen::{DIAGONAL, ELEPHANT_STEPS, HORSE_JUMPS, ORTHOGONAL};

/// Targeted attack test: probes exactly the squares an attack on
/// `(row, col)` could originate from instead of enumerating the
/// attacker's moves. Performance-critical inside the legality filter.
pub fn is_square_attacked(board: &Board, row: i8, col: i8, by: Side) -> bool {
    // Rook and file-facing king on the first piece of each ray; cannon
    // behind exactly one screen.
    for (dr, dc) in ORTHOGONAL {
        let (mut r, mut c) = (row + dr, col + dc);
        let mut between = 0;
        while in_board(r, c) {
            if let Some(p) = board.get(r, c) {
                if between == 0 {
                    if p.side == by
                        && (p.kind == PieceKind::Rook || (p.kind == PieceKind::King && dc == 0))
                    {
                        return true;
                    }
                } else {
                    if p.side == by && p.kind == PieceKind::Cannon {
                        return true;
                    }
                    break;
                }
                between += 1;
            }
            r += dr;
            c += dc;
        }
    }

    // Horse: the attacker sits an L away and its own leg, the square
    // toward the target, must be empty.
    for ((dr, dc), (lr, lc)) in HORSE_JUMPS {
        let (hr, hc) = (row - dr, col - dc);
        if board.get(hr, hc).is_some_and(|p| p.side == by && p.kind == PieceKind::Horse)
            && board.is_empty(hr + lr, hc + lc)
        {
            return true;
        }
    }

    // Pawn: one square behind along the attacker's forward direction, or
    // beside the target once that pawn has crossed the river.
    let f = by.forward();
    if board
        .get(row - f, col)
        .is_some_and(|p| p.side == by && p.kind == PieceKind::Pawn)
    {
        return true;
    }
    for dc in [-1, 1] {
        if crossed_river(by, row)
            && board
                .get(row, col + dc)
                .is_some_and(|p| p.side == by && p.kind == PieceKind::Pawn)
        {
            return true;
        }
    }

    // Advisor: a diagonal palace step.
    if in_palace(by, row, col) {
        for (dr, dc) in DIAGONAL {
            if board
                .get(row + dr, col + dc)
                .is_some_and(|p| p.side == by && p.kind == PieceKind::Advisor)
            {
                return true;
            }
        }
        // King: an orthogonal palace step (the file-facing case is the ray
        // probe above).
        for (dr, dc) in ORTHOGONAL {
            if board
                .get(row + dr, col + dc)
                .is_some_and(|p| p.side == by && p.kind == PieceKind::King)
            {
                return true;
            }
        }
    }

    // Elephant: two diagonal steps with an empty eye, never across the
    // river, so only squares on the attacker's half qualify.
    if !crossed_river(by, row) {
        for ((dr, dc), (er, ec)) in ELEPHANT_STEPS {
            if board
                .get(row - dr, col - dc)
                .is_some_and(|p| p.side == by && p.kind == PieceKind::Elephant)
                && board.is_empty(row - er, col - ec)
            {
                return true;
            }
        }
    }

    false
}

/// Flying-general test: both kings on one column with nothing between.
pub fn kings_facing(board: &Board) -> bool {
    let (Some(red), Some(black)) = (board.find_king(Side::Red), board.find_king(Side::Black))
    else {
        return false;
    };
    if red.col() != black.col() {
        return false;
    }
    let col = red.col();
    let (lo, hi) = (black.row(), red.row());
    for r in (lo + 1)..hi {
        if board.get(r, col).is_some() {
            return false;
        }
    }
    true
}

#[inline]
pub fn in_check(board: &Board, side: Side) -> bool {
    match board.find_king(side) {
        Some(king) => is_square_attacked(board, king.row(), king.col(), side.opposite()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Piece, PieceKind::*, Side::*};

    fn board_with(pieces: &[(i8, i8, PieceKind, Side)]) -> Board {
        let mut b = Board::new();
        for &(r, c, kind, side) in pieces {
            b.set(r, c, Some(Piece::new(kind, side)));
        }
        b
    }

    #[test]
    fn rook_attacks_down_open_file() {
        let b = board_with(&[(0, 4, Rook, Red)]);
        assert!(is_square_attacked(&b, 9, 4, Red));
        assert!(!is_square_attacked(&b, 9, 5, Red));
    }

    #[test]
    fn cannon_needs_exactly_one_screen() {
        let mut b = board_with(&[(7, 1, Cannon, Red)]);
        assert!(!is_square_attacked(&b, 0, 1, Red), "no screen, no attack");
        b.set(4, 1, Some(Piece::new(Pawn, Red)));
        assert!(is_square_attacked(&b, 0, 1, Red), "one screen attacks");
        b.set(3, 1, Some(Piece::new(Pawn, Black)));
        assert!(!is_square_attacked(&b, 0, 1, Red), "two screens block");
    }

    #[test]
    fn horse_attack_respects_attacker_leg() {
        let mut b = board_with(&[(7, 2, Horse, Black)]);
        assert!(is_square_attacked(&b, 9, 3, Black));
        // Leg toward the target sits at (8,2).
        b.set(8, 2, Some(Piece::new(Pawn, Red)));
        assert!(!is_square_attacked(&b, 9, 3, Black));
    }

    #[test]
    fn crossed_pawn_attacks_sideways() {
        let b = board_with(&[(4, 4, Pawn, Red)]);
        assert!(is_square_attacked(&b, 3, 4, Red), "forward");
        assert!(is_square_attacked(&b, 4, 3, Red), "sideways after crossing");
        let home = board_with(&[(6, 4, Pawn, Red)]);
        assert!(!is_square_attacked(&home, 6, 3, Red), "not before crossing");
    }

    #[test]
    fn facing_detects_open_column_only() {
        let mut b = board_with(&[(9, 4, King, Red), (0, 4, King, Black)]);
        assert!(kings_facing(&b));
        b.set(5, 4, Some(Piece::new(Pawn, Red)));
        assert!(!kings_facing(&b));
    }
}
