use crate::board::Side;
use crate::dark::board::{
    DARK_CELLS, DARK_COLS, DARK_ROWS, DarkAction, DarkBoard, DarkStatus, QUIET_ACTION_LIMIT,
    can_capture, cell_col, cell_row,
};
use crate::board::PieceKind;

const STEPS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[inline(always)]
fn offset(idx: u8, dr: i8, dc: i8) -> Option<u8> {
    let r = cell_row(idx) as i8 + dr;
    let c = cell_col(idx) as i8 + dc;
    if (0..DARK_ROWS as i8).contains(&r) && (0..DARK_COLS as i8).contains(&c) {
        Some((r as u8) * DARK_COLS + c as u8)
    } else {
        None
    }
}

/// All legal actions for `side`, cell order, flips before a cell's moves so
/// generation order is deterministic.
pub fn generate_dark_actions(board: &DarkBoard, side: Side, out: &mut Vec<DarkAction>) {
    for idx in 0..DARK_CELLS as u8 {
        let Some(piece) = board.get(idx) else {
            continue;
        };
        if !piece.revealed {
            out.push(DarkAction::Flip(idx));
            continue;
        }
        if piece.side != side {
            continue;
        }

        for (dr, dc) in STEPS {
            let Some(to) = offset(idx, dr, dc) else {
                continue;
            };
            match board.get(to) {
                None => out.push(DarkAction::Move { from: idx, to }),
                Some(target) => {
                    // Adjacency captures: revealed enemies within rank
                    // order. Cannons never capture this way.
                    if target.revealed
                        && target.side != side
                        && can_capture(piece.kind, target.kind)
                    {
                        out.push(DarkAction::Move { from: idx, to });
                    }
                }
            }
        }

        if piece.kind == PieceKind::Cannon {
            cannon_jumps(board, side, idx, out);
        }
    }
}

/// Cannon captures: any straight-line distance over exactly one screen.
/// The screen may be unrevealed; the target must be a revealed enemy.
fn cannon_jumps(board: &DarkBoard, side: Side, from: u8, out: &mut Vec<DarkAction>) {
    for (dr, dc) in STEPS {
        let mut cursor = from;
        let mut screened = false;
        while let Some(next) = offset(cursor, dr, dc) {
            cursor = next;
            match board.get(cursor) {
                None => continue,
                Some(target) => {
                    if !screened {
                        screened = true;
                        continue;
                    }
                    if target.revealed && target.side != side {
                        out.push(DarkAction::Move { from, to: cursor });
                    }
                    break;
                }
            }
        }
    }
}

pub fn dark_legal_actions(board: &DarkBoard, side: Side) -> Vec<DarkAction> {
    let mut out = Vec::with_capacity(64);
    generate_dark_actions(board, side, &mut out);
    out
}

/// Verdict for `side_to_move`: elimination wins, exhaustion loses, and a
/// long capture-less stretch draws.
pub fn dark_status(board: &DarkBoard, side_to_move: Side) -> DarkStatus {
    if board.piece_count(side_to_move.opposite()) == 0 {
        return DarkStatus::Won(side_to_move);
    }
    if board.quiet_actions() >= QUIET_ACTION_LIMIT {
        return DarkStatus::Draw;
    }
    if dark_legal_actions(board, side_to_move).is_empty() {
        return DarkStatus::Won(side_to_move.opposite());
    }
    DarkStatus::InPlay
}

/// True when the piece on `idx` stands attacked: an adjacent revealed
/// enemy that outranks it, or an enemy cannon with exactly one screen on a
/// shared line. Used by eval and for escape ordering.
pub fn is_threatened(board: &DarkBoard, idx: u8) -> bool {
    let Some(piece) = board.get(idx) else {
        return false;
    };
    for (dr, dc) in STEPS {
        let Some(n) = offset(idx, dr, dc) else {
            continue;
        };
        if board
            .get(n)
            .is_some_and(|e| e.revealed && e.side != piece.side && can_capture(e.kind, piece.kind))
        {
            return true;
        }
    }
    // Cannon lines.
    for (dr, dc) in STEPS {
        let mut cursor = idx;
        let mut screened = false;
        while let Some(next) = offset(cursor, dr, dc) {
            cursor = next;
            let Some(p) = board.get(cursor) else {
                continue;
            };
            if !screened {
                screened = true;
                continue;
            }
            if p.revealed && p.side != piece.side && p.kind == PieceKind::Cannon {
                return true;
            }
            break;
        }
    }
    false
}
