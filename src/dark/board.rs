use crate::board::{PieceKind, Side};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DARK_ROWS: u8 = 4;
pub const DARK_COLS: u8 = 8;
pub const DARK_CELLS: usize = (DARK_ROWS as usize) * (DARK_COLS as usize);

/// Actions without a capture before the game is drawn.
pub const QUIET_ACTION_LIMIT: u32 = 50;

/// Per-side inventory: sixteen pieces, filling half the board.
pub const INVENTORY: [(PieceKind, u8); 7] = [
    (PieceKind::King, 1),
    (PieceKind::Advisor, 2),
    (PieceKind::Elephant, 2),
    (PieceKind::Rook, 2),
    (PieceKind::Horse, 2),
    (PieceKind::Cannon, 2),
    (PieceKind::Pawn, 5),
];

/// Capture rank, 1 strongest. The single cycle: pawns capture the king,
/// the king cannot capture pawns.
#[inline(always)]
pub fn rank(kind: PieceKind) -> u8 {
    match kind {
        PieceKind::King => 1,
        PieceKind::Advisor => 2,
        PieceKind::Elephant => 3,
        PieceKind::Rook => 4,
        PieceKind::Horse => 5,
        PieceKind::Cannon => 6,
        PieceKind::Pawn => 7,
    }
}

/// Rank-order capture test for non-cannon movement captures. Cannons never
/// capture by adjacency; their jump rule lives in the move generator.
#[inline]
pub fn can_capture(attacker: PieceKind, victim: PieceKind) -> bool {
    match (attacker, victim) {
        (PieceKind::Cannon, _) => false,
        (PieceKind::Pawn, PieceKind::King) => true,
        (PieceKind::King, PieceKind::Pawn) => false,
        (a, v) => rank(a) <= rank(v),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DarkPiece {
    pub kind: PieceKind,
    pub side: Side,
    pub revealed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DarkAction {
    /// Reveal the piece on a cell.
    Flip(u8),
    /// Step or capture with an own revealed piece.
    Move { from: u8, to: u8 },
}

#[derive(Debug, Clone, Copy)]
pub struct DarkUndo {
    pub action: DarkAction,
    pub prev_from: Option<DarkPiece>,
    pub prev_to: Option<DarkPiece>,
    pub prev_quiet: u32,
}

#[inline(always)]
pub fn cell_row(idx: u8) -> u8 {
    idx / DARK_COLS
}

#[inline(always)]
pub fn cell_col(idx: u8) -> u8 {
    idx % DARK_COLS
}

#[inline(always)]
pub fn adjacent(a: u8, b: u8) -> bool {
    let dr = (cell_row(a) as i8 - cell_row(b) as i8).abs();
    let dc = (cell_col(a) as i8 - cell_col(b) as i8).abs();
    dr + dc == 1
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DarkBoard {
    cells: [Option<DarkPiece>; DARK_CELLS],
    quiet_actions: u32,
}

impl DarkBoard {
    pub fn new_empty() -> Self {
        DarkBoard {
            cells: [None; DARK_CELLS],
            quiet_actions: 0,
        }
    }

    /// Both inventories shuffled face-down over all 32 cells.
    pub fn shuffled(rng: &mut impl Rng) -> Self {
        let mut pieces = Vec::with_capacity(DARK_CELLS);
        for side in [Side::Red, Side::Black] {
            for (kind, count) in INVENTORY {
                for _ in 0..count {
                    pieces.push(DarkPiece {
                        kind,
                        side,
                        revealed: false,
                    });
                }
            }
        }
        pieces.shuffle(rng);

        let mut board = DarkBoard::new_empty();
        for (i, p) in pieces.into_iter().enumerate() {
            board.cells[i] = Some(p);
        }
        board
    }

    #[inline(always)]
    pub fn get(&self, idx: u8) -> Option<DarkPiece> {
        self.cells[idx as usize]
    }

    #[inline(always)]
    pub fn set(&mut self, idx: u8, piece: Option<DarkPiece>) {
        self.cells[idx as usize] = piece;
    }

    #[inline(always)]
    pub fn quiet_actions(&self) -> u32 {
        self.quiet_actions
    }

    pub fn piece_count(&self, side: Side) -> u8 {
        self.cells
            .iter()
            .filter(|c| c.is_some_and(|p| p.side == side))
            .count() as u8
    }

    /// Multiset of unrevealed identities: counts per `[side][kind]` plus
    /// the total. This is the chance-node weighting.
    pub fn hidden_pool(&self) -> ([[u8; 7]; 2], u32) {
        let mut counts = [[0u8; 7]; 2];
        let mut total = 0;
        for cell in self.cells.iter().flatten() {
            if !cell.revealed {
                counts[cell.side.index()][cell.kind.index()] += 1;
                total += 1;
            }
        }
        (counts, total)
    }

    /// Apply an action the generator produced. Flips and quiet moves bump
    /// the draw counter; captures reset it.
    pub fn apply(&mut self, action: DarkAction) -> DarkUndo {
        let prev_quiet = self.quiet_actions;
        match action {
            DarkAction::Flip(idx) => {
                let prev = self.cells[idx as usize];
                if let Some(p) = &mut self.cells[idx as usize] {
                    p.revealed = true;
                }
                self.quiet_actions += 1;
                DarkUndo {
                    action,
                    prev_from: prev,
                    prev_to: None,
                    prev_quiet,
                }
            }
            DarkAction::Move { from, to } => {
                let mover = self.cells[from as usize];
                let captured = self.cells[to as usize];
                self.cells[to as usize] = mover;
                self.cells[from as usize] = None;
                self.quiet_actions = if captured.is_some() {
                    0
                } else {
                    self.quiet_actions + 1
                };
                DarkUndo {
                    action,
                    prev_from: mover,
                    prev_to: captured,
                    prev_quiet,
                }
            }
        }
    }

    pub fn undo(&mut self, undo: &DarkUndo) {
        match undo.action {
            DarkAction::Flip(idx) => {
                self.cells[idx as usize] = undo.prev_from;
            }
            DarkAction::Move { from, to } => {
                self.cells[from as usize] = undo.prev_from;
                self.cells[to as usize] = undo.prev_to;
            }
        }
        self.quiet_actions = undo.prev_quiet;
    }
}

/// Verdict for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DarkStatus {
    InPlay,
    Won(Side),
    Draw,
}

impl fmt::Display for DarkBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..DARK_ROWS {
            for c in 0..DARK_COLS {
                let idx = r * DARK_COLS + c;
                let ch = match self.get(idx) {
                    None => '.',
                    Some(p) if !p.revealed => '?',
                    Some(p) => {
                        let ch = match p.kind {
                            PieceKind::King => 'k',
                            PieceKind::Advisor => 'a',
                            PieceKind::Elephant => 'e',
                            PieceKind::Rook => 'r',
                            PieceKind::Horse => 'h',
                            PieceKind::Cannon => 'c',
                            PieceKind::Pawn => 'p',
                        };
                        match p.side {
                            Side::Red => ch.to_ascii_uppercase(),
                            Side::Black => ch,
                        }
                    }
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
