use crate::hash::zobrist::zobrist_keys;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Board geometry: 10 rows by 9 columns. Row 0 is Black's back rank,
/// row 9 is Red's back rank.
pub const ROWS: i8 = 10;
pub const COLS: i8 = 9;
pub const CELLS: usize = (ROWS as usize) * (COLS as usize);

/// Which side a piece belongs to (Red moves first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Side {
    Red,
    Black,
}

impl Side {
    #[inline(always)]
    pub fn opposite(self) -> Self {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Forward row delta for this side's pawns: Red advances toward row 0.
    #[inline(always)]
    pub fn forward(self) -> i8 {
        match self {
            Side::Red => -1,
            Side::Black => 1,
        }
    }
}

impl std::ops::Not for Side {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opposite()
    }
}

/// The seven Xiangqi piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceKind {
    King,
    Advisor,
    Elephant,
    Rook,
    Horse,
    Cannon,
    Pawn,
}

pub const PIECE_KINDS: [PieceKind; 7] = [
    PieceKind::King,
    PieceKind::Advisor,
    PieceKind::Elephant,
    PieceKind::Rook,
    PieceKind::Horse,
    PieceKind::Cannon,
    PieceKind::Pawn,
];

impl PieceKind {
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    #[inline(always)]
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Piece { kind, side }
    }
}

/// A cell on the 10x9 grid, stored as `row * 9 + col`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Square(u8);

impl Square {
    #[inline(always)]
    pub fn from_coords(row: i8, col: i8) -> Self {
        debug_assert!(in_board(row, col), "square off board: ({row},{col})");
        Square((row as u8) * (COLS as u8) + col as u8)
    }

    #[inline(always)]
    pub fn from_index(idx: u8) -> Self {
        debug_assert!((idx as usize) < CELLS);
        Square(idx)
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub fn row(self) -> i8 {
        (self.0 / COLS as u8) as i8
    }

    #[inline(always)]
    pub fn col(self) -> i8 {
        (self.0 % COLS as u8) as i8
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // File letter a..i, then the row digit. "e9" is Red's king start.
        let file = (b'a' + self.col() as u8) as char;
        write!(f, "{}{}", file, self.row())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

#[inline(always)]
pub fn in_board(row: i8, col: i8) -> bool {
    (0..ROWS).contains(&row) && (0..COLS).contains(&col)
}

/// The 3x3 palace confining kings and advisors.
#[inline(always)]
pub fn in_palace(side: Side, row: i8, col: i8) -> bool {
    let rows_ok = match side {
        Side::Red => (7..=9).contains(&row),
        Side::Black => (0..=2).contains(&row),
    };
    rows_ok && (3..=5).contains(&col)
}

/// True while `row` lies on `side`'s own half of the river.
#[inline(always)]
pub fn on_home_side(side: Side, row: i8) -> bool {
    match side {
        Side::Red => row >= 5,
        Side::Black => row <= 4,
    }
}

/// True once a piece of `side` standing on `row` has crossed the river.
#[inline(always)]
pub fn crossed_river(side: Side, row: i8) -> bool {
    !on_home_side(side, row)
}

const BACK_RANK: [PieceKind; 9] = [
    PieceKind::Rook,
    PieceKind::Horse,
    PieceKind::Elephant,
    PieceKind::Advisor,
    PieceKind::King,
    PieceKind::Advisor,
    PieceKind::Elephant,
    PieceKind::Horse,
    PieceKind::Rook,
];

/// Largest legal multiplicity per (side, kind); used when restoring snapshots.
fn inventory_limit(kind: PieceKind) -> u8 {
    match kind {
        PieceKind::King => 1,
        PieceKind::Pawn => 5,
        _ => 2,
    }
}

/// Rejected board snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("more than one {0:?} king")]
    ExtraKing(Side),
    #[error("{count} {kind:?} pieces for {side:?} exceeds the piece inventory")]
    TooManyPieces {
        side: Side,
        kind: PieceKind,
        count: u8,
    },
}

/// Plain 10x9 row-major matrix of optional pieces; the wire format used by
/// callers crossing process or thread boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub grid: [[Option<Piece>; 9]; 10],
}

/// Grid board with an incrementally maintained Zobrist hash, piece count
/// and king-position cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<Piece>; 9]; 10],
    hash: u32,
    piece_count: u8,
    king_pos: [Option<Square>; 2],
}

impl Board {
    /// An empty board. Test positions are built on top of this with `set`.
    pub fn new() -> Self {
        Board {
            grid: [[None; 9]; 10],
            hash: 0,
            piece_count: 0,
            king_pos: [None, None],
        }
    }

    /// Standard Xiangqi starting position; the hash is rebuilt from scratch.
    pub fn setup_initial_position(&mut self) {
        self.grid = [[None; 9]; 10];
        self.piece_count = 0;
        self.king_pos = [None, None];
        self.hash = 0;

        for (col, &kind) in BACK_RANK.iter().enumerate() {
            let col = col as i8;
            self.set(0, col, Some(Piece::new(kind, Side::Black)));
            self.set(9, col, Some(Piece::new(kind, Side::Red)));
        }
        for &col in &[1, 7] {
            self.set(2, col, Some(Piece::new(PieceKind::Cannon, Side::Black)));
            self.set(7, col, Some(Piece::new(PieceKind::Cannon, Side::Red)));
        }
        for &col in &[0, 2, 4, 6, 8] {
            self.set(3, col, Some(Piece::new(PieceKind::Pawn, Side::Black)));
            self.set(6, col, Some(Piece::new(PieceKind::Pawn, Side::Red)));
        }

        self.hash = self.compute_hash_full();
    }

    pub fn new_game() -> Self {
        let mut b = Board::new();
        b.setup_initial_position();
        b
    }

    /// Piece at `(row, col)`; out-of-bounds coordinates read as empty.
    #[inline(always)]
    pub fn get(&self, row: i8, col: i8) -> Option<Piece> {
        if !in_board(row, col) {
            return None;
        }
        self.grid[row as usize][col as usize]
    }

    #[inline(always)]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.grid[sq.row() as usize][sq.col() as usize]
    }

    #[inline(always)]
    pub fn is_empty(&self, row: i8, col: i8) -> bool {
        in_board(row, col) && self.grid[row as usize][col as usize].is_none()
    }

    /// Place `piece` (or clear with `None`), keeping hash, count and the
    /// king cache in step.
    pub fn set(&mut self, row: i8, col: i8, piece: Option<Piece>) {
        debug_assert!(in_board(row, col), "set off board: ({row},{col})");
        if !in_board(row, col) {
            return;
        }
        let keys = zobrist_keys();
        let sq = Square::from_coords(row, col);

        if let Some(old) = self.grid[row as usize][col as usize] {
            self.hash ^= keys.piece_key(old, sq);
            self.piece_count -= 1;
            if old.kind == PieceKind::King {
                self.king_pos[old.side.index()] = None;
            }
        }
        if let Some(new) = piece {
            self.hash ^= keys.piece_key(new, sq);
            self.piece_count += 1;
            if new.kind == PieceKind::King {
                self.king_pos[new.side.index()] = Some(sq);
            }
        }
        self.grid[row as usize][col as usize] = piece;
    }

    #[inline(always)]
    pub fn hash(&self) -> u32 {
        self.hash
    }

    /// Flip the side-to-move key. `make_move`/`undo_move` call this once per
    /// ply boundary; a null move is nothing but this toggle.
    #[inline(always)]
    pub(crate) fn toggle_side_key(&mut self) {
        self.hash ^= zobrist_keys().side;
    }

    #[inline(always)]
    pub fn piece_count(&self) -> u8 {
        self.piece_count
    }

    /// King location for `side`, `None` in king-less test positions.
    #[inline(always)]
    pub fn find_king(&self, side: Side) -> Option<Square> {
        self.king_pos[side.index()]
    }

    /// All occupied squares in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.grid.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().filter_map(move |(c, cell)| {
                cell.map(|p| (Square::from_coords(r as i8, c as i8), p))
            })
        })
    }

    /// Positions of `side`'s pieces. Callers must not cache the result
    /// across mutations.
    pub fn pieces_of(&self, side: Side) -> Vec<(Square, Piece)> {
        self.iter().filter(|(_, p)| p.side == side).collect()
    }

    /// XOR of the piece keys over all occupied squares. Matches the
    /// incremental hash whenever the side key parity is even, i.e. outside
    /// a make/unmake pair.
    pub fn compute_hash_full(&self) -> u32 {
        let keys = zobrist_keys();
        self.iter()
            .fold(0u32, |h, (sq, p)| h ^ keys.piece_key(p, sq))
    }

    #[cfg(debug_assertions)]
    #[inline]
    pub fn assert_hash(&self) {
        let full = self.compute_hash_full();
        debug_assert_eq!(
            self.hash, full,
            "hash parity mismatch: stored={:#010x}, full={:#010x}",
            self.hash, full
        );
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot { grid: self.grid }
    }

    /// Replace the board contents with `snap`, recomputing hash and caches.
    /// An inconsistent snapshot is rejected and the board is left untouched.
    pub fn restore(&mut self, snap: &BoardSnapshot) -> Result<(), BoardError> {
        let mut counts = [[0u8; 7]; 2];
        for row in &snap.grid {
            for cell in row {
                if let Some(p) = cell {
                    let c = &mut counts[p.side.index()][p.kind.index()];
                    *c += 1;
                    if *c > inventory_limit(p.kind) {
                        if p.kind == PieceKind::King {
                            return Err(BoardError::ExtraKing(p.side));
                        }
                        return Err(BoardError::TooManyPieces {
                            side: p.side,
                            kind: p.kind,
                            count: *c,
                        });
                    }
                }
            }
        }

        self.grid = [[None; 9]; 10];
        self.piece_count = 0;
        self.king_pos = [None, None];
        self.hash = 0;
        for r in 0..ROWS {
            for c in 0..COLS {
                if let Some(p) = snap.grid[r as usize][c as usize] {
                    self.set(r, c, Some(p));
                }
            }
        }
        Ok(())
    }

    pub fn from_snapshot(snap: &BoardSnapshot) -> Result<Self, BoardError> {
        let mut b = Board::new();
        b.restore(snap)?;
        Ok(b)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

fn piece_char(p: Piece) -> char {
    let c = match p.kind {
        PieceKind::King => 'k',
        PieceKind::Advisor => 'a',
        PieceKind::Elephant => 'e',
        PieceKind::Rook => 'r',
        PieceKind::Horse => 'h',
        PieceKind::Cannon => 'c',
        PieceKind::Pawn => 'p',
    };
    match p.side {
        Side::Red => c.to_ascii_uppercase(),
        Side::Black => c,
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..ROWS {
            write!(f, "{r} ")?;
            for c in 0..COLS {
                match self.get(r, c) {
                    Some(p) => write!(f, " {}", piece_char(p))?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h i")
    }
}
