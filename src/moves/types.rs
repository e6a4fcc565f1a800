use crate::board::{Piece, Square};
use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Upper bound on moves from one position; sized for pathological
/// constructed positions, not just the game tree.
pub const MAX_MOVES: usize = 192;

/// Per-ply scratch list. Lives on the stack so the search allocates
/// nothing per node.
pub type MoveList = ArrayVec<Move, MAX_MOVES>;

pub trait MoveBuffer: Deref<Target = [Move]> + DerefMut {
    fn push(&mut self, mv: Move);
    fn clear(&mut self);
}

impl MoveBuffer for Vec<Move> {
    fn push(&mut self, mv: Move) {
        self.push(mv);
    }
    fn clear(&mut self) {
        self.clear();
    }
}

impl<const N: usize> MoveBuffer for ArrayVec<Move, N> {
    fn push(&mut self, mv: Move) {
        self.push(mv);
    }
    fn clear(&mut self) {
        self.clear();
    }
}

/// A coordinate pair. Captures are not tagged on the move itself; `undo`
/// information travels in the `Undo` record returned by `make_move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[inline(always)]
    pub fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Everything `undo_move` needs to restore the position bit-exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undo {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
}
