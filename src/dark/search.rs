use crate::board::Side;
use crate::dark::DarkSearchConfig;
use crate::dark::board::{
    DARK_CELLS, DarkAction, DarkBoard, DarkPiece, DarkStatus, QUIET_ACTION_LIMIT, cell_col,
    cell_row,
};
use crate::dark::eval::{DARK_MAX_VALUE, dark_value, evaluate_dark};
use crate::dark::movegen::{dark_legal_actions, dark_status, is_threatened};
use crate::board::PieceKind;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

pub const DARK_INF: i32 = 20_000;
const DARK_WIN: i32 = 10_000;
const DELTA_MARGIN: i32 = 200;

const DARK_MAX_PLY: usize = 48;

const CAPTURE_BASE: i32 = 1_000_000;
const ESCAPE_BASE: i32 = 500_000;
const KILLER1_SCORE: i32 = 400_000;
const KILLER2_SCORE: i32 = 390_000;
const HISTORY_CAP: u32 = 300_000;

/// Fixed seed so Monte-Carlo flip sampling replays identically in tests.
const MC_SEED: u64 = 0xBA0_71B5;

pub struct DarkEngine {
    killers: [[Option<DarkAction>; 2]; DARK_MAX_PLY],
    history: Box<[[[u32; DARK_CELLS]; DARK_CELLS]; 2]>,
    nodes: u64,
    rng: SmallRng,
    q_depth: i32,
    mc_samples: Option<u32>,
}

impl DarkEngine {
    pub fn new() -> Self {
        DarkEngine {
            killers: [[None; 2]; DARK_MAX_PLY],
            history: vec![[[0u32; DARK_CELLS]; DARK_CELLS]; 2]
                .into_boxed_slice()
                .try_into()
                .unwrap_or_else(|_| unreachable!()),
            nodes: 0,
            rng: SmallRng::seed_from_u64(MC_SEED),
            q_depth: 0,
            mc_samples: None,
        }
    }

    pub fn nodes_searched(&self) -> u64 {
        self.nodes
    }

    /// Pick an action for `side`, or `None` when the game is already over
    /// for it.
    pub fn find_best_action(
        &mut self,
        board: &mut DarkBoard,
        side: Side,
        config: &DarkSearchConfig,
    ) -> Option<DarkAction> {
        if dark_status(board, side) != DarkStatus::InPlay {
            return None;
        }

        self.killers = [[None; 2]; DARK_MAX_PLY];
        self.history.iter_mut().flatten().flatten().for_each(|h| *h = 0);
        self.nodes = 0;
        self.q_depth = config.quiescence_depth;
        self.mc_samples = config.mc_samples;

        let mut actions = dark_legal_actions(board, side);
        if actions.len() == 1 {
            return Some(actions[0]);
        }
        self.order_actions(board, side, &mut actions, 0);

        let mut alpha = -DARK_INF;
        let mut best = None;
        for &action in &actions {
            let score = match action {
                DarkAction::Flip(idx) => self.expect_flip(board, idx, side),
                DarkAction::Move { .. } => {
                    let undo = board.apply(action);
                    let s = -self.negamax(
                        board,
                        side.opposite(),
                        config.depth - 1,
                        1,
                        -DARK_INF,
                        -alpha,
                    );
                    board.undo(&undo);
                    s
                }
            };
            if score > alpha {
                alpha = score;
                best = Some(action);
            }
        }

        debug!(nodes = self.nodes, score = alpha, "dark search complete");
        best.or(Some(actions[0]))
    }

    fn negamax(
        &mut self,
        board: &mut DarkBoard,
        side: Side,
        depth: i32,
        ply: usize,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if board.piece_count(side.opposite()) == 0 {
            return DARK_WIN - ply as i32;
        }
        if board.quiet_actions() >= QUIET_ACTION_LIMIT {
            return 0;
        }
        if depth <= 0 {
            return self.quiescence(board, side, self.q_depth, alpha, beta);
        }

        let mut actions = dark_legal_actions(board, side);
        if actions.is_empty() {
            return -DARK_WIN + ply as i32;
        }
        self.order_actions(board, side, &mut actions, ply);

        let mut best_score = -DARK_INF;
        for &action in &actions {
            let (score, is_capture) = match action {
                DarkAction::Flip(idx) => (self.expect_flip(board, idx, side), false),
                DarkAction::Move { to, .. } => {
                    let is_capture = board.get(to).is_some();
                    let undo = board.apply(action);
                    let s =
                        -self.negamax(board, side.opposite(), depth - 1, ply + 1, -beta, -alpha);
                    board.undo(&undo);
                    (s, is_capture)
                }
            };

            if score > best_score {
                best_score = score;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                if !is_capture && ply < DARK_MAX_PLY {
                    self.update_killer(ply, action);
                    self.update_history(side, action, depth);
                }
                return beta;
            }
        }
        best_score
    }

    /// Chance node: the flipped cell takes on every identity still hidden
    /// on the board, weighted by its remaining count. Alpha-beta recursion
    /// runs over the move/capture subtree only; each flip outcome is
    /// settled by a capture-only quiescence from the opponent's seat, so a
    /// revealed piece that hangs, or pins down a hanging piece, is priced
    /// in. With `mc_samples` set, the enumeration is replaced by random
    /// draws with replacement.
    fn expect_flip(&mut self, board: &mut DarkBoard, idx: u8, side: Side) -> i32 {
        let (counts, total) = board.hidden_pool();
        if total == 0 {
            return evaluate_dark(board, side);
        }

        // The flip itself is the action: reveal and bump the draw counter,
        // then override the identity per outcome and restore afterwards.
        let undo = board.apply(DarkAction::Flip(idx));

        let value = if let Some(samples) = self.mc_samples.filter(|&n| n > 0) {
            let mut acc: i64 = 0;
            for _ in 0..samples {
                let pick = self.rng.random_range(0..total);
                let (kind, owner) = nth_identity(&counts, pick);
                board.set(
                    idx,
                    Some(DarkPiece {
                        kind,
                        side: owner,
                        revealed: true,
                    }),
                );
                acc += self.settle_flip(board, side) as i64;
            }
            (acc / samples as i64) as i32
        } else {
            let mut acc: i64 = 0;
            for owner in [Side::Red, Side::Black] {
                for kind in [
                    PieceKind::King,
                    PieceKind::Advisor,
                    PieceKind::Elephant,
                    PieceKind::Rook,
                    PieceKind::Horse,
                    PieceKind::Cannon,
                    PieceKind::Pawn,
                ] {
                    let count = counts[owner.index()][kind.index()];
                    if count == 0 {
                        continue;
                    }
                    board.set(
                        idx,
                        Some(DarkPiece {
                            kind,
                            side: owner,
                            revealed: true,
                        }),
                    );
                    acc += self.settle_flip(board, side) as i64 * count as i64;
                }
            }
            (acc / total as i64) as i32
        };

        board.undo(&undo);
        value
    }

    #[inline]
    fn settle_flip(&mut self, board: &mut DarkBoard, side: Side) -> i32 {
        -self.quiescence(board, side.opposite(), self.q_depth, -DARK_INF, DARK_INF)
    }

    fn quiescence(
        &mut self,
        board: &mut DarkBoard,
        side: Side,
        q_depth: i32,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        self.nodes += 1;

        let stand_pat = evaluate_dark(board, side);
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat + DARK_MAX_VALUE + DELTA_MARGIN < alpha {
            return alpha;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }
        if q_depth <= 0 {
            return alpha;
        }

        let mut captures: Vec<(DarkAction, i32)> = dark_legal_actions(board, side)
            .into_iter()
            .filter_map(|action| {
                let DarkAction::Move { from, to } = action else {
                    return None;
                };
                let victim = board.get(to)?;
                if stand_pat + dark_value(victim.kind) + DELTA_MARGIN <= alpha {
                    return None;
                }
                let attacker = board.get(from).map(|p| dark_value(p.kind)).unwrap_or(0);
                Some((action, dark_value(victim.kind) * 10 - attacker))
            })
            .collect();
        captures.sort_by_key(|&(_, score)| -score);

        for (action, _) in captures {
            let undo = board.apply(action);
            let score = -self.quiescence(board, side.opposite(), q_depth - 1, -beta, -alpha);
            board.undo(&undo);

            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }
        alpha
    }

    /// Captures by victim-minus-attacker, escapes off threatened squares,
    /// killers, history, then flips with quieter neighbourhoods first.
    fn order_actions(&self, board: &DarkBoard, side: Side, actions: &mut [DarkAction], ply: usize) {
        let killers = self.killers[ply.min(DARK_MAX_PLY - 1)];
        actions.sort_by_cached_key(|&action| match action {
            DarkAction::Move { from, to } => {
                if let Some(victim) = board.get(to) {
                    let attacker = board.get(from).map(|p| dark_value(p.kind)).unwrap_or(0);
                    return -(CAPTURE_BASE + dark_value(victim.kind) * 10 - attacker);
                }
                if is_threatened(board, from) {
                    let value = board.get(from).map(|p| dark_value(p.kind)).unwrap_or(0);
                    return -(ESCAPE_BASE + value);
                }
                if killers[0] == Some(action) {
                    return -KILLER1_SCORE;
                }
                if killers[1] == Some(action) {
                    return -KILLER2_SCORE;
                }
                -(self.history[side.index()][from as usize][to as usize] as i32)
            }
            DarkAction::Flip(idx) => {
                if killers[0] == Some(action) {
                    return -KILLER1_SCORE;
                }
                if killers[1] == Some(action) {
                    return -KILLER2_SCORE;
                }
                1000 + adjacent_enemies(board, idx, side) * 100
            }
        });
    }

    fn update_killer(&mut self, ply: usize, action: DarkAction) {
        let slots = &mut self.killers[ply];
        if slots[0] != Some(action) {
            slots[1] = slots[0];
            slots[0] = Some(action);
        }
    }

    fn update_history(&mut self, side: Side, action: DarkAction, depth: i32) {
        let (from, to) = match action {
            DarkAction::Move { from, to } => (from, to),
            DarkAction::Flip(idx) => (idx, idx),
        };
        let bonus = (depth * depth) as u32;
        let slot = &mut self.history[side.index()][from as usize][to as usize];
        *slot = slot.saturating_add(bonus).min(HISTORY_CAP);
    }
}

impl Default for DarkEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// `pick`-th identity of the hidden multiset, in a fixed side/kind order.
fn nth_identity(counts: &[[u8; 7]; 2], pick: u32) -> (PieceKind, Side) {
    let mut remaining = pick;
    for owner in [Side::Red, Side::Black] {
        for kind in [
            PieceKind::King,
            PieceKind::Advisor,
            PieceKind::Elephant,
            PieceKind::Rook,
            PieceKind::Horse,
            PieceKind::Cannon,
            PieceKind::Pawn,
        ] {
            let count = counts[owner.index()][kind.index()] as u32;
            if remaining < count {
                return (kind, owner);
            }
            remaining -= count;
        }
    }
    // Callers pass pick < total, so the loop always returns.
    unreachable!("pick outside the hidden pool")
}

/// Distance helper exposed for ordering and tests.
#[inline]
pub fn cell_distance(a: u8, b: u8) -> i32 {
    ((cell_row(a) as i32 - cell_row(b) as i32).abs())
        + ((cell_col(a) as i32 - cell_col(b) as i32).abs())
}

fn adjacent_enemies(board: &DarkBoard, idx: u8, side: Side) -> i32 {
    let mut count = 0;
    for other in 0..DARK_CELLS as u8 {
        if cell_distance(idx, other) == 1
            && board
                .get(other)
                .is_some_and(|p| p.revealed && p.side != side)
        {
            count += 1;
        }
    }
    count
}
