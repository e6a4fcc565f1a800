use crate::board::{Board, Side};
use crate::moves::execute::{generate_legal, make_move, make_null_move, undo_move, undo_null_move};
use crate::moves::square_control::in_check;
use crate::moves::types::{Move, MoveList};
use crate::search::SearchConfig;
use crate::search::context::{MAX_PLY, SearchContext};
use crate::search::eval::evaluate;
use crate::search::ordering::{mvv_score, order_moves};
use crate::search::psqt::{KING_VALUE, ROOK_VALUE, piece_value};
use crate::search::tt::{Bound, TranspositionTable};
use rand::Rng;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

pub const INF: i32 = 30_000;

/// Aspiration windows only open around scores that are not mate-bound.
const ASPIRATION_LIMIT: i32 = 9_000;
const ASPIRATION_WINDOW: i32 = 50;

/// Wall clock is polled once per this many nodes.
const TIME_CHECK_MASK: u64 = 4095;

/// Quiet-move futility margins indexed by remaining depth (1..=3).
const FUTILITY_MARGINS: [i32; 4] = [0, 200, 450, 700];

const DELTA_MARGIN: i32 = 200;

/// Null-move pruning is switched off once the board thins out this far.
const NULL_MOVE_MIN_PIECES: u8 = 11;

/// Shared flag for cooperative cancellation from outside the search.
#[derive(Clone)]
pub struct AbortHandle(Arc<AtomicBool>);

impl AbortHandle {
    pub fn abort(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

pub struct TimeManager {
    start: Instant,
    limit: Duration,
    stop: bool,
    abort: Arc<AtomicBool>,
}

impl TimeManager {
    fn new(limit: Duration, abort: Arc<AtomicBool>) -> Self {
        TimeManager {
            start: Instant::now(),
            limit,
            stop: false,
            abort,
        }
    }

    #[inline(always)]
    fn check_time(&mut self) {
        if self.stop {
            return;
        }
        if self.abort.load(Ordering::Relaxed) || self.start.elapsed() >= self.limit {
            self.stop = true;
        }
    }

    #[inline(always)]
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Single-threaded engine instance. Owns the transposition table, which
/// persists (and ages) across `find_best_move` calls; killers and history
/// are fresh per call.
pub struct Engine {
    tt: TranspositionTable,
    abort: Arc<AtomicBool>,
    nodes: u64,
    last_depth: i32,
}

impl Engine {
    pub fn new() -> Self {
        Engine {
            tt: TranspositionTable::new(),
            abort: Arc::new(AtomicBool::new(false)),
            nodes: 0,
            last_depth: 0,
        }
    }

    /// Handle for cancelling a running search from another thread. The
    /// search itself stays synchronous; the 4096-node poll observes the
    /// flag and unwinds.
    pub fn abort_handle(&self) -> AbortHandle {
        AbortHandle(self.abort.clone())
    }

    pub fn nodes_searched(&self) -> u64 {
        self.nodes
    }

    pub fn last_iteration_depth(&self) -> i32 {
        self.last_depth
    }

    /// Pick a move for `side`. Returns `None` only when `side` has no
    /// legal move. The board is returned bit-identical: hash, piece count
    /// and king cache included.
    pub fn find_best_move(
        &mut self,
        board: &mut Board,
        side: Side,
        config: &SearchConfig,
    ) -> Option<Move> {
        let result = self.find_best_move_inner(board, side, config);
        // Consume any abort so the next invocation starts clean.
        self.abort.store(false, Ordering::Relaxed);
        result
    }

    fn find_best_move_inner(
        &mut self,
        board: &mut Board,
        side: Side,
        config: &SearchConfig,
    ) -> Option<Move> {
        self.nodes = 0;
        self.last_depth = 0;

        let mut legal = MoveList::new();
        let mut scratch = MoveList::new();
        generate_legal(board, side, &mut legal, &mut scratch);
        if legal.is_empty() {
            return None;
        }
        if legal.len() == 1 {
            // Forced move: no point burning the budget.
            return Some(legal[0]);
        }

        self.tt.new_search();
        let mut ctx = SearchContext::new(config.depth, config.quiescence_depth);
        let mut time = TimeManager::new(config.time_budget, self.abort.clone());

        if config.randomness > 0 {
            return self.jittered_root(board, side, &legal, config, &mut ctx, &mut time);
        }

        let mut best: Option<Move> = None;
        let mut prev_score: i32 = 0;

        for depth in 1..=config.depth {
            let aspirate = depth >= 4 && prev_score.abs() <= ASPIRATION_LIMIT;
            let (mut alpha, mut beta) = if aspirate {
                (prev_score - ASPIRATION_WINDOW, prev_score + ASPIRATION_WINDOW)
            } else {
                (-INF, INF)
            };

            let (mut score, mut mv) =
                self.search_root(board, side, depth, alpha, beta, best, &mut ctx, &mut time);

            if aspirate && !time.stop && (score <= alpha || score >= beta) {
                (alpha, beta) = (-INF, INF);
                (score, mv) = self.search_root(board, side, depth, alpha, beta, best, &mut ctx, &mut time);
            }

            if time.stop {
                // A partial iteration may have explored a skewed subtree;
                // only completed iterations count.
                break;
            }

            prev_score = score;
            if mv.is_some() {
                best = mv;
            }
            self.last_depth = depth;

            debug!(
                depth,
                score,
                nodes = self.nodes,
                elapsed_ms = time.elapsed().as_millis() as u64,
                "iteration complete"
            );

            if time.elapsed() * 10 > config.time_budget * 6 {
                break;
            }
        }

        best.or(Some(legal[0]))
    }

    /// Beginner/easy path: re-score every root move at depth 1, perturb
    /// each score uniformly in [-randomness, +randomness], return the top.
    #[allow(clippy::too_many_arguments)]
    fn jittered_root(
        &mut self,
        board: &mut Board,
        side: Side,
        legal: &[Move],
        config: &SearchConfig,
        ctx: &mut SearchContext,
        time: &mut TimeManager,
    ) -> Option<Move> {
        let mut rng = rand::rng();
        let mut best: Option<(Move, i32)> = None;
        for &mv in legal {
            let undo = make_move(board, mv);
            let score = -self.negamax(board, side.opposite(), 0, 1, -INF, INF, true, ctx, time);
            undo_move(board, &undo);

            let jitter = rng.random_range(-config.randomness..=config.randomness);
            let perturbed = score + jitter;
            if best.is_none_or(|(_, s)| perturbed > s) {
                best = Some((mv, perturbed));
            }
        }
        best.map(|(mv, _)| mv)
    }

    /// Root PVS: the previous iteration's best move is searched first on a
    /// full window; the rest get null-window probes.
    #[allow(clippy::too_many_arguments)]
    fn search_root(
        &mut self,
        board: &mut Board,
        side: Side,
        depth: i32,
        mut alpha: i32,
        beta: i32,
        prev_best: Option<Move>,
        ctx: &mut SearchContext,
        time: &mut TimeManager,
    ) -> (i32, Option<Move>) {
        let mut legal = MoveList::new();
        let mut scratch = MoveList::new();
        generate_legal(board, side, &mut legal, &mut scratch);
        order_moves(&mut legal, board, side, prev_best, &ctx.killers[0], ctx);

        let mut best_move = None;
        let mut best_score = -INF;

        for (i, &mv) in legal.iter().enumerate() {
            let undo = make_move(board, mv);
            let score = if i == 0 {
                -self.negamax(board, side.opposite(), depth - 1, 1, -beta, -alpha, true, ctx, time)
            } else {
                let probe = -self.negamax(
                    board,
                    side.opposite(),
                    depth - 1,
                    1,
                    -alpha - 1,
                    -alpha,
                    true,
                    ctx,
                    time,
                );
                if probe > alpha && probe < beta && !time.stop {
                    -self.negamax(board, side.opposite(), depth - 1, 1, -beta, -alpha, true, ctx, time)
                } else {
                    probe
                }
            };
            undo_move(board, &undo);

            if time.stop {
                return (best_score, best_move);
            }

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }

        (best_score, best_move)
    }

    #[allow(clippy::too_many_arguments)]
    fn negamax(
        &mut self,
        board: &mut Board,
        side: Side,
        mut depth: i32,
        ply: usize,
        mut alpha: i32,
        beta: i32,
        null_allowed: bool,
        ctx: &mut SearchContext,
        time: &mut TimeManager,
    ) -> i32 {
        if self.nodes & TIME_CHECK_MASK == 0 {
            time.check_time();
        }
        if time.stop {
            return 0;
        }
        self.nodes += 1;

        let hash = board.hash();
        let mut tt_move = None;
        if let Some(entry) = self.tt.probe(hash) {
            tt_move = entry.best_move;
            if entry.depth >= depth {
                match entry.bound {
                    Bound::Exact => return entry.score,
                    Bound::Lower if entry.score >= beta => return entry.score,
                    Bound::Upper if entry.score <= alpha => return entry.score,
                    _ => {}
                }
            }
        }

        let in_check_now = in_check(board, side);
        if in_check_now && (ply as i32) < ctx.max_depth + 6 {
            depth += 1;
        }

        if depth <= 0 {
            return self.quiescence(board, side, ctx.q_depth, ply, alpha, beta, time);
        }

        // Null move: skip a turn and see whether the reduced search still
        // fails high. Unsound in check, in zugzwang-prone thin endgames,
        // and inside another null branch.
        if null_allowed
            && !in_check_now
            && depth >= 3
            && board.piece_count() >= NULL_MOVE_MIN_PIECES
        {
            let r = if depth > 6 { 3 } else { 2 };
            make_null_move(board);
            let score = -self.negamax(
                board,
                side.opposite(),
                depth - 1 - r,
                ply + 1,
                -beta,
                -beta + 1,
                false,
                ctx,
                time,
            );
            undo_null_move(board);
            if time.stop {
                return 0;
            }
            if score >= beta {
                return beta;
            }
        }

        let static_eval = if depth <= 3 && !in_check_now {
            Some(evaluate(board, side))
        } else {
            None
        };

        let mut legal = MoveList::new();
        let mut scratch = MoveList::new();
        generate_legal(board, side, &mut legal, &mut scratch);

        if legal.is_empty() {
            // Mated (or stalled, which loses in Xiangqi). Deeper remaining
            // depth means an earlier mate, which scores worse.
            return -KING_VALUE - depth;
        }

        let killers = ctx.killers[ply.min(MAX_PLY - 1)];
        order_moves(&mut legal, board, side, tt_move, &killers, ctx);

        let original_alpha = alpha;
        let mut best_score = -INF;
        let mut best_move = None;
        let mut searched = 0usize;

        for &mv in legal.iter() {
            let is_capture = board.piece_at(mv.to).is_some();

            // Futility: at shallow depth a quiet move from a hopeless
            // static position cannot raise alpha.
            if let Some(se) = static_eval {
                if !is_capture && se + FUTILITY_MARGINS[depth.clamp(1, 3) as usize] <= alpha {
                    continue;
                }
            }

            let undo = make_move(board, mv);
            let gives_check = in_check(board, side.opposite());

            let score = if searched == 0 {
                -self.negamax(
                    board,
                    side.opposite(),
                    depth - 1,
                    ply + 1,
                    -beta,
                    -alpha,
                    true,
                    ctx,
                    time,
                )
            } else {
                // Late-move reduction for quiet, non-checking moves once
                // the first few candidates have been searched.
                let mut r = 0;
                if depth >= 3 && searched >= 3 && !is_capture && !in_check_now && !gives_check {
                    r = if searched >= 6 { 2 } else { 1 };
                }

                let mut s = -self.negamax(
                    board,
                    side.opposite(),
                    depth - 1 - r,
                    ply + 1,
                    -alpha - 1,
                    -alpha,
                    true,
                    ctx,
                    time,
                );
                if s > alpha && r > 0 && !time.stop {
                    s = -self.negamax(
                        board,
                        side.opposite(),
                        depth - 1,
                        ply + 1,
                        -alpha - 1,
                        -alpha,
                        true,
                        ctx,
                        time,
                    );
                }
                if s > alpha && s < beta && !time.stop {
                    s = -self.negamax(
                        board,
                        side.opposite(),
                        depth - 1,
                        ply + 1,
                        -beta,
                        -alpha,
                        true,
                        ctx,
                        time,
                    );
                }
                s
            };

            undo_move(board, &undo);
            searched += 1;

            if time.stop {
                return 0;
            }

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                if !is_capture {
                    if ply < MAX_PLY {
                        ctx.update_killer(ply, mv);
                    }
                    ctx.update_history(side, mv, depth);
                }
                self.tt.save(hash, depth, beta, Bound::Lower, Some(mv));
                return beta;
            }
        }

        if searched == 0 {
            // Everything was futility-pruned; report the fail-low bound.
            return alpha;
        }

        let bound = if best_score > original_alpha {
            Bound::Exact
        } else {
            Bound::Upper
        };
        self.tt.save(hash, depth, best_score, bound, best_move);
        best_score
    }

    /// Capture-only extension of the static eval; evasions when in check.
    #[allow(clippy::too_many_arguments)]
    fn quiescence(
        &mut self,
        board: &mut Board,
        side: Side,
        q_depth: i32,
        ply: usize,
        mut alpha: i32,
        beta: i32,
        time: &mut TimeManager,
    ) -> i32 {
        if self.nodes & TIME_CHECK_MASK == 0 {
            time.check_time();
        }
        if time.stop {
            return 0;
        }
        self.nodes += 1;

        let stand_pat = evaluate(board, side);
        if stand_pat >= beta {
            return beta;
        }
        // Even winning the biggest non-king piece cannot pull this node
        // back above alpha.
        if stand_pat + ROOK_VALUE + DELTA_MARGIN < alpha {
            return alpha;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }
        if q_depth <= 0 {
            return alpha;
        }

        let checked = in_check(board, side);

        let mut legal = MoveList::new();
        let mut scratch = MoveList::new();
        generate_legal(board, side, &mut legal, &mut scratch);

        if checked && legal.is_empty() {
            return -KING_VALUE;
        }

        let mut candidates = MoveList::new();
        if checked {
            // All evasions.
            for &mv in legal.iter() {
                candidates.push(mv);
            }
        } else {
            for &mv in legal.iter() {
                let Some(victim) = board.piece_at(mv.to) else {
                    continue;
                };
                if stand_pat + piece_value(victim.kind) + DELTA_MARGIN > alpha {
                    candidates.push(mv);
                }
            }
        }

        // Most valuable victim first; stable for determinism. Quiet
        // evasions keep their generation order behind the captures.
        candidates.sort_by_cached_key(|&mv| -mvv_score(board, mv));

        for &mv in candidates.iter() {
            let undo = make_move(board, mv);
            let score = -self.quiescence(board, side.opposite(), q_depth - 1, ply + 1, -beta, -alpha, time);
            undo_move(board, &undo);

            if time.stop {
                return 0;
            }
            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
