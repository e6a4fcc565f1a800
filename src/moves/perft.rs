use crate::board::{Board, Side};
use crate::moves::execute::{generate_legal, make_move, undo_move};
use crate::moves::types::Move;
use tracing::{debug, instrument};

const MAX_PERFT_DEPTH: usize = 16;

fn create_buffer_array(capacity: usize) -> [Vec<Move>; MAX_PERFT_DEPTH] {
    std::array::from_fn(|_| Vec::with_capacity(capacity))
}

fn perft_recursive(
    board: &mut Board,
    side: Side,
    depth: u32,
    ply: usize,
    move_buffers: &mut [Vec<Move>; MAX_PERFT_DEPTH],
    scratch_buffers: &mut [Vec<Move>; MAX_PERFT_DEPTH],
) -> u64 {
    if depth == 0 {
        return 1;
    }

    {
        let moves = &mut move_buffers[ply];
        moves.clear();
        generate_legal(board, side, moves, &mut scratch_buffers[ply]);
    }

    if depth == 1 {
        return move_buffers[ply].len() as u64;
    }

    let move_count = move_buffers[ply].len();
    let mut nodes = 0;
    for i in 0..move_count {
        let mv = move_buffers[ply][i];
        let undo = make_move(board, mv);
        nodes += perft_recursive(
            board,
            side.opposite(),
            depth - 1,
            ply + 1,
            move_buffers,
            scratch_buffers,
        );
        undo_move(board, &undo);
    }
    nodes
}

/// Legal-move tree size to `depth`; the movegen ground truth used by tests.
/// Start position: 44 / 1_920 / 79_666 for depths 1..=3.
#[instrument(skip(board), fields(depth))]
pub fn perft(board: &mut Board, side: Side, depth: u32) -> u64 {
    assert!(
        (depth as usize) <= MAX_PERFT_DEPTH,
        "depth {depth} exceeds MAX_PERFT_DEPTH {MAX_PERFT_DEPTH}"
    );

    let mut move_buffers = create_buffer_array(64);
    let mut scratch_buffers = create_buffer_array(128);
    perft_recursive(board, side, depth, 0, &mut move_buffers, &mut scratch_buffers)
}

/// Per-root-move breakdown, printed via tracing for generator debugging.
#[instrument(skip(board), fields(depth))]
pub fn perft_divide(board: &mut Board, side: Side, depth: u32) -> u64 {
    assert!(depth >= 1, "divide needs at least depth 1");

    let mut move_buffers = create_buffer_array(64);
    let mut scratch_buffers = create_buffer_array(128);
    {
        let moves = &mut move_buffers[0];
        moves.clear();
        generate_legal(board, side, moves, &mut scratch_buffers[0]);
    }

    let move_count = move_buffers[0].len();
    let mut total = 0;
    for i in 0..move_count {
        let mv = move_buffers[0][i];
        let undo = make_move(board, mv);
        let nodes = perft_recursive(
            board,
            side.opposite(),
            depth - 1,
            1,
            &mut move_buffers,
            &mut scratch_buffers,
        );
        undo_move(board, &undo);
        debug!(%mv, nodes, "divide");
        total += nodes;
    }
    total
}
