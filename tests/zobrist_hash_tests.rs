use rivergate::board::{Board, Piece, PieceKind, Side};
use rivergate::hash::zobrist::zobrist_keys;
use rivergate::moves::execute::{make_move, make_null_move, undo_move, undo_null_move};
use rivergate::moves::types::Move;

fn mv(fr: i8, fc: i8, tr: i8, tc: i8) -> Move {
    use rivergate::board::Square;
    Move::new(Square::from_coords(fr, fc), Square::from_coords(tr, tc))
}

#[test]
fn empty_board_hashes_to_zero() {
    let b = Board::new();
    assert_eq!(b.hash(), 0);
    assert_eq!(b.hash(), b.compute_hash_full());
}

#[test]
fn initial_position_hash_matches_full_recompute() {
    let b = Board::new_game();
    assert_eq!(b.hash(), b.compute_hash_full());
    assert_ne!(b.hash(), 0);
}

#[test]
fn initial_position_hash_is_reproducible() {
    // Keys come from a fixed seed, so two independent setups agree.
    assert_eq!(Board::new_game().hash(), Board::new_game().hash());
}

#[test]
fn set_and_clear_round_trips_the_hash() {
    let mut b = Board::new();
    let before = b.hash();
    b.set(4, 4, Some(Piece::new(PieceKind::Rook, Side::Red)));
    assert_ne!(b.hash(), before);
    b.set(4, 4, None);
    assert_eq!(b.hash(), before);
}

#[test]
fn replacing_a_piece_equals_direct_placement() {
    let mut via_replace = Board::new();
    via_replace.set(4, 4, Some(Piece::new(PieceKind::Rook, Side::Red)));
    via_replace.set(4, 4, Some(Piece::new(PieceKind::Horse, Side::Black)));

    let mut direct = Board::new();
    direct.set(4, 4, Some(Piece::new(PieceKind::Horse, Side::Black)));

    assert_eq!(via_replace.hash(), direct.hash());
    assert_eq!(via_replace.piece_count(), direct.piece_count());
}

#[test]
fn make_undo_restores_hash_bit_exactly() {
    let mut b = Board::new_game();
    let before = b.hash();

    // Pawn push, then horse development, then undo both.
    let u1 = make_move(&mut b, mv(6, 4, 5, 4));
    assert_ne!(b.hash(), before);
    let u2 = make_move(&mut b, mv(0, 1, 2, 2));
    undo_move(&mut b, &u2);
    undo_move(&mut b, &u1);

    assert_eq!(b.hash(), before);
    assert_eq!(b.hash(), b.compute_hash_full());
}

#[test]
fn side_key_flips_once_per_move() {
    let mut b = Board::new_game();
    let piece_hash = b.compute_hash_full();
    let side = zobrist_keys().side;

    let u = make_move(&mut b, mv(6, 4, 5, 4));
    // One ply in: the incremental hash is the piece XOR plus the side key.
    assert_eq!(b.hash(), b.compute_hash_full() ^ side);
    undo_move(&mut b, &u);
    assert_eq!(b.hash(), piece_hash);
}

#[test]
fn null_move_only_toggles_the_side_key() {
    let mut b = Board::new_game();
    let before = b.hash();
    make_null_move(&mut b);
    assert_eq!(b.hash(), before ^ zobrist_keys().side);
    assert_eq!(b.compute_hash_full(), before, "pieces untouched");
    undo_null_move(&mut b);
    assert_eq!(b.hash(), before);
}

#[test]
fn capture_hash_equals_rebuilt_position() {
    // Red cannon takes the black horse over the cannon screen, a capture
    // available in the opening position.
    let mut b = Board::new_game();
    let capture = mv(7, 1, 0, 1);
    make_move(&mut b, capture);

    // A restored board carries no side-key parity, so compare piece hashes.
    let rebuilt = Board::from_snapshot(&b.snapshot()).expect("valid snapshot");
    assert_eq!(b.compute_hash_full(), rebuilt.compute_hash_full());
    assert_eq!(rebuilt.hash(), rebuilt.compute_hash_full());
}
