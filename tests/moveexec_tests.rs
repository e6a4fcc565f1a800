use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rivergate::board::{Board, Piece, PieceKind, Side, Square};
use rivergate::moves::execute::{legal_moves, make_move, undo_move};
use rivergate::moves::types::{Move, Undo};

fn mv(fr: i8, fc: i8, tr: i8, tc: i8) -> Move {
    Move::new(Square::from_coords(fr, fc), Square::from_coords(tr, tc))
}

#[test]
fn quiet_move_round_trips_the_board() {
    let mut b = Board::new_game();
    let reference = b.clone();

    let undo = make_move(&mut b, mv(9, 1, 7, 2));
    assert_ne!(b, reference);
    undo_move(&mut b, &undo);
    assert_eq!(b, reference, "grid, hash, count and king cache restored");
}

#[test]
fn capture_records_the_victim() {
    let mut b = Board::new();
    b.set(5, 4, Some(Piece::new(PieceKind::Rook, Side::Red)));
    b.set(2, 4, Some(Piece::new(PieceKind::Horse, Side::Black)));
    let reference = b.clone();

    let undo = make_move(&mut b, mv(5, 4, 2, 4));
    assert_eq!(
        undo.captured,
        Some(Piece::new(PieceKind::Horse, Side::Black))
    );
    assert_eq!(b.piece_count(), 1);

    undo_move(&mut b, &undo);
    assert_eq!(b, reference);
}

#[test]
fn king_moves_update_the_cache() {
    let mut b = Board::new();
    b.set(9, 4, Some(Piece::new(PieceKind::King, Side::Red)));
    b.set(0, 3, Some(Piece::new(PieceKind::King, Side::Black)));

    let undo = make_move(&mut b, mv(9, 4, 8, 4));
    assert_eq!(b.find_king(Side::Red), Some(Square::from_coords(8, 4)));
    undo_move(&mut b, &undo);
    assert_eq!(b.find_king(Side::Red), Some(Square::from_coords(9, 4)));
}

#[test]
fn capturing_a_king_clears_and_restores_its_cache() {
    // Test-position territory: the legality filter normally prevents this.
    let mut b = Board::new();
    b.set(5, 4, Some(Piece::new(PieceKind::Rook, Side::Red)));
    b.set(0, 4, Some(Piece::new(PieceKind::King, Side::Black)));
    let reference = b.clone();

    let undo = make_move(&mut b, mv(5, 4, 0, 4));
    assert_eq!(b.find_king(Side::Black), None);
    undo_move(&mut b, &undo);
    assert_eq!(b.find_king(Side::Black), Some(Square::from_coords(0, 4)));
    assert_eq!(b, reference);
}

/// Random legal walk: play up to 120 plies, checking the incremental hash
/// against a full recompute at every even ply, then unwind the whole game
/// and compare against the pristine start.
#[test]
fn seeded_random_walk_preserves_all_invariants() {
    let mut rng = SmallRng::seed_from_u64(0x5EED_CAFE);
    let mut b = Board::new_game();
    let reference = b.clone();
    let mut side = Side::Red;
    let mut stack: Vec<Undo> = Vec::new();

    for ply in 0..120 {
        let moves = legal_moves(&mut b, side);
        if moves.is_empty() {
            break;
        }
        let pick = moves[rng.random_range(0..moves.len())];
        stack.push(make_move(&mut b, pick));
        side = side.opposite();

        if ply % 2 == 1 {
            // Even number of plies made: side-key parity cancels.
            assert_eq!(
                b.hash(),
                b.compute_hash_full(),
                "hash drifted at ply {ply}"
            );
        }
        let expected_count = b.iter().count() as u8;
        assert_eq!(b.piece_count(), expected_count, "count drifted at ply {ply}");
    }

    while let Some(undo) = stack.pop() {
        undo_move(&mut b, &undo);
    }
    assert_eq!(b, reference, "unwinding the full game must restore start");
}

/// Same walk, but undo/redo each move before committing it.
#[test]
fn make_undo_make_is_idempotent_along_a_game() {
    let mut rng = SmallRng::seed_from_u64(0xD1CE);
    let mut b = Board::new_game();
    let mut side = Side::Red;

    for _ in 0..60 {
        let moves = legal_moves(&mut b, side);
        if moves.is_empty() {
            break;
        }
        let pick = moves[rng.random_range(0..moves.len())];

        let snapshot = b.clone();
        let undo = make_move(&mut b, pick);
        undo_move(&mut b, &undo);
        assert_eq!(b, snapshot);

        make_move(&mut b, pick);
        side = side.opposite();
    }
}
