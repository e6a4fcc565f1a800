use rivergate::board::{Board, BoardError, BoardSnapshot, Piece, PieceKind::*, Side::*};

#[test]
fn snapshot_restore_round_trips_the_start_position() {
    let original = Board::new_game();
    let snap = original.snapshot();
    let restored = Board::from_snapshot(&snap).expect("valid snapshot");
    assert_eq!(restored, original);
    assert_eq!(restored.hash(), original.hash());
    assert_eq!(restored.find_king(Red), original.find_king(Red));
}

#[test]
fn snapshot_survives_a_binary_round_trip() {
    let original = Board::new_game();
    let bytes = bincode::serialize(&original.snapshot()).expect("serialize");
    let snap: BoardSnapshot = bincode::deserialize(&bytes).expect("deserialize");
    let restored = Board::from_snapshot(&snap).expect("valid snapshot");
    assert_eq!(restored, original);
}

#[test]
fn sparse_test_position_round_trips() {
    let mut b = Board::new();
    b.set(4, 4, Some(Piece::new(Rook, Red)));
    b.set(0, 3, Some(Piece::new(King, Black)));

    let bytes = bincode::serialize(&b.snapshot()).expect("serialize");
    let snap: BoardSnapshot = bincode::deserialize(&bytes).expect("deserialize");
    let restored = Board::from_snapshot(&snap).expect("valid snapshot");

    assert_eq!(restored, b);
    assert_eq!(restored.find_king(Red), None, "king-less side stays king-less");
}

#[test]
fn two_kings_of_one_side_are_rejected() {
    let mut snap = Board::new().snapshot();
    snap.grid[0][3] = Some(Piece::new(King, Black));
    snap.grid[2][5] = Some(Piece::new(King, Black));

    assert_eq!(
        Board::from_snapshot(&snap),
        Err(BoardError::ExtraKing(Black))
    );
}

#[test]
fn inventory_overflow_is_rejected() {
    let mut snap = Board::new().snapshot();
    for c in 0..6 {
        snap.grid[5][c] = Some(Piece::new(Pawn, Red));
    }
    assert!(matches!(
        Board::from_snapshot(&snap),
        Err(BoardError::TooManyPieces { side: Red, kind: Pawn, .. })
    ));
}

#[test]
fn failed_restore_leaves_the_board_untouched() {
    let mut board = Board::new_game();
    let reference = board.clone();

    let mut bad = board.snapshot();
    bad.grid[4][4] = Some(Piece::new(King, Red)); // second red king
    assert!(board.restore(&bad).is_err());
    assert_eq!(board, reference, "rejected snapshot must not mutate");
}
