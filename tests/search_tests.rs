use rivergate::board::{Board, Piece, PieceKind, PieceKind::*, Side, Side::*};
use rivergate::moves::execute::{legal_moves, make_move};
use rivergate::search::SearchConfig;
use rivergate::search::search::Engine;
use rivergate::status::{GameStatus, position_status};
use std::time::Duration;

fn board_with(pieces: &[(i8, i8, PieceKind, Side)]) -> Board {
    let mut b = Board::new();
    for &(r, c, kind, side) in pieces {
        b.set(r, c, Some(Piece::new(kind, side)));
    }
    b
}

fn fixed(depth: i32) -> SearchConfig {
    SearchConfig {
        depth,
        quiescence_depth: 4,
        randomness: 0,
        time_budget: Duration::from_secs(60),
    }
}

#[test]
fn no_legal_moves_returns_none() {
    // The walled-in loss from the status tests, black to move.
    let mut b = board_with(&[
        (0, 4, King, Black),
        (1, 5, Rook, Red),
        (9, 3, King, Red),
    ]);
    let mut engine = Engine::new();
    assert_eq!(engine.find_best_move(&mut b, Black, &fixed(3)), None);
}

#[test]
fn single_reply_short_circuits() {
    // Lone red king with exactly one legal step.
    let mut b = board_with(&[(9, 3, King, Red), (0, 4, King, Black)]);
    assert_eq!(legal_moves(&mut b, Red).len(), 1);

    let mut engine = Engine::new();
    let mv = engine.find_best_move(&mut b, Red, &fixed(6)).expect("forced");
    assert_eq!((mv.to.row(), mv.to.col()), (8, 3));
    assert_eq!(engine.nodes_searched(), 0, "no tree behind a forced move");
}

#[test]
fn finds_the_kill_in_a_won_position() {
    // Red to move wins on the spot; rook vs bare king.
    let mut b = board_with(&[
        (0, 0, Rook, Red),
        (0, 4, King, Black),
        (9, 3, King, Red),
    ]);
    let mut engine = Engine::new();
    let mv = engine
        .find_best_move(&mut b, Red, &fixed(2))
        .expect("red has moves");

    make_move(&mut b, mv);
    assert_eq!(
        position_status(&mut b, Black),
        GameStatus::Won(Red),
        "depth 2 must convert the won position, played {mv}"
    );
}

#[test]
fn search_leaves_the_board_bit_identical() {
    let mut b = Board::new_game();
    let reference = b.clone();
    let mut engine = Engine::new();
    engine.find_best_move(&mut b, Red, &fixed(3));
    assert_eq!(b, reference);
    assert_eq!(b.hash(), reference.hash());
}

#[test]
fn zero_randomness_is_deterministic() {
    let config = fixed(3);
    let mut first = None;
    for _ in 0..3 {
        let mut b = Board::new_game();
        let mut engine = Engine::new();
        let mv = engine.find_best_move(&mut b, Red, &config);
        match first {
            None => first = Some(mv),
            Some(prev) => assert_eq!(mv, prev, "same position, same settings, same move"),
        }
    }
}

#[test]
fn fresh_engines_agree_with_each_other() {
    let config = fixed(3);
    let mut a = Engine::new();
    let mut b = Engine::new();
    let mut board_a = Board::new_game();
    let mut board_b = Board::new_game();
    assert_eq!(
        a.find_best_move(&mut board_a, Red, &config),
        b.find_best_move(&mut board_b, Red, &config)
    );
}

#[test]
fn prefers_the_free_capture() {
    // A black horse hangs next to the red rook.
    let mut b = board_with(&[
        (9, 4, King, Red),
        (0, 3, King, Black),
        (5, 5, Rook, Red),
        (5, 8, Horse, Black),
        (2, 0, Rook, Black),
    ]);
    let mut engine = Engine::new();
    let mv = engine.find_best_move(&mut b, Red, &fixed(3)).expect("moves");
    assert_eq!(
        (mv.from.row(), mv.from.col(), mv.to.row(), mv.to.col()),
        (5, 5, 5, 8),
        "rook takes the hanging horse"
    );
}

#[test]
fn randomness_still_returns_a_legal_move() {
    let config = SearchConfig {
        depth: 3,
        quiescence_depth: 2,
        randomness: 150,
        time_budget: Duration::from_secs(5),
    };
    let mut b = Board::new_game();
    let legal = legal_moves(&mut b, Red);
    let mut engine = Engine::new();
    for _ in 0..5 {
        let mv = engine.find_best_move(&mut b, Red, &config).expect("moves");
        assert!(legal.contains(&mv), "jittered pick {mv} must stay legal");
    }
}

#[test]
fn avoids_hanging_the_rook() {
    // The black pawn on (3,4) attacks the red rook; leaving it there loses
    // 900 for 100.
    let mut b = board_with(&[
        (9, 4, King, Red),
        (0, 3, King, Black),
        (4, 4, Rook, Red),
        (3, 4, Pawn, Black),
        (2, 2, Rook, Black),
    ]);
    let mut engine = Engine::new();
    let mv = engine.find_best_move(&mut b, Red, &fixed(3)).expect("moves");
    make_move(&mut b, mv);

    let rook_on_old_square = b.get(4, 4) == Some(Piece::new(Rook, Red));
    let pawn_still_there = b.get(3, 4) == Some(Piece::new(Pawn, Black));
    assert!(
        !(rook_on_old_square && pawn_still_there),
        "rook left en prise after {mv}"
    );
}
