use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rivergate::board::{Board, Piece, PieceKind, PieceKind::*, Side, Side::*};
use rivergate::moves::execute::legal_moves;
use rivergate::moves::movegen::generate_pseudo_legal;
use rivergate::moves::square_control::{is_square_attacked, kings_facing};
use rivergate::moves::types::Move;

fn board_with(pieces: &[(i8, i8, PieceKind, Side)]) -> Board {
    let mut b = Board::new();
    for &(r, c, kind, side) in pieces {
        b.set(r, c, Some(Piece::new(kind, side)));
    }
    b
}

fn has_move(moves: &[Move], from: (i8, i8), to: (i8, i8)) -> bool {
    moves
        .iter()
        .any(|m| (m.from.row(), m.from.col()) == from && (m.to.row(), m.to.col()) == to)
}

#[test]
fn moves_leaving_the_king_attacked_are_filtered() {
    // The red rook on e-file shields its king from the black rook.
    let mut b = board_with(&[
        (9, 4, King, Red),
        (5, 4, Rook, Red),
        (0, 4, Rook, Black),
        (0, 3, King, Black),
    ]);
    let moves = legal_moves(&mut b, Red);
    assert!(
        !has_move(&moves, (5, 4), (5, 5)),
        "stepping off the file exposes the king"
    );
    assert!(
        has_move(&moves, (5, 4), (0, 4)),
        "capturing the attacker stays legal"
    );
    assert!(
        has_move(&moves, (5, 4), (4, 4)),
        "sliding along the file keeps the shield"
    );
}

#[test]
fn king_moves_that_leave_the_generals_facing_are_filtered() {
    let mut b = board_with(&[(9, 4, King, Red), (0, 4, King, Black)]);
    assert!(kings_facing(&b), "constructed facing position");

    let moves = legal_moves(&mut b, Red);
    assert!(
        !has_move(&moves, (9, 4), (8, 4)),
        "staying on the open file keeps the generals facing"
    );
    assert!(has_move(&moves, (9, 4), (9, 3)));
    assert!(has_move(&moves, (9, 4), (9, 5)));
}

/// The generator never special-cases king captures; the facing filter is
/// what removes them. A rook shielded behind the red king would otherwise
/// let the red king "discover" a capture of the black general.
#[test]
fn facing_filter_takes_precedence_over_king_capture() {
    let mut b = board_with(&[
        (9, 4, King, Red),
        (8, 4, Rook, Red),
        (0, 4, King, Black),
    ]);
    let moves = legal_moves(&mut b, Red);
    for m in &moves {
        let mut probe = b.clone();
        rivergate::moves::execute::make_move(&mut probe, *m);
        assert!(
            !kings_facing(&probe),
            "legal move {m} may not leave the generals facing"
        );
    }
    // The rook may not vacate the shield square while the file is open.
    assert!(!has_move(&moves, (8, 4), (8, 3)));
    assert!(!has_move(&moves, (8, 4), (8, 5)));
    // But pushing up the file toward the enemy king is fine.
    assert!(has_move(&moves, (8, 4), (1, 4)));
}

#[test]
fn evasions_are_the_only_moves_in_check() {
    let mut b = board_with(&[
        (9, 4, King, Red),
        (9, 0, Rook, Red),
        (5, 4, Rook, Black),
        (0, 4, King, Black),
    ]);
    let moves = legal_moves(&mut b, Red);
    for m in &moves {
        let mut probe = b.clone();
        rivergate::moves::execute::make_move(&mut probe, *m);
        assert!(
            !rivergate::moves::square_control::in_check(&probe, Red),
            "move {m} does not resolve the check"
        );
    }
    assert!(has_move(&moves, (9, 4), (9, 3)), "king steps aside");
    assert!(has_move(&moves, (9, 4), (9, 5)), "king steps aside");
    assert!(
        !has_move(&moves, (9, 4), (8, 4)),
        "staying on the rook's file is no evasion"
    );
}

/// Property: the targeted attack probe agrees with full pseudo-legal
/// enumeration on king squares, modulo the flying-general ray, which no
/// generated king move mirrors.
#[test]
fn targeted_attack_probe_agrees_with_enumeration() {
    let mut rng = SmallRng::seed_from_u64(0xA77AC4);
    let kinds = [Advisor, Elephant, Rook, Horse, Cannon, Pawn];

    for round in 0..300 {
        let mut b = Board::new();
        // Kings in random palace cells.
        b.set(
            7 + rng.random_range(0..3),
            3 + rng.random_range(0..3),
            Some(Piece::new(King, Red)),
        );
        b.set(
            rng.random_range(0..3),
            3 + rng.random_range(0..3),
            Some(Piece::new(King, Black)),
        );
        // A handful of random pieces on free squares.
        for _ in 0..rng.random_range(2..12) {
            let (r, c) = (rng.random_range(0..10), rng.random_range(0..9));
            if b.get(r, c).is_some() {
                continue;
            }
            let kind = kinds[rng.random_range(0..kinds.len())];
            let side = if rng.random_bool(0.5) { Red } else { Black };
            b.set(r, c, Some(Piece::new(kind, side)));
        }

        for side in [Red, Black] {
            let king = b.find_king(side).expect("king placed");
            let by = side.opposite();

            let mut pseudo = Vec::new();
            generate_pseudo_legal(&b, by, &mut pseudo);
            let enumerated = pseudo.iter().any(|m| m.to == king) || kings_facing(&b);

            assert_eq!(
                is_square_attacked(&b, king.row(), king.col(), by),
                enumerated,
                "round {round}: probe disagrees with enumeration for {side:?}\n{b}"
            );
        }
    }
}
