use rivergate::board::{Board, Side};
use rivergate::moves::perft::{perft, perft_divide};

#[test]
fn perft_depth_1_from_start_is_44() {
    let mut b = Board::new_game();
    assert_eq!(perft(&mut b, Side::Red, 1), 44);
}

#[test]
fn perft_depth_2_from_start_is_1920() {
    let mut b = Board::new_game();
    assert_eq!(perft(&mut b, Side::Red, 2), 1_920);
}

#[test]
fn perft_depth_3_from_start_is_79666() {
    let mut b = Board::new_game();
    assert_eq!(perft(&mut b, Side::Red, 3), 79_666);
}

#[test]
fn perft_leaves_the_board_untouched() {
    let mut b = Board::new_game();
    let reference = b.clone();
    perft(&mut b, Side::Red, 3);
    assert_eq!(b, reference);
}

#[test]
fn divide_sums_to_perft() {
    let mut b = Board::new_game();
    assert_eq!(perft_divide(&mut b, Side::Red, 2), 1_920);
}

#[test]
fn perft_is_symmetric_for_black() {
    let mut b = Board::new_game();
    assert_eq!(perft(&mut b, Side::Black, 2), 1_920);
}
