use rivergate::board::Square;
use rivergate::moves::types::Move;
use rivergate::search::tt::{Bound, TranspositionTable};

fn mv(fr: i8, fc: i8, tr: i8, tc: i8) -> Move {
    Move::new(Square::from_coords(fr, fc), Square::from_coords(tr, tc))
}

#[test]
fn probe_misses_on_empty_table() {
    let tt = TranspositionTable::new();
    assert!(tt.probe(0xDEAD_BEEF).is_none());
}

#[test]
fn save_then_probe_round_trips() {
    let mut tt = TranspositionTable::new();
    let m = mv(7, 1, 7, 4);
    tt.save(0xDEAD_BEEF, 5, 42, Bound::Exact, Some(m));

    let entry = tt.probe(0xDEAD_BEEF).expect("stored entry");
    assert_eq!(entry.depth, 5);
    assert_eq!(entry.score, 42);
    assert_eq!(entry.bound, Bound::Exact);
    assert_eq!(entry.best_move, Some(m));
}

#[test]
fn colliding_hash_with_same_slot_does_not_probe() {
    let mut tt = TranspositionTable::new();
    // Same low 20 bits, different hash: maps to the same slot but must not
    // be returned for the other key.
    let a = 0x0010_0123u32;
    let b = 0x0FF0_0123u32;
    tt.save(a, 4, 10, Bound::Exact, None);
    assert!(tt.probe(b).is_none());
}

#[test]
fn shallower_entry_does_not_evict_a_fresh_deeper_one() {
    let mut tt = TranspositionTable::new();
    let a = 0x0010_0123u32;
    let b = 0x0FF0_0123u32;
    tt.save(a, 8, 10, Bound::Exact, None);
    tt.save(b, 3, -5, Bound::Upper, None);

    let kept = tt.probe(a).expect("deep entry survives");
    assert_eq!(kept.depth, 8);
    assert!(tt.probe(b).is_none());
}

#[test]
fn stale_age_is_always_replaceable() {
    let mut tt = TranspositionTable::new();
    let a = 0x0010_0123u32;
    let b = 0x0FF0_0123u32;
    tt.save(a, 8, 10, Bound::Exact, None);

    tt.new_search();
    tt.save(b, 1, 7, Bound::Lower, None);
    let entry = tt.probe(b).expect("stale slot replaced despite depth");
    assert_eq!(entry.depth, 1);
    assert_eq!(entry.bound, Bound::Lower);
}

#[test]
fn same_position_update_keeps_the_old_move_when_none_is_given() {
    let mut tt = TranspositionTable::new();
    let m = mv(6, 4, 5, 4);
    tt.save(0xABCD, 3, 15, Bound::Exact, Some(m));
    tt.save(0xABCD, 4, 20, Bound::Lower, None);

    let entry = tt.probe(0xABCD).expect("entry");
    assert_eq!(entry.depth, 4);
    assert_eq!(entry.best_move, Some(m), "move inherited from the old entry");
}

#[test]
fn clear_resets_everything() {
    let mut tt = TranspositionTable::new();
    tt.save(0xABCD, 3, 15, Bound::Exact, None);
    tt.new_search();
    tt.clear();
    assert!(tt.probe(0xABCD).is_none());
    assert_eq!(tt.age(), 0);
}
