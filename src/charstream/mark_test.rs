use super::*;

fn pos(line: u64, column: u64) -> Position {
    Position { line, column }
}

#[test]
fn set_then_record_then_reset_replays_in_order() {
    let mut ms = MarkStack::new();
    assert!(!ms.is_active());
    ms.set(pos(1, 1));
    assert!(ms.is_active());

    ms.record(pos(1, 1), Grapheme::Single('a'));
    ms.record(pos(1, 2), Grapheme::Single('b'));
    ms.record(pos(1, 3), Grapheme::Single('c'));

    let (mark_pos, replay) = ms.reset().expect("mark was set");
    assert_eq!(mark_pos, pos(1, 1));
    assert_eq!(
        replay.into_iter().collect::<Vec<_>>(),
        vec![
            (pos(1, 1), Grapheme::Single('a')),
            (pos(1, 2), Grapheme::Single('b')),
            (pos(1, 3), Grapheme::Single('c')),
        ]
    );
    assert!(!ms.is_active());
}

#[test]
fn clear_discards_without_replay() {
    let mut ms = MarkStack::new();
    ms.set(pos(1, 1));
    ms.record(pos(1, 1), Grapheme::Single('a'));
    assert!(ms.clear());
    assert!(!ms.is_active());
    assert!(!ms.clear());
}

#[test]
fn nested_marks_each_record_independently() {
    let mut ms = MarkStack::new();
    ms.set(pos(1, 1));
    ms.record(pos(1, 1), Grapheme::Single('a'));
    ms.set(pos(1, 2));
    ms.record(pos(1, 2), Grapheme::Single('b'));

    assert_eq!(ms.depth(), 2);
    let (inner_pos, inner_replay) = ms.reset().unwrap();
    assert_eq!(inner_pos, pos(1, 2));
    assert_eq!(inner_replay.len(), 1);

    let (outer_pos, outer_replay) = ms.reset().unwrap();
    assert_eq!(outer_pos, pos(1, 1));
    assert_eq!(outer_replay.len(), 2);
}

#[test]
fn update_replaces_top_mark_position() {
    let mut ms = MarkStack::new();
    ms.set(pos(1, 1));
    ms.record(pos(1, 1), Grapheme::Single('a'));
    assert!(ms.update(pos(2, 1)));
    assert_eq!(ms.depth(), 1);
    let (p, replay) = ms.reset().unwrap();
    assert_eq!(p, pos(2, 1));
    assert!(replay.is_empty());
}

#[test]
fn reset_keep_resets_then_resets_a_fresh_mark_at_same_spot() {
    let mut ms = MarkStack::new();
    ms.set(pos(1, 1));
    ms.record(pos(1, 1), Grapheme::Single('a'));
    let (p, replay) = ms.reset_keep().unwrap();
    assert_eq!(p, pos(1, 1));
    assert_eq!(replay.len(), 1);
    assert!(ms.is_active());
    let (p2, replay2) = ms.reset().unwrap();
    assert_eq!(p2, pos(1, 1));
    assert!(replay2.is_empty());
}

#[test]
fn backup_returns_only_what_was_available() {
    let mut ms = MarkStack::new();
    ms.set(pos(1, 1));
    ms.record(pos(1, 1), Grapheme::Single('a'));
    ms.record(pos(1, 2), Grapheme::Single('b'));
    ms.record(pos(1, 3), Grapheme::Single('c'));

    let backed = ms.backup(2);
    assert_eq!(
        backed,
        vec![(pos(1, 2), Grapheme::Single('b')), (pos(1, 3), Grapheme::Single('c'))]
    );

    let backed_more = ms.backup(10);
    assert_eq!(backed_more, vec![(pos(1, 1), Grapheme::Single('a'))]);

    assert_eq!(ms.backup(1), Vec::new());
}
