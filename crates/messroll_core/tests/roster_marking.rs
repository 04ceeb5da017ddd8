use messroll_core::{BoarderId, MarkOutcome, Roster};

fn roster(tokens: &[&str]) -> Roster {
    Roster::from_rows(tokens.iter().map(|t| (t.to_string(), false)))
}

#[test]
fn marking_duplicates_consumes_slots_in_load_order() {
    let mut roster = roster(&["101", "102", "101"]);

    let first = roster.mark_token("101");
    assert_eq!(
        first,
        MarkOutcome::Marked {
            position: 0,
            id: BoarderId::Number(101),
        }
    );
    assert!(roster.records()[0].eaten);
    assert!(!roster.records()[2].eaten);

    let second = roster.mark_token("101");
    assert_eq!(
        second,
        MarkOutcome::Marked {
            position: 2,
            id: BoarderId::Number(101),
        }
    );
    assert!(roster.records()[2].eaten);

    assert_eq!(roster.mark_token("101"), MarkOutcome::AlreadyMarked);
    assert_eq!(roster.mark_token("999"), MarkOutcome::NotFound);
    assert_eq!(roster.mark_token("abc"), MarkOutcome::InvalidInput);
}

#[test]
fn mark_on_absent_id_leaves_roster_unchanged() {
    let mut roster = roster(&["101", "102"]);
    let before = roster.clone();

    assert_eq!(roster.mark_token("999"), MarkOutcome::NotFound);
    assert_eq!(roster, before);
}

#[test]
fn invalid_input_leaves_roster_unchanged() {
    let mut roster = roster(&["101"]);
    let before = roster.clone();

    assert_eq!(roster.mark_token(""), MarkOutcome::InvalidInput);
    assert_eq!(roster.mark_token("  "), MarkOutcome::InvalidInput);
    assert_eq!(roster.mark_token("10x"), MarkOutcome::InvalidInput);
    assert_eq!(roster, before);
}

#[test]
fn k_duplicates_yield_k_marks_then_already_marked() {
    let mut roster = roster(&["7", "8", "7", "7"]);
    let mut flipped = Vec::new();

    for _ in 0..3 {
        match roster.mark_token("7") {
            MarkOutcome::Marked { position, .. } => flipped.push(position),
            other => panic!("expected Marked, got {other:?}"),
        }
    }

    assert_eq!(flipped, vec![0, 2, 3]);
    assert_eq!(roster.mark_token("7"), MarkOutcome::AlreadyMarked);
}

#[test]
fn reset_clears_every_flag() {
    let mut roster = roster(&["1", "2", "3"]);
    roster.mark_token("1");
    roster.mark_token("2");

    roster.reset();

    let summary = roster.summary();
    assert_eq!(summary.eaten, 0);
    assert_eq!(summary.not_eaten, summary.total);
    assert!(roster.records().iter().all(|record| !record.eaten));
}

#[test]
fn summary_counts_are_consistent_and_idempotent() {
    let mut roster = roster(&["1", "2", "2"]);
    roster.mark_token("2");

    let first = roster.summary();
    assert_eq!(first.total, 3);
    assert_eq!(first.eaten, 1);
    assert_eq!(first.eaten + first.not_eaten, first.total);

    assert_eq!(roster.summary(), first);
    assert_eq!(roster.summary(), first);
}

#[test]
fn empty_roster_handles_mark_and_summary() {
    let mut roster = Roster::empty();

    assert_eq!(roster.mark_token("1"), MarkOutcome::NotFound);

    let summary = roster.summary();
    assert_eq!(summary.total, 0);
    assert_eq!(summary.eaten, 0);
    assert_eq!(summary.not_eaten, 0);
}

#[test]
fn preloaded_flags_are_respected_by_marking() {
    let mut roster = Roster::from_rows(vec![
        ("101".to_string(), true),
        ("101".to_string(), false),
    ]);

    // The first slot is already consumed, so the next mark takes position 1.
    assert_eq!(
        roster.mark_token("101"),
        MarkOutcome::Marked {
            position: 1,
            id: BoarderId::Number(101),
        }
    );
    assert_eq!(roster.mark_token("101"), MarkOutcome::AlreadyMarked);
}
