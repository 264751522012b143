//! Integration tests for the score ledger and tournament summaries.

use round_robin_web::{
    count_by_status, generate_schedule, is_scored, match_id, record_score, summarize,
    CompletionPredicate, MatchSet, MatchStatus, Participant, Tournament, TournamentError,
    TournamentStatus,
};

fn tournament_with_schedule(n: usize) -> (Tournament, MatchSet) {
    let mut t = Tournament::new("League").unwrap();
    let players: Vec<Participant> = (1..=n)
        .map(|i| Participant::new(format!("P{i}"), format!("Player {i}"), ""))
        .collect();
    t.set_participants(players).unwrap();
    let matches = generate_schedule(t.id, t.participants()).unwrap();
    (t, matches)
}

#[test]
fn recording_completes_match_and_updates_summary() {
    let (t, mut matches) = tournament_with_schedule(4);
    let first = match_id(t.id, 0, 1);

    assert!(record_score(&mut matches, &first, 3, 1).unwrap());

    let m = matches.get(&first).unwrap();
    assert_eq!(m.side_a.id, "P1");
    assert_eq!(m.side_b.id, "P2");
    assert_eq!((m.score_a, m.score_b), (Some(3), Some(1)));
    assert_eq!(m.status, MatchStatus::Completed);

    let s = summarize(&t, Some(&matches), CompletionPredicate::Status);
    assert_eq!((s.total_matches, s.completed_matches, s.pending_matches), (6, 1, 5));
}

#[test]
fn each_score_moves_one_match_from_pending_to_completed() {
    let (t, mut matches) = tournament_with_schedule(5);
    let ids: Vec<_> = matches.iter().map(|m| m.id.clone()).collect();
    for (k, id) in ids.iter().enumerate() {
        let before = summarize(&t, Some(&matches), CompletionPredicate::Status);
        record_score(&mut matches, id, k as i64, 2).unwrap();
        let after = summarize(&t, Some(&matches), CompletionPredicate::Status);
        assert_eq!(after.completed_matches, before.completed_matches + 1);
        assert_eq!(after.pending_matches, before.pending_matches - 1);
    }
}

#[test]
fn unknown_match_leaves_set_unchanged() {
    let (_, mut matches) = tournament_with_schedule(3);
    let before = matches.clone();
    assert_eq!(
        record_score(&mut matches, "nope", 1, 0),
        Err(TournamentError::MatchNotFound("nope".into()))
    );
    assert_eq!(matches, before);
}

#[test]
fn negative_or_oversized_score_is_rejected() {
    let (t, mut matches) = tournament_with_schedule(3);
    let id = match_id(t.id, 1, 2);
    record_score(&mut matches, &id, 2, 2).unwrap();
    let before = matches.clone();

    assert_eq!(record_score(&mut matches, &id, -1, 4), Err(TournamentError::InvalidScore));
    assert_eq!(record_score(&mut matches, &id, 4, -3), Err(TournamentError::InvalidScore));
    assert_eq!(
        record_score(&mut matches, &id, i64::from(u32::MAX) + 1, 0),
        Err(TournamentError::InvalidScore)
    );
    assert_eq!(matches, before);
}

#[test]
fn identical_resubmission_is_a_no_op_and_edits_overwrite() {
    let (t, mut matches) = tournament_with_schedule(3);
    let id = match_id(t.id, 0, 2);
    assert!(record_score(&mut matches, &id, 5, 4).unwrap());
    let after_first = matches.clone();
    assert!(!record_score(&mut matches, &id, 5, 4).unwrap());
    assert_eq!(matches, after_first);

    assert!(record_score(&mut matches, &id, 1, 6).unwrap());
    let m = matches.get(&id).unwrap();
    assert_eq!((m.score_a, m.score_b), (Some(1), Some(6)));
}

#[test]
fn lenient_predicate_misses_a_real_nil_nil() {
    let (t, mut matches) = tournament_with_schedule(3);
    let id = match_id(t.id, 0, 1);
    record_score(&mut matches, &id, 0, 0).unwrap();

    let m = matches.get(&id).unwrap();
    assert!(m.is_completed());
    assert!(!is_scored(m));

    let strict = summarize(&t, Some(&matches), CompletionPredicate::Status);
    let lenient = summarize(&t, Some(&matches), CompletionPredicate::LenientScore);
    assert_eq!(strict.completed_matches, 1);
    assert_eq!(lenient.completed_matches, 0);
}

#[test]
fn pending_and_completed_keep_generation_order() {
    let (t, mut matches) = tournament_with_schedule(4);
    record_score(&mut matches, &match_id(t.id, 1, 3), 2, 0).unwrap();
    record_score(&mut matches, &match_id(t.id, 0, 2), 1, 0).unwrap();

    let completed: Vec<_> = matches.completed().map(|m| m.id.clone()).collect();
    assert_eq!(completed, vec![match_id(t.id, 0, 2), match_id(t.id, 1, 3)]);
    assert_eq!(matches.pending().count(), 4);
    assert_eq!(matches.pending().next().unwrap().id, match_id(t.id, 0, 1));
}

#[test]
fn derived_status_does_not_touch_canonical_status() {
    let (t, mut matches) = tournament_with_schedule(2);
    let id = match_id(t.id, 0, 1);
    record_score(&mut matches, &id, 1, 0).unwrap();

    let s = summarize(&t, Some(&matches), CompletionPredicate::Status);
    assert_eq!(s.derived_status, TournamentStatus::Completed);
    assert_eq!(t.status, TournamentStatus::Active);
}

#[test]
fn summary_without_schedule() {
    let empty = Tournament::new("Empty").unwrap();
    let s = summarize(&empty, None, CompletionPredicate::Status);
    assert_eq!(s.derived_status, TournamentStatus::Upcoming);
    assert_eq!((s.total_matches, s.pending_matches), (0, 0));
    assert!(!s.is_generated);

    let (t, _) = tournament_with_schedule(3);
    let s = summarize(&t, None, CompletionPredicate::Status);
    assert_eq!(s.participant_count, 3);
    assert_eq!(s.derived_status, TournamentStatus::Active);
}

#[test]
fn status_counts_use_canonical_status() {
    let a = Tournament::new("A").unwrap();
    let (b, _) = tournament_with_schedule(2);
    let mut c = Tournament::new("C").unwrap();
    c.set_status(TournamentStatus::Completed);

    let counts = count_by_status([&a, &b, &c]);
    assert_eq!(counts.total, 3);
    assert_eq!((counts.upcoming, counts.active, counts.completed), (1, 1, 1));
}
