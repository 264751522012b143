//! Integration tests for roster selection and roster changes on a tournament.

use round_robin_web::{select_roster, Participant, Tournament, TournamentError, TournamentStatus};

fn pool() -> Vec<Participant> {
    vec![
        Participant::new("a", "Ann", "Red"),
        Participant::new("b", "Bob", "Blue"),
        Participant::new("c", "Cid", "Green"),
    ]
}

fn ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

#[test]
fn roster_follows_selection_order() {
    let roster = select_roster(&pool(), &ids(&["c", "a"])).unwrap();
    let names: Vec<_> = roster.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Cid", "Ann"]);
}

#[test]
fn unknown_ids_are_dropped_without_error() {
    let roster = select_roster(&pool(), &ids(&["a", "zzz", "b"])).unwrap();
    let got: Vec<_> = roster.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(got, vec!["a", "b"]);
}

#[test]
fn empty_and_single_selection_are_accepted() {
    assert!(select_roster(&pool(), &[]).unwrap().is_empty());
    assert_eq!(select_roster(&pool(), &ids(&["b"])).unwrap().len(), 1);
}

#[test]
fn repeated_id_is_rejected() {
    assert_eq!(
        select_roster(&pool(), &ids(&["a", "b", "a"])),
        Err(TournamentError::DuplicateParticipant("a".into()))
    );
}

#[test]
fn tournament_rejects_duplicate_participants() {
    let mut t = Tournament::new("Cup").unwrap();
    let mut players = pool();
    players.push(Participant::new("b", "Bobby", ""));
    assert_eq!(
        t.set_participants(players),
        Err(TournamentError::DuplicateParticipant("b".into()))
    );
    assert!(t.participants().is_empty());
    assert_eq!(t.status, TournamentStatus::Upcoming);
}

#[test]
fn non_empty_roster_activates_upcoming_tournament() {
    let mut t = Tournament::new("Cup").unwrap();
    t.set_participants(Vec::new()).unwrap();
    assert_eq!(t.status, TournamentStatus::Upcoming);
    t.set_participants(pool()).unwrap();
    assert_eq!(t.status, TournamentStatus::Active);
}

#[test]
fn roster_does_not_reopen_completed_tournament() {
    let mut t = Tournament::new("Cup").unwrap();
    t.set_status(TournamentStatus::Completed);
    t.set_participants(pool()).unwrap();
    assert_eq!(t.status, TournamentStatus::Completed);
}

#[test]
fn status_override_is_unconstrained() {
    let mut t = Tournament::new("Cup").unwrap();
    for s in [
        TournamentStatus::Completed,
        TournamentStatus::Upcoming,
        TournamentStatus::Active,
        TournamentStatus::Upcoming,
    ] {
        t.set_status(s);
        assert_eq!(t.status, s);
    }
}

#[test]
fn names_are_trimmed_and_required() {
    assert_eq!(Tournament::new("   ").unwrap_err(), TournamentError::EmptyName);
    let mut t = Tournament::new("  Winter Open ").unwrap();
    assert_eq!(t.name, "Winter Open");
    assert_eq!(t.rename(""), Err(TournamentError::EmptyName));
    assert_eq!(t.name, "Winter Open");
}

#[test]
fn status_parses_case_insensitively() {
    assert_eq!("ACTIVE".parse::<TournamentStatus>(), Ok(TournamentStatus::Active));
    assert_eq!("completed".parse::<TournamentStatus>(), Ok(TournamentStatus::Completed));
    assert!("finished".parse::<TournamentStatus>().is_err());
}

#[test]
fn list_filter_accepts_any_case_and_blank() {
    assert_eq!(
        TournamentStatus::parse_filter(Some("ACTIVE")),
        Ok(Some(TournamentStatus::Active))
    );
    assert_eq!(
        TournamentStatus::parse_filter(Some("Upcoming")),
        Ok(Some(TournamentStatus::Upcoming))
    );
    assert_eq!(TournamentStatus::parse_filter(Some("  ")), Ok(None));
    assert_eq!(TournamentStatus::parse_filter(None), Ok(None));
    assert!(TournamentStatus::parse_filter(Some("archived")).is_err());
}
