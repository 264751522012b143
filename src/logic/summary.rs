//! Tournament summaries for display: match counts and derived status.

use crate::logic::scoring::CompletionPredicate;
use crate::models::{MatchSet, Tournament, TournamentStatus};
use serde::Serialize;

/// Read-only view of a tournament's progress.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct TournamentSummary {
    pub participant_count: usize,
    pub is_generated: bool,
    pub total_matches: usize,
    pub completed_matches: usize,
    pub pending_matches: usize,
    /// Computed from the matches; may disagree with `Tournament::status`.
    pub derived_status: TournamentStatus,
}

/// Dashboard counters over many tournaments (by their canonical status).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub upcoming: usize,
    pub active: usize,
    pub completed: usize,
}

/// Summarize one tournament. Never writes back to `tournament.status`.
pub fn summarize(
    tournament: &Tournament,
    matches: Option<&MatchSet>,
    predicate: CompletionPredicate,
) -> TournamentSummary {
    let (total_matches, completed_matches) = matches
        .map(|set| (set.len(), set.iter().filter(|m| predicate.is_complete(m)).count()))
        .unwrap_or((0, 0));
    let pending_matches = total_matches - completed_matches;
    let participant_count = tournament.participants().len();

    let derived_status = if participant_count == 0 {
        TournamentStatus::Upcoming
    } else if total_matches > 0 && pending_matches == 0 {
        TournamentStatus::Completed
    } else {
        TournamentStatus::Active
    };

    TournamentSummary {
        participant_count,
        is_generated: tournament.is_generated(),
        total_matches,
        completed_matches,
        pending_matches,
        derived_status,
    }
}

pub fn count_by_status<'a>(tournaments: impl IntoIterator<Item = &'a Tournament>) -> StatusCounts {
    tournaments
        .into_iter()
        .fold(StatusCounts::default(), |mut counts, t| {
            counts.total += 1;
            match t.status {
                TournamentStatus::Upcoming => counts.upcoming += 1,
                TournamentStatus::Active => counts.active += 1,
                TournamentStatus::Completed => counts.completed += 1,
            }
            counts
        })
}
