//! Round-robin schedule generation.

use crate::models::{GameMatch, MatchId, MatchSet, Participant, TournamentError, TournamentId};
use std::collections::HashSet;

/// Deterministic match id for the pair at roster positions `i` and `j`.
pub fn match_id(tournament_id: TournamentId, i: usize, j: usize) -> MatchId {
    format!("{tournament_id}_{i}_{j}")
}

/// Generate every pairing of the roster exactly once.
///
/// 1. Require at least 2 participants with distinct ids.
/// 2. For each `i < j`, emit `participants[i]` vs `participants[j]`.
/// 3. Matches are pending and ordered by `(i, j)`; `n * (n - 1) / 2` in total.
pub fn generate_schedule(
    tournament_id: TournamentId,
    participants: &[Participant],
) -> Result<MatchSet, TournamentError> {
    let n = participants.len();
    if n < 2 {
        return Err(TournamentError::InsufficientParticipants { found: n });
    }

    let mut seen = HashSet::with_capacity(n);
    for p in participants {
        if !seen.insert(p.id.as_str()) {
            return Err(TournamentError::DuplicateParticipant(p.id.clone()));
        }
    }

    let mut matches = Vec::with_capacity(n * (n - 1) / 2);
    for (i, side_a) in participants.iter().enumerate() {
        for (j, side_b) in participants.iter().enumerate().skip(i + 1) {
            matches.push(GameMatch::new(
                match_id(tournament_id, i, j),
                tournament_id,
                side_a.clone(),
                side_b.clone(),
            ));
        }
    }

    Ok(MatchSet::from_matches(matches))
}
