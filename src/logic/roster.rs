//! Roster selection: turn a chosen subset of the member pool into an ordered roster.

use crate::models::{Participant, ParticipantId, TournamentError};
use std::collections::HashSet;

/// Build the roster for a tournament from the available pool.
///
/// Output follows the order of `chosen`. Ids missing from `available` are
/// skipped with a warning. A repeated id in `chosen` is rejected, so the
/// result can be committed to a tournament as is. Zero or one participant is fine.
pub fn select_roster(
    available: &[Participant],
    chosen: &[ParticipantId],
) -> Result<Vec<Participant>, TournamentError> {
    let mut seen = HashSet::with_capacity(chosen.len());
    let mut roster = Vec::with_capacity(chosen.len());

    for id in chosen {
        if !seen.insert(id.as_str()) {
            return Err(TournamentError::DuplicateParticipant(id.clone()));
        }
        match available.iter().find(|p| &p.id == id) {
            Some(p) => roster.push(p.clone()),
            None => log::warn!("Ignoring unknown member {id} in roster selection"),
        }
    }

    Ok(roster)
}
