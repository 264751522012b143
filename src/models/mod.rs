//! Data structures for round-robin tournaments: participants, matches, tournaments.

mod game;
mod participant;
mod tournament;

pub use game::{GameMatch, MatchId, MatchSet, MatchStatus};
pub use participant::{Participant, ParticipantId};
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentStatus};
