//! Round-robin tournament organizer: library with models, business logic and storage.

pub mod api_error;
pub mod config;
pub mod logic;
pub mod members;
pub mod models;
pub mod repository;
pub mod service;

pub use logic::{
    count_by_status, generate_schedule, is_scored, match_id, parse_score, record_score,
    select_roster, summarize, CompletionPredicate, StatusCounts, TournamentSummary,
};
pub use models::{
    GameMatch, MatchId, MatchSet, MatchStatus, Participant, ParticipantId, Tournament,
    TournamentError, TournamentId, TournamentStatus,
};
