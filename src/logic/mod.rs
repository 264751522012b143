//! Tournament business logic: roster selection, scheduling, scoring, summaries.

mod roster;
mod schedule;
mod scoring;
mod summary;

pub use roster::select_roster;
pub use schedule::{generate_schedule, match_id};
pub use scoring::{is_scored, parse_score, record_score, CompletionPredicate};
pub use summary::{count_by_status, summarize, StatusCounts, TournamentSummary};
