//! Score ledger: recording results against a generated schedule.

use crate::models::{GameMatch, MatchSet, MatchStatus, TournamentError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which rule decides that a match counts as played.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionPredicate {
    /// `status == completed`. A recorded 0-0 counts as played.
    #[default]
    Status,
    /// Legacy display rule: at least one side scored. A 0-0 looks unplayed.
    LenientScore,
}

impl CompletionPredicate {
    pub fn is_complete(self, m: &GameMatch) -> bool {
        match self {
            CompletionPredicate::Status => m.is_completed(),
            CompletionPredicate::LenientScore => is_scored(m),
        }
    }
}

/// Legacy "has a score" check: either score above zero.
pub fn is_scored(m: &GameMatch) -> bool {
    m.score_a.unwrap_or(0) > 0 || m.score_b.unwrap_or(0) > 0
}

/// Record (or overwrite) the result of one match and mark it completed.
///
/// Both inputs are validated before anything is touched, so on error the
/// match set is unchanged. Returns whether the stored match changed.
pub fn record_score(
    matches: &mut MatchSet,
    match_id: &str,
    score_a: i64,
    score_b: i64,
) -> Result<bool, TournamentError> {
    let score_a = validate_score(score_a)?;
    let score_b = validate_score(score_b)?;
    let m = matches
        .get_mut(match_id)
        .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?;

    let changed = m.score_a != Some(score_a)
        || m.score_b != Some(score_b)
        || m.status != MatchStatus::Completed;
    m.score_a = Some(score_a);
    m.score_b = Some(score_b);
    m.status = MatchStatus::Completed;
    Ok(changed)
}

fn validate_score(score: i64) -> Result<u32, TournamentError> {
    u32::try_from(score).map_err(|_| TournamentError::InvalidScore)
}

/// Read a submitted score: a JSON integer or a string holding one.
///
/// Floats (even `3.0`), booleans and other non-integers give `InvalidScore`.
/// Range checks happen later in `record_score`.
pub fn parse_score(value: &Value) -> Result<i64, TournamentError> {
    match value {
        Value::Number(n) => n.as_i64().ok_or(TournamentError::InvalidScore),
        Value::String(s) => s.trim().parse().map_err(|_| TournamentError::InvalidScore),
        _ => Err(TournamentError::InvalidScore),
    }
}
