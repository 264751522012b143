//! Match (game), MatchStatus and MatchSet for round-robin play.

use crate::models::participant::Participant;
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};

/// Identifier for a match, derived from the tournament id and the pair index.
pub type MatchId = String;

/// Whether a result has been recorded for the match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Completed,
}

/// A single pairing between two participants.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub side_a: Participant,
    pub side_b: Participant,
    /// None until a result is recorded.
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
    pub status: MatchStatus,
}

impl GameMatch {
    /// A pending match with no scores.
    pub fn new(
        id: MatchId,
        tournament_id: TournamentId,
        side_a: Participant,
        side_b: Participant,
    ) -> Self {
        Self {
            id,
            tournament_id,
            side_a,
            side_b,
            score_a: None,
            score_b: None,
            status: MatchStatus::Pending,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }
}

/// All matches of one tournament, in generation order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchSet {
    matches: Vec<GameMatch>,
}

impl MatchSet {
    pub(crate) fn from_matches(matches: Vec<GameMatch>) -> Self {
        Self { matches }
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GameMatch> {
        self.matches.iter()
    }

    pub fn get(&self, match_id: &str) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == match_id)
    }

    pub(crate) fn get_mut(&mut self, match_id: &str) -> Option<&mut GameMatch> {
        self.matches.iter_mut().find(|m| m.id == match_id)
    }

    /// Pending matches, in generation order.
    pub fn pending(&self) -> impl Iterator<Item = &GameMatch> {
        self.matches.iter().filter(|m| !m.is_completed())
    }

    /// Completed matches, in generation order.
    pub fn completed(&self) -> impl Iterator<Item = &GameMatch> {
        self.matches.iter().filter(|m| m.is_completed())
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a GameMatch;
    type IntoIter = std::slice::Iter<'a, GameMatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}
