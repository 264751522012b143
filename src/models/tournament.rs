//! Tournament, TournamentStatus and TournamentError.

use crate::models::game::MatchId;
use crate::models::participant::{Participant, ParticipantId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    /// Fewer than two participants on the roster.
    #[error("Need at least 2 participants to generate matches (found {found})")]
    InsufficientParticipants { found: usize },
    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),
    /// Negative, non-integer or out of range score.
    #[error("Scores must be non-negative integers")]
    InvalidScore,
    /// The same participant id appears twice in a roster.
    #[error("Participant {0} appears more than once")]
    DuplicateParticipant(ParticipantId),
    /// A schedule already exists for the current roster.
    #[error("Matches have already been generated for this roster")]
    AlreadyGenerated,
    #[error("Tournament not found: {0}")]
    TournamentNotFound(TournamentId),
    #[error("Member not found: {0}")]
    MemberNotFound(ParticipantId),
    #[error("A member with id {0} already exists")]
    DuplicateMember(ParticipantId),
    #[error("Name must not be empty")]
    EmptyName,
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Canonical, manually controlled tournament status.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Created, no roster yet.
    #[default]
    Upcoming,
    Active,
    Completed,
}

impl std::str::FromStr for TournamentStatus {
    type Err = String;

    /// Case-insensitive, so both `active` and the legacy `ACTIVE` parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upcoming" => Ok(Self::Upcoming),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown tournament status: {other}")),
        }
    }
}

impl TournamentStatus {
    /// Parse an optional list filter. Absent or blank means no filter.
    pub fn parse_filter(raw: Option<&str>) -> Result<Option<Self>, String> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => s.parse().map(Some),
            None => Ok(None),
        }
    }
}

/// A round-robin tournament: name, status and the committed roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub status: TournamentStatus,
    participants: Vec<Participant>,
    /// True only while a schedule exists for the current `participants`.
    is_generated: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl Tournament {
    /// Create an empty tournament in Upcoming state.
    pub fn new(name: impl Into<String>) -> Result<Self, TournamentError> {
        let name = normalize_name(name.into())?;
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            status: TournamentStatus::Upcoming,
            participants: Vec::new(),
            is_generated: false,
            created_at: Utc::now(),
            start_date: None,
            end_date: None,
        })
    }

    /// Builder-style schedule dates (informational only).
    pub fn with_dates(
        mut self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn is_generated(&self) -> bool {
        self.is_generated
    }

    /// Commit a new roster.
    ///
    /// Rejects duplicate ids. A roster that differs from the current one (ids or
    /// order) invalidates an existing schedule. A non-empty roster moves an
    /// Upcoming tournament to Active. Returns true if a schedule was invalidated.
    pub fn set_participants(
        &mut self,
        participants: Vec<Participant>,
    ) -> Result<bool, TournamentError> {
        let mut seen = HashSet::new();
        for p in &participants {
            if !seen.insert(p.id.as_str()) {
                return Err(TournamentError::DuplicateParticipant(p.id.clone()));
            }
        }

        let same_roster = self.participants.len() == participants.len()
            && self
                .participants
                .iter()
                .zip(&participants)
                .all(|(a, b)| a.same_as(b));
        let invalidated = self.is_generated && !same_roster;
        if invalidated {
            self.is_generated = false;
        }

        self.participants = participants;
        if self.status == TournamentStatus::Upcoming && !self.participants.is_empty() {
            self.status = TournamentStatus::Active;
        }
        Ok(invalidated)
    }

    /// Flag that a schedule now exists for the current roster.
    pub(crate) fn mark_generated(&mut self) {
        self.is_generated = true;
    }

    /// Manual status override. Never blocked by match state.
    pub fn set_status(&mut self, status: TournamentStatus) {
        self.status = status;
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), TournamentError> {
        self.name = normalize_name(name.into())?;
        Ok(())
    }
}

fn normalize_name(name: String) -> Result<String, TournamentError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TournamentError::EmptyName);
    }
    Ok(trimmed.to_string())
}
