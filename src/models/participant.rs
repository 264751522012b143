//! Participant: a member committed (or committable) to a tournament roster.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a participant, supplied by the member pool.
pub type ParticipantId = String;

/// A roster entry. Treated as an immutable value compared only by `id`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    #[serde(default)]
    pub team_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Participant {
    /// Create a participant with an explicit id.
    pub fn new(
        id: impl Into<ParticipantId>,
        name: impl Into<String>,
        team_label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            team_label: team_label.into(),
            email: None,
        }
    }

    /// Attach a contact email; blank input clears it.
    pub fn with_email(mut self, email: Option<&str>) -> Self {
        self.email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string);
        self
    }

    /// Case-insensitive match on name, email or team label.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query)
            || self.team_label.to_lowercase().contains(&query)
            || self
                .email
                .as_deref()
                .is_some_and(|e| e.to_lowercase().contains(&query))
    }

    /// Create a participant with a freshly generated id.
    pub fn with_generated_id(name: impl Into<String>, team_label: impl Into<String>) -> Self {
        Self::new(Uuid::new_v4().to_string(), name, team_label)
    }

    /// Whether `other` refers to the same participant.
    pub fn same_as(&self, other: &Participant) -> bool {
        self.id == other.id
    }
}
