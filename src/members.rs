//! Member pool: the source of participants that rosters are selected from.

use crate::models::{Participant, ParticipantId, TournamentError};
use serde::Deserialize;
use std::io;

/// Editable member fields, as submitted by the admin form.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MemberForm {
    /// Ignored on update. A blank id on create is replaced by a generated one.
    #[serde(default)]
    pub id: Option<ParticipantId>,
    pub name: String,
    #[serde(default)]
    pub team_label: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl MemberForm {
    pub fn new(name: impl Into<String>, team_label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            team_label: team_label.into(),
            ..Self::default()
        }
    }

    fn trimmed_name(&self) -> Result<&str, TournamentError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        Ok(name)
    }
}

/// Ordered pool of members. Ids are unique.
#[derive(Clone, Debug, Default)]
pub struct MemberPool {
    members: Vec<Participant>,
}

impl MemberPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a pool from stored members, dropping repeated ids.
    pub fn from_members(members: Vec<Participant>) -> Self {
        let mut pool = Self::new();
        for member in members {
            if let Err(e) = pool.insert(member) {
                log::warn!("Skipping stored member: {e}");
            }
        }
        pool
    }

    /// Import members from CSV with a `id,name,team_label[,email]` header row.
    /// Rows whose id is already present are skipped with a warning.
    pub fn from_csv_reader<R: io::Read>(reader: R) -> Result<Self, csv::Error> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut pool = Self::new();
        for result in rdr.deserialize() {
            let mut member: Participant = result?;
            member.email = member.email.take().filter(|e| !e.trim().is_empty());
            if let Err(e) = pool.insert(member) {
                log::warn!("Skipping CSV row: {e}");
            }
        }
        Ok(pool)
    }

    pub fn all(&self) -> &[Participant] {
        &self.members
    }

    /// Members whose name, email or team label contains `query` (any case).
    pub fn search(&self, query: &str) -> Vec<Participant> {
        self.members
            .iter()
            .filter(|m| m.matches_query(query))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Participant> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn add(&mut self, form: &MemberForm) -> Result<Participant, TournamentError> {
        let name = form.trimmed_name()?;
        let team_label = form.team_label.trim();
        let member = match form.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => Participant::new(id, name, team_label),
            None => Participant::with_generated_id(name, team_label),
        }
        .with_email(form.email.as_deref());
        self.insert(member.clone())?;
        Ok(member)
    }

    fn insert(&mut self, member: Participant) -> Result<(), TournamentError> {
        if self.get(&member.id).is_some() {
            return Err(TournamentError::DuplicateMember(member.id));
        }
        self.members.push(member);
        Ok(())
    }

    /// Replace name, team label and email. Existing rosters keep their snapshot.
    pub fn update(&mut self, id: &str, form: &MemberForm) -> Result<Participant, TournamentError> {
        let name = form.trimmed_name()?;
        let member = self
            .members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| TournamentError::MemberNotFound(id.to_string()))?;
        *member = Participant::new(id, name, form.team_label.trim())
            .with_email(form.email.as_deref());
        Ok(member.clone())
    }

    pub fn remove(&mut self, id: &str) -> Result<Participant, TournamentError> {
        let idx = self
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| TournamentError::MemberNotFound(id.to_string()))?;
        Ok(self.members.remove(idx))
    }
}
