//! Dashboard service: ties the member pool, the core logic and storage together.
//!
//! Every mutation is applied to the repository first and synced afterwards.
//! A failed sync is logged and reported through `Outcome::synced`; the local
//! change stays in place and is retried by the next `sync`.

use crate::logic::{
    count_by_status, generate_schedule, record_score, select_roster, summarize,
    CompletionPredicate, StatusCounts, TournamentSummary,
};
use crate::members::{MemberForm, MemberPool};
use crate::models::{
    GameMatch, MatchSet, Participant, ParticipantId, Tournament, TournamentError, TournamentId,
    TournamentStatus,
};
use crate::repository::{Repository, SyncError, TournamentRecord};
use chrono::NaiveDate;
use serde::Serialize;

/// Result of a mutation plus whether it reached durable storage.
#[derive(Clone, Debug, Serialize)]
pub struct Outcome<T> {
    pub data: T,
    pub synced: bool,
}

/// Admin operations over tournaments and members.
#[derive(Debug)]
pub struct Dashboard<R> {
    members: MemberPool,
    repo: R,
}

impl<R: Repository> Dashboard<R> {
    /// Members already in storage take precedence over `seed`; the seed is
    /// only stored when the repository has none.
    pub fn new(seed: MemberPool, mut repo: R) -> Self {
        let stored = repo.load_members();
        let members = if stored.is_empty() {
            if !seed.is_empty() {
                repo.save_members(seed.all().to_vec());
            }
            seed
        } else {
            if !seed.is_empty() {
                log::info!("Using {} stored member(s), ignoring seed list", stored.len());
            }
            MemberPool::from_members(stored)
        };
        let mut dashboard = Self { members, repo };
        if let Err(e) = dashboard.repo.try_sync() {
            log::warn!("Initial sync failed, will retry: {e}");
        }
        dashboard
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Retry pushing dirty state. Returns the number of changes that were pending.
    pub fn sync(&mut self) -> Result<usize, SyncError> {
        let pending = self.repo.pending_changes();
        self.repo.try_sync()?;
        Ok(pending)
    }

    fn commit<T>(&mut self, data: T) -> Outcome<T> {
        let synced = match self.repo.try_sync() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to sync with storage, changes kept locally: {e}");
                false
            }
        };
        Outcome { data, synced }
    }

    fn record(&self, id: TournamentId) -> Result<TournamentRecord, TournamentError> {
        self.repo.load(id).ok_or(TournamentError::TournamentNotFound(id))
    }

    // Members

    pub fn members(&self) -> &[Participant] {
        self.members.all()
    }

    /// Members matching `query` on name, email or team label.
    pub fn search_members(&self, query: &str) -> Vec<Participant> {
        self.members.search(query)
    }

    fn store_members(&mut self) {
        self.repo.save_members(self.members.all().to_vec());
    }

    pub fn add_member(
        &mut self,
        form: &MemberForm,
    ) -> Result<Outcome<Participant>, TournamentError> {
        let member = self.members.add(form)?;
        log::info!("Added member {} ({})", member.name, member.id);
        self.store_members();
        Ok(self.commit(member))
    }

    pub fn update_member(
        &mut self,
        id: &str,
        form: &MemberForm,
    ) -> Result<Outcome<Participant>, TournamentError> {
        let member = self.members.update(id, form)?;
        self.store_members();
        Ok(self.commit(member))
    }

    pub fn remove_member(&mut self, id: &str) -> Result<Outcome<Participant>, TournamentError> {
        let member = self.members.remove(id)?;
        log::info!("Removed member {} ({})", member.name, member.id);
        self.store_members();
        Ok(self.commit(member))
    }

    // Tournaments

    pub fn create_tournament(
        &mut self,
        name: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Outcome<Tournament>, TournamentError> {
        let tournament = Tournament::new(name)?.with_dates(start_date, end_date);
        log::info!("Created tournament {} ({})", tournament.name, tournament.id);
        self.repo.save(TournamentRecord::new(tournament.clone()));
        Ok(self.commit(tournament))
    }

    /// All tournaments in creation order, optionally filtered by status.
    pub fn tournaments(&self, status: Option<TournamentStatus>) -> Vec<Tournament> {
        self.repo
            .load_all()
            .into_iter()
            .map(|r| r.tournament)
            .filter(|t| status.map_or(true, |s| t.status == s))
            .collect()
    }

    pub fn tournament(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        Ok(self.record(id)?.tournament)
    }

    pub fn rename_tournament(
        &mut self,
        id: TournamentId,
        name: &str,
    ) -> Result<Outcome<Tournament>, TournamentError> {
        let mut record = self.record(id)?;
        record.tournament.rename(name)?;
        let tournament = record.tournament.clone();
        self.repo.save(record);
        Ok(self.commit(tournament))
    }

    /// Manual status override; any status may follow any other.
    pub fn set_status(
        &mut self,
        id: TournamentId,
        status: TournamentStatus,
    ) -> Result<Outcome<Tournament>, TournamentError> {
        let mut record = self.record(id)?;
        record.tournament.set_status(status);
        log::info!("Tournament {id} status set to {status:?}");
        let tournament = record.tournament.clone();
        self.repo.save(record);
        Ok(self.commit(tournament))
    }

    /// Delete a tournament together with its matches.
    pub fn delete_tournament(
        &mut self,
        id: TournamentId,
    ) -> Result<Outcome<Tournament>, TournamentError> {
        let record = self
            .repo
            .remove(id)
            .ok_or(TournamentError::TournamentNotFound(id))?;
        log::info!(
            "Deleted tournament {} with {} match(es)",
            record.tournament.name,
            record.matches.len()
        );
        Ok(self.commit(record.tournament))
    }

    /// Commit a roster chosen from the member pool.
    ///
    /// A roster different from the current one discards any existing schedule.
    pub fn assign_roster(
        &mut self,
        id: TournamentId,
        chosen: &[ParticipantId],
    ) -> Result<Outcome<Tournament>, TournamentError> {
        let mut record = self.record(id)?;
        let roster = select_roster(self.members.all(), chosen)?;
        let invalidated = record.tournament.set_participants(roster)?;
        if invalidated {
            log::warn!(
                "Roster of {} changed after generation, discarding {} match(es)",
                record.tournament.name,
                record.matches.len()
            );
            record.matches = MatchSet::default();
        }
        let tournament = record.tournament.clone();
        self.repo.save(record);
        Ok(self.commit(tournament))
    }

    /// Generate the round-robin schedule for the current roster.
    pub fn generate(&mut self, id: TournamentId) -> Result<Outcome<MatchSet>, TournamentError> {
        let mut record = self.record(id)?;
        if record.tournament.is_generated() {
            return Err(TournamentError::AlreadyGenerated);
        }
        let matches = generate_schedule(id, record.tournament.participants())?;
        log::info!(
            "Generated {} match(es) for {} participant(s) in {}",
            matches.len(),
            record.tournament.participants().len(),
            record.tournament.name
        );
        record.tournament.mark_generated();
        record.matches = matches.clone();
        self.repo.save(record);
        Ok(self.commit(matches))
    }

    pub fn matches(&self, id: TournamentId) -> Result<MatchSet, TournamentError> {
        Ok(self.record(id)?.matches)
    }

    /// Record or edit the result of one match.
    pub fn record_score(
        &mut self,
        id: TournamentId,
        match_id: &str,
        score_a: i64,
        score_b: i64,
    ) -> Result<Outcome<GameMatch>, TournamentError> {
        let mut record = self.record(id)?;
        let changed = record_score(&mut record.matches, match_id, score_a, score_b)?;
        let updated = record
            .matches
            .get(match_id)
            .cloned()
            .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?;
        if changed {
            self.repo.save(record);
        }
        Ok(self.commit(updated))
    }

    pub fn summary(
        &self,
        id: TournamentId,
        predicate: CompletionPredicate,
    ) -> Result<TournamentSummary, TournamentError> {
        let record = self.record(id)?;
        let matches = (!record.matches.is_empty()).then_some(&record.matches);
        Ok(summarize(&record.tournament, matches, predicate))
    }

    pub fn status_counts(&self) -> StatusCounts {
        let tournaments = self.tournaments(None);
        count_by_status(&tournaments)
    }
}
