//! Tournament and member storage: local writes first, durable sync second.
//!
//! `save` never fails; it updates the local copy and marks the record dirty.
//! `try_sync` pushes dirty state to durable storage and reports failure
//! without dropping the local mutation.

use crate::models::{MatchSet, Participant, Tournament, TournamentId};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to push local state to durable storage.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Whether a record's latest local state has reached durable storage.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    #[default]
    Dirty,
    Synced,
}

/// A tournament together with the schedule it owns.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TournamentRecord {
    pub tournament: Tournament,
    #[serde(default)]
    pub matches: MatchSet,
    #[serde(skip)]
    pub sync: SyncState,
}

impl TournamentRecord {
    pub fn new(tournament: Tournament) -> Self {
        Self {
            tournament,
            matches: MatchSet::default(),
            sync: SyncState::Dirty,
        }
    }

    pub fn id(&self) -> TournamentId {
        self.tournament.id
    }
}

/// Storage seam used by the service layer.
pub trait Repository {
    fn load(&self, id: TournamentId) -> Option<TournamentRecord>;

    /// All records in creation order.
    fn load_all(&self) -> Vec<TournamentRecord>;

    /// Insert or replace locally; the record becomes dirty.
    fn save(&mut self, record: TournamentRecord);

    /// Remove a tournament and its matches.
    fn remove(&mut self, id: TournamentId) -> Option<TournamentRecord>;

    /// The stored member pool, in insertion order.
    fn load_members(&self) -> Vec<Participant>;

    /// Replace the stored member pool locally; members become dirty.
    fn save_members(&mut self, members: Vec<Participant>);

    /// Push local state to durable storage.
    fn try_sync(&mut self) -> Result<(), SyncError>;

    /// Ids whose local state has not been synced yet.
    fn unsynced(&self) -> Vec<TournamentId>;

    /// Every change not yet synced: dirty tournaments, removals and the member pool.
    fn pending_changes(&self) -> usize;
}

/// On-disk layout of the JSON snapshot.
#[derive(Debug, Default, Deserialize)]
struct Snapshot {
    #[serde(default)]
    members: Vec<Participant>,
    #[serde(default)]
    tournaments: Vec<TournamentRecord>,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    members: &'a [Participant],
    tournaments: &'a [TournamentRecord],
}

/// Ordered record list shared by the repository implementations.
#[derive(Debug, Default)]
struct RecordTable {
    records: Vec<TournamentRecord>,
    members: Vec<Participant>,
    members_dirty: bool,
    /// Removals since the last successful sync.
    removals_pending: usize,
}

impl RecordTable {
    fn get(&self, id: TournamentId) -> Option<&TournamentRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    fn upsert(&mut self, mut record: TournamentRecord) {
        record.sync = SyncState::Dirty;
        match self.records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    fn remove(&mut self, id: TournamentId) -> Option<TournamentRecord> {
        let idx = self.records.iter().position(|r| r.id() == id)?;
        self.removals_pending += 1;
        Some(self.records.remove(idx))
    }

    fn set_members(&mut self, members: Vec<Participant>) {
        self.members = members;
        self.members_dirty = true;
    }

    fn pending_changes(&self) -> usize {
        let dirty = self
            .records
            .iter()
            .filter(|r| r.sync == SyncState::Dirty)
            .count();
        dirty + self.removals_pending + usize::from(self.members_dirty)
    }

    fn mark_synced(&mut self) {
        self.removals_pending = 0;
        self.members_dirty = false;
        for r in &mut self.records {
            r.sync = SyncState::Synced;
        }
    }

    fn unsynced(&self) -> Vec<TournamentId> {
        self.records
            .iter()
            .filter(|r| r.sync == SyncState::Dirty)
            .map(TournamentRecord::id)
            .collect()
    }
}

/// Purely in-memory storage. Sync always succeeds.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    table: RecordTable,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Repository for MemoryRepository {
    fn load(&self, id: TournamentId) -> Option<TournamentRecord> {
        self.table.get(id).cloned()
    }

    fn load_all(&self) -> Vec<TournamentRecord> {
        self.table.records.clone()
    }

    fn save(&mut self, record: TournamentRecord) {
        self.table.upsert(record);
    }

    fn remove(&mut self, id: TournamentId) -> Option<TournamentRecord> {
        self.table.remove(id)
    }

    fn load_members(&self) -> Vec<Participant> {
        self.table.members.clone()
    }

    fn save_members(&mut self, members: Vec<Participant>) {
        self.table.set_members(members);
    }

    fn try_sync(&mut self) -> Result<(), SyncError> {
        self.table.mark_synced();
        Ok(())
    }

    fn unsynced(&self) -> Vec<TournamentId> {
        self.table.unsynced()
    }

    fn pending_changes(&self) -> usize {
        self.table.pending_changes()
    }
}

/// Local cache backed by a JSON snapshot file.
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    table: RecordTable,
}

impl JsonFileRepository {
    /// Open the snapshot at `path`. A missing file starts an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SyncError> {
        let path = path.into();
        let mut table = RecordTable::default();
        match fs::read_to_string(&path) {
            Ok(contents) => {
                let snapshot: Snapshot = serde_json::from_str(&contents)?;
                table.records = snapshot.tournaments;
                table.members = snapshot.members;
                table.mark_synced();
                log::info!(
                    "Loaded {} tournament(s) and {} member(s) from {}",
                    table.records.len(),
                    table.members.len(),
                    path.display()
                );
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No snapshot at {}, starting empty", path.display());
            }
            Err(e) => return Err(e.into()),
        }
        Ok(Self { path, table })
    }

    fn write_snapshot(&self) -> Result<(), SyncError> {
        let snapshot = SnapshotRef {
            members: &self.table.members,
            tournaments: &self.table.records,
        };
        let json = serde_json::to_string_pretty(&snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Repository for JsonFileRepository {
    fn load(&self, id: TournamentId) -> Option<TournamentRecord> {
        self.table.get(id).cloned()
    }

    fn load_all(&self) -> Vec<TournamentRecord> {
        self.table.records.clone()
    }

    fn save(&mut self, record: TournamentRecord) {
        self.table.upsert(record);
    }

    fn remove(&mut self, id: TournamentId) -> Option<TournamentRecord> {
        self.table.remove(id)
    }

    fn load_members(&self) -> Vec<Participant> {
        self.table.members.clone()
    }

    fn save_members(&mut self, members: Vec<Participant>) {
        self.table.set_members(members);
    }

    fn try_sync(&mut self) -> Result<(), SyncError> {
        if self.table.pending_changes() == 0 {
            return Ok(());
        }
        self.write_snapshot()?;
        self.table.mark_synced();
        log::debug!(
            "Synced {} tournament(s) to {}",
            self.table.records.len(),
            self.path.display()
        );
        Ok(())
    }

    fn unsynced(&self) -> Vec<TournamentId> {
        self.table.unsynced()
    }

    fn pending_changes(&self) -> usize {
        self.table.pending_changes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::generate_schedule;
    use crate::models::Participant;
    use uuid::Uuid;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("round-robin-{}.json", Uuid::new_v4()))
    }

    fn record(name: &str) -> TournamentRecord {
        TournamentRecord::new(Tournament::new(name).unwrap())
    }

    #[test]
    fn save_marks_dirty_and_sync_clears() {
        let mut repo = MemoryRepository::new();
        let r = record("Spring Cup");
        let id = r.id();
        repo.save(r);
        assert_eq!(repo.unsynced(), vec![id]);
        repo.try_sync().unwrap();
        assert!(repo.unsynced().is_empty());
        assert_eq!(repo.load(id).unwrap().sync, SyncState::Synced);
    }

    #[test]
    fn save_replaces_in_place_keeping_order() {
        let mut repo = MemoryRepository::new();
        let a = record("A");
        let b = record("B");
        let a_id = a.id();
        repo.save(a);
        repo.save(b);
        let mut renamed = repo.load(a_id).unwrap();
        renamed.tournament.rename("A2").unwrap();
        repo.save(renamed);
        let names: Vec<_> = repo.load_all().into_iter().map(|r| r.tournament.name).collect();
        assert_eq!(names, vec!["A2", "B"]);
    }

    #[test]
    fn file_round_trip_restores_matches() {
        let path = temp_path();
        let mut r = record("League");
        r.tournament
            .set_participants(vec![
                Participant::new("1", "Ann", "Red"),
                Participant::new("2", "Bob", "Blue"),
            ])
            .unwrap();
        r.matches = generate_schedule(r.id(), r.tournament.participants()).unwrap();
        let id = r.id();

        let mut repo = JsonFileRepository::open(&path).unwrap();
        repo.save(r);
        repo.try_sync().unwrap();

        let reopened = JsonFileRepository::open(&path).unwrap();
        let loaded = reopened.load(id).unwrap();
        assert_eq!(loaded.matches.len(), 1);
        assert_eq!(loaded.sync, SyncState::Synced);
        assert!(reopened.unsynced().is_empty());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn failed_sync_keeps_local_state_dirty() {
        let path = std::env::temp_dir()
            .join(format!("missing-dir-{}", Uuid::new_v4()))
            .join("snapshot.json");
        let mut repo = JsonFileRepository::open(&path).unwrap();
        let r = record("Offline");
        let id = r.id();
        repo.save(r);
        assert!(repo.try_sync().is_err());
        assert_eq!(repo.unsynced(), vec![id]);
        assert_eq!(repo.load(id).unwrap().tournament.name, "Offline");
    }

    #[test]
    fn removal_is_synced_to_file() {
        let path = temp_path();
        let mut repo = JsonFileRepository::open(&path).unwrap();
        let r = record("Gone");
        let id = r.id();
        repo.save(r);
        repo.try_sync().unwrap();
        assert!(repo.remove(id).is_some());
        assert!(repo.unsynced().is_empty());
        assert_eq!(repo.pending_changes(), 1);
        repo.try_sync().unwrap();
        assert_eq!(repo.pending_changes(), 0);
        let reopened = JsonFileRepository::open(&path).unwrap();
        assert!(reopened.load(id).is_none());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn members_survive_reopen() {
        let path = temp_path();
        let mut repo = JsonFileRepository::open(&path).unwrap();
        repo.save_members(vec![
            Participant::new("m1", "Ann", "Red").with_email(Some("ann@club.example")),
            Participant::new("m2", "Bob", "Blue"),
        ]);
        assert_eq!(repo.pending_changes(), 1);
        repo.try_sync().unwrap();

        let reopened = JsonFileRepository::open(&path).unwrap();
        let members = reopened.load_members();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].email.as_deref(), Some("ann@club.example"));
        assert_eq!(reopened.pending_changes(), 0);
        let _ = fs::remove_file(&path);
    }
}
