//! Canonical workout entry collection and its persistence.
//!
//! The full list is written back to the key-value store after every
//! successful add or delete. Anything unreadable on startup (missing key,
//! storage error, bad JSON, unknown workout type) falls back to the
//! sample set, which is then written immediately.

use uuid::Uuid;

use crate::entry::{NewWorkout, WorkoutEntry, WorkoutType};
use crate::storage::KeyValueStore;

/// Storage key holding the serialized entry list
pub const DEFAULT_STORAGE_KEY: &str = "workoutEntries";

/// Result of [`EntryStore::add`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Entry appended under this id
    Added(String),
    /// An entry with the same (user, type, minutes) already exists
    Duplicate,
}

/// Owns the workout entries and keeps the backing store in sync
pub struct EntryStore<S> {
    storage: S,
    key: String,
    entries: Vec<WorkoutEntry>,
}

impl<S: KeyValueStore> EntryStore<S> {
    /// Load entries from `storage`, seeding sample data if nothing usable is stored
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let mut store = Self {
            storage,
            key: key.into(),
            entries: Vec::new(),
        };

        match store.load() {
            Some(entries) => {
                tracing::info!("Loaded {} workout entries", entries.len());
                store.entries = entries;
            }
            None => {
                store.entries = sample_entries();
                tracing::info!("Seeded {} sample entries", store.entries.len());
                store.save();
            }
        }

        store
    }

    fn load(&self) -> Option<Vec<WorkoutEntry>> {
        let content = match self.storage.get(&self.key) {
            Ok(Some(content)) => content,
            Ok(None) => {
                tracing::debug!("No stored entries under {:?}", self.key);
                return None;
            }
            Err(e) => {
                tracing::warn!("Failed to read stored entries: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(entries) => Some(entries),
            Err(e) => {
                tracing::warn!("Stored entries are malformed, using sample data: {}", e);
                None
            }
        }
    }

    fn save(&mut self) {
        let content = match serde_json::to_string(&self.entries) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to serialize entries: {}", e);
                return;
            }
        };

        match self.storage.set(&self.key, &content) {
            Ok(()) => tracing::debug!("Saved {} entries", self.entries.len()),
            Err(e) => tracing::warn!("Failed to persist entries: {}", e),
        }
    }

    /// Owned copy of all entries in insertion order
    #[allow(dead_code)] // Public API; the UI borrows via `entries()`
    pub fn list(&self) -> Vec<WorkoutEntry> {
        self.entries.clone()
    }

    /// Borrow all entries in insertion order
    pub fn entries(&self) -> &[WorkoutEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&WorkoutEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append `candidate` unless an identical (user, type, minutes) entry exists
    pub fn add(&mut self, candidate: NewWorkout) -> AddOutcome {
        if self.entries.iter().any(|e| e.matches(&candidate)) {
            tracing::debug!(
                "Ignoring duplicate entry {} / {} / {}",
                candidate.user_name,
                candidate.workout_type,
                candidate.workout_minutes
            );
            return AddOutcome::Duplicate;
        }

        let id = self.fresh_id();
        self.entries.push(candidate.with_id(id.clone()));
        self.save();
        AddOutcome::Added(id)
    }

    /// Remove the entry with `id`. Returns false (and writes nothing) if absent.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            return false;
        }

        self.save();
        true
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = generate_id();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }
}

fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Entries written when no usable data is stored
fn sample_entries() -> Vec<WorkoutEntry> {
    [
        ("John Doe", WorkoutType::Running, 30),
        ("John Doe", WorkoutType::Cycling, 45),
        ("Jane Smith", WorkoutType::Swimming, 60),
        ("Jane Smith", WorkoutType::Running, 20),
        ("Mike Johnson", WorkoutType::Yoga, 50),
        ("Mike Johnson", WorkoutType::Cycling, 40),
    ]
    .into_iter()
    .map(|(name, ty, minutes)| NewWorkout::new(name, ty, minutes).with_id(generate_id()))
    .collect()
}
