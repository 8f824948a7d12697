//! Server-side entry storage.

use crate::error::{ServerError, ServerResult};
use logbook_core::{filter_entries, StatusFilter};
use logbook_protocol::{Entry, EntryDraft, EntryNo, ListRequest};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted form of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Number the next created entry receives.
    pub next_no: i64,
    /// Entries in insertion order.
    pub entries: Vec<Entry>,
}

impl Default for StoreSnapshot {
    fn default() -> Self {
        Self {
            next_no: 1,
            entries: Vec::new(),
        }
    }
}

/// The authoritative entry collection.
///
/// Entries keep insertion order. Numbers come from a counter that starts at
/// 1 and never goes backwards, so a deleted number is never reused.
///
/// With a data file, every mutation is written to disk while the write lock
/// is held and only becomes visible once the write succeeded.
pub struct EntryStore {
    state: RwLock<StoreSnapshot>,
    data_file: Option<PathBuf>,
}

impl EntryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::from_snapshot(StoreSnapshot::default())
    }

    /// Creates an in-memory store from a snapshot.
    ///
    /// The counter is raised past the highest number present.
    pub fn from_snapshot(mut snapshot: StoreSnapshot) -> Self {
        let highest = snapshot
            .entries
            .iter()
            .map(|entry| entry.no.get())
            .max()
            .unwrap_or(0);
        snapshot.next_no = snapshot.next_no.max(highest.saturating_add(1)).max(1);

        Self {
            state: RwLock::new(snapshot),
            data_file: None,
        }
    }

    /// Opens a store persisted in a JSON snapshot file. A missing file
    /// yields an empty store; the file is created on the first mutation.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let snapshot = if path.exists() {
            let bytes = fs::read(path)?;
            let snapshot: StoreSnapshot = serde_json::from_slice(&bytes)?;
            tracing::info!(
                path = %path.display(),
                entries = snapshot.entries.len(),
                "loaded snapshot"
            );
            snapshot
        } else {
            tracing::debug!(path = %path.display(), "no snapshot file, starting empty");
            StoreSnapshot::default()
        };

        let mut store = Self::from_snapshot(snapshot);
        store.data_file = Some(path.to_path_buf());
        Ok(store)
    }

    /// Returns the snapshot file, if the store is persistent.
    pub fn data_file(&self) -> Option<&Path> {
        self.data_file.as_deref()
    }

    /// Applies `change` to a copy of the state, persists the copy, then
    /// installs it. On any error the visible state is left untouched.
    fn commit<R>(
        &self,
        change: impl FnOnce(&mut StoreSnapshot) -> ServerResult<R>,
    ) -> ServerResult<R> {
        let mut state = self.state.write();
        let mut next = state.clone();
        let result = change(&mut next)?;

        if let Some(path) = &self.data_file {
            write_snapshot(path, &next)?;
        }

        *state = next;
        Ok(result)
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.state.read().clone()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }

    /// Gets one entry.
    pub fn get(&self, no: EntryNo) -> Option<Entry> {
        self.state
            .read()
            .entries
            .iter()
            .find(|entry| entry.no == no)
            .cloned()
    }

    /// Entries matching the request's search and status, sliced to the
    /// requested page. `limit` is capped at `max_limit`.
    pub fn list(&self, request: &ListRequest, max_limit: u32) -> Vec<Entry> {
        let state = self.state.read();
        let status = StatusFilter::from(request.status.as_str());
        let matching = filter_entries(&state.entries, &request.search, &status);

        let limit = request.limit.clamp(1, max_limit.max(1)) as usize;
        let skip = (request.page.max(1) as usize - 1).saturating_mul(limit);

        matching
            .into_iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Appends a new entry and returns it.
    pub fn insert(&self, draft: EntryDraft) -> ServerResult<Entry> {
        self.commit(|state| {
            let no = state.next_no;
            state.next_no = no.checked_add(1).ok_or(ServerError::NumbersExhausted)?;

            let entry = Entry::from_draft(EntryNo::new(no), draft);
            state.entries.push(entry.clone());
            Ok(entry)
        })
    }

    /// Replaces entry `no` in place.
    pub fn replace(&self, no: EntryNo, draft: EntryDraft) -> ServerResult<Entry> {
        self.commit(|state| {
            let slot = state
                .entries
                .iter_mut()
                .find(|entry| entry.no == no)
                .ok_or(ServerError::NotFound(no))?;

            *slot = Entry::from_draft(no, draft);
            Ok(slot.clone())
        })
    }

    /// Removes entry `no`.
    pub fn remove(&self, no: EntryNo) -> ServerResult<Entry> {
        self.commit(|state| {
            let index = state
                .entries
                .iter()
                .position(|entry| entry.no == no)
                .ok_or(ServerError::NotFound(no))?;

            Ok(state.entries.remove(index))
        })
    }
}

/// Writes `snapshot` next to `path` and renames it into place.
fn write_snapshot(path: &Path, snapshot: &StoreSnapshot) -> ServerResult<()> {
    let bytes = serde_json::to_vec_pretty(snapshot)?;

    let staging = path.with_extension("json.tmp");
    fs::write(&staging, bytes)?;
    fs::rename(&staging, path)?;
    Ok(())
}

impl Default for EntryStore {
    fn default() -> Self {
        Self::new()
    }
}
