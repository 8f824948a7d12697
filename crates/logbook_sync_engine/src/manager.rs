//! Remote synchronization manager.
//!
//! Owns the authoritative collection. Every successful mutation is followed
//! by a full refresh; the client never guesses the store's post-mutation
//! state.

use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::notify::{Notification, Notifier};
use crate::transport::LogbookTransport;
use logbook_core::StatusFilter;
use logbook_protocol::{
    Ack, CreateRequest, DeleteRequest, Entry, EntryDraft, EntryNo, ListRequest, UpdateRequest,
};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Statistics about manager operations.
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    /// Refreshes whose result was applied.
    pub refreshes_completed: u64,
    /// Refreshes that failed.
    pub refreshes_failed: u64,
    /// Refresh completions discarded as stale.
    pub stale_discarded: u64,
    /// Mutations acknowledged by the store.
    pub mutations_applied: u64,
    /// Mutations that failed or were rejected.
    pub mutations_rejected: u64,
    /// Last applied refresh.
    pub last_refresh: Option<Instant>,
    /// Last error message.
    pub last_error: Option<String>,
}

/// Search term and status filter sent with every refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Free-text search term.
    pub search: String,
    /// Status selector.
    pub status: StatusFilter,
}

impl ListQuery {
    /// Creates a query.
    pub fn new(search: impl Into<String>, status: impl Into<StatusFilter>) -> Self {
        Self {
            search: search.into(),
            status: status.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Refresh,
    Create,
    Update,
    Delete,
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Operation::Refresh => "refresh",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    fn fallback_message(self) -> &'static str {
        match self {
            Operation::Refresh => "Failed to load logbook entries",
            Operation::Create => "Failed to add entry",
            Operation::Update => "Failed to update entry",
            Operation::Delete => "Failed to delete entry",
        }
    }
}

struct Snapshot {
    ticket: u64,
    entries: Arc<Vec<Entry>>,
}

/// Holds the in-flight count up for one refresh.
struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// The synchronization manager keeps the client's copy of the store.
pub struct SyncManager<T: LogbookTransport, N: Notifier> {
    config: SyncConfig,
    transport: T,
    notifier: N,
    query: RwLock<ListQuery>,
    collection: RwLock<Snapshot>,
    stats: RwLock<SyncStats>,
    in_flight: AtomicUsize,
    next_ticket: AtomicU64,
}

impl<T: LogbookTransport, N: Notifier> SyncManager<T, N> {
    /// Creates a manager with an empty collection.
    pub fn new(config: SyncConfig, transport: T, notifier: N) -> Self {
        Self {
            config,
            transport,
            notifier,
            query: RwLock::new(ListQuery::default()),
            collection: RwLock::new(Snapshot {
                ticket: 0,
                entries: Arc::new(Vec::new()),
            }),
            stats: RwLock::new(SyncStats::default()),
            in_flight: AtomicUsize::new(0),
            next_ticket: AtomicU64::new(0),
        }
    }

    /// Gets the configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Gets the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Gets the notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Gets the current stats.
    pub fn stats(&self) -> SyncStats {
        self.stats.read().clone()
    }

    /// A snapshot of the authoritative collection.
    pub fn entries(&self) -> Arc<Vec<Entry>> {
        Arc::clone(&self.collection.read().entries)
    }

    /// Finds one entry by sequence number.
    pub fn find(&self, no: EntryNo) -> Option<Entry> {
        self.collection
            .read()
            .entries
            .iter()
            .find(|entry| entry.no == no)
            .cloned()
    }

    /// Returns true while at least one refresh is in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// The query sent with the next refresh.
    pub fn query(&self) -> ListQuery {
        self.query.read().clone()
    }

    /// Replaces the query sent with subsequent refreshes.
    pub fn set_query(&self, query: ListQuery) {
        *self.query.write() = query;
    }

    /// Fetches the collection and replaces the local copy.
    ///
    /// On failure the collection is cleared. Returns the number of entries
    /// received. A failure that completes after a newer refresh was applied
    /// is returned but neither reported nor applied.
    pub fn refresh(&self) -> SyncResult<usize> {
        let ticket = self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        let request = self.list_request();
        let _loading = LoadingGuard::enter(&self.in_flight);

        tracing::debug!(
            ticket,
            search = %request.search,
            status = %request.status,
            "refreshing collection"
        );

        match self.transport.list(&request) {
            Ok(response) => {
                let today = logbook_protocol::today();
                let entries: Vec<Entry> = response
                    .entries
                    .into_iter()
                    .map(|raw| raw.normalize(today))
                    .collect();
                let count = entries.len();

                if self.install(ticket, entries) {
                    let mut stats = self.stats.write();
                    stats.refreshes_completed += 1;
                    stats.last_refresh = Some(Instant::now());
                    stats.last_error = None;
                    tracing::info!(ticket, entries = count, "collection refreshed");
                }
                Ok(count)
            }
            Err(error) => {
                // a stale failure must not clear or flag a newer collection
                if self.install(ticket, Vec::new()) {
                    self.stats.write().refreshes_failed += 1;
                    self.report(Operation::Refresh, &error);
                }
                Err(error)
            }
        }
    }

    /// Creates an entry, then refreshes.
    pub fn create(&self, draft: EntryDraft) -> SyncResult<()> {
        let request = CreateRequest::new(draft);
        self.acknowledge(Operation::Create, self.transport.create(&request))?;

        self.notifier.notify(Notification::success("Entry added"));
        self.refresh_after_mutation();
        Ok(())
    }

    /// Replaces entry `no` with `draft`, then refreshes.
    ///
    /// A non-success acknowledgement is a failure; the local collection is
    /// left untouched.
    pub fn update(&self, no: EntryNo, draft: EntryDraft) -> SyncResult<()> {
        let request = UpdateRequest::new(no, draft);
        let message = self.acknowledge(Operation::Update, self.transport.update(&request))?;

        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "Entry updated".to_string());
        self.notifier.notify(Notification::success(message));
        self.refresh_after_mutation();
        Ok(())
    }

    /// Deletes entry `no`, then refreshes.
    pub fn delete(&self, no: EntryNo) -> SyncResult<()> {
        let request = DeleteRequest::new(no);
        self.acknowledge(Operation::Delete, self.transport.delete(&request))?;

        self.notifier.notify(Notification::success("Entry deleted"));
        self.refresh_after_mutation();
        Ok(())
    }

    fn list_request(&self) -> ListRequest {
        let query = self.query.read();
        ListRequest::new(query.search.as_str(), query.status.as_str())
            .with_limit(self.config.list_limit)
    }

    /// Applies a refresh result unless a newer one already landed.
    fn install(&self, ticket: u64, entries: Vec<Entry>) -> bool {
        let mut snapshot = self.collection.write();

        if self.config.stale_guard && ticket < snapshot.ticket {
            let applied = snapshot.ticket;
            drop(snapshot);
            self.stats.write().stale_discarded += 1;
            tracing::warn!(ticket, applied, "discarding stale refresh");
            return false;
        }

        *snapshot = Snapshot {
            ticket,
            entries: Arc::new(entries),
        };
        true
    }

    /// Turns a transport result into the store's message, or a reported
    /// failure.
    fn acknowledge(
        &self,
        operation: Operation,
        outcome: SyncResult<Ack>,
    ) -> SyncResult<Option<String>> {
        let result = outcome.and_then(|ack| {
            if ack.success {
                Ok(ack.message)
            } else {
                Err(SyncError::Rejected(ack.message))
            }
        });

        match result {
            Ok(message) => {
                self.stats.write().mutations_applied += 1;
                tracing::info!(operation = operation.name(), "mutation applied");
                Ok(message)
            }
            Err(error) => {
                self.stats.write().mutations_rejected += 1;
                self.report(operation, &error);
                Err(error)
            }
        }
    }

    fn refresh_after_mutation(&self) {
        // refresh() has already reported its own failure
        if let Err(error) = self.refresh() {
            tracing::debug!(%error, "refresh after mutation failed");
        }
    }

    fn report(&self, operation: Operation, error: &SyncError) {
        let message = error
            .store_message()
            .unwrap_or(operation.fallback_message())
            .to_string();

        tracing::warn!(operation = operation.name(), %error, "operation failed");
        self.stats.write().last_error = Some(error.to_string());
        self.notifier.notify(Notification::error(message));
    }
}
