//! Integration tests for the sync manager, session and store server.

use logbook_protocol::{
    Ack, CreateRequest, DeleteRequest, EntryNo, ListRequest, ListResponse, UpdateRequest,
};
use logbook_core::ViewConfig;
use logbook_server::{LogbookServer, ServerConfig, STORAGE_FAILURE_MESSAGE};
use logbook_sync_engine::{
    LogbookTransport, Notification, NotificationLog, SyncConfig, SyncError, SyncManager,
    SyncResult,
};
use logbook_testkit::prelude::*;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

#[test]
fn client_server_round_trip() {
    let harness = LoopbackHarness::new();
    let session = &harness.session;

    session.create(sample_draft()).unwrap();
    session.create(varied_draft(1)).unwrap();

    let view = session.render();
    assert_eq!(view.total_items, 2);
    // most recent first: 5 Jan before 2 Jan
    assert_eq!(view.entries[0].activity, "Fix login redirect");

    let mut draft = session.find(EntryNo::new(2)).unwrap().to_draft();
    draft.status = "Done".into();
    session.update(EntryNo::new(2), draft).unwrap();
    assert_eq!(session.find(EntryNo::new(2)).unwrap().status, "Done");

    session.delete(EntryNo::new(1)).unwrap();
    assert_eq!(session.render().total_items, 1);
    assert_eq!(harness.server.entry_count(), 1);

    let messages: Vec<String> = harness
        .notifications
        .notifications()
        .into_iter()
        .map(|n| n.to_string())
        .collect();
    assert_eq!(
        messages,
        vec![
            "ok: Entry added",
            "ok: Entry added",
            "ok: Entry updated successfully",
            "ok: Entry deleted",
        ]
    );
}

#[test]
fn store_validation_message_reaches_the_user() {
    let harness = LoopbackHarness::new();
    let mut draft = sample_draft();
    draft.module_or_feature.clear();
    draft.person_in_charge = "  ".into();

    let err = harness.session.create(draft).unwrap_err();
    assert!(!err.is_transport());
    assert_eq!(
        harness.notifications.last().unwrap(),
        Notification::error("module/feature is required, PIC is required")
    );
    assert_eq!(harness.server.entry_count(), 0);
}

#[test]
fn failed_update_keeps_view_and_collection() {
    let harness = LoopbackHarness::seeded(25);
    let session = &harness.session;
    session.refresh().unwrap();
    assert!(session.go_to(3));

    let before = session.manager().entries();
    let draft = before[0].to_draft();
    assert!(session.update(EntryNo::new(999), draft).is_err());

    assert_eq!(session.view_state().current_page(), 3);
    assert_eq!(*session.manager().entries(), *before);
    assert_eq!(
        harness.notifications.last().unwrap(),
        Notification::error("Entry 999 not found")
    );
}

#[test]
fn refresh_is_idempotent_against_the_store() {
    let harness = LoopbackHarness::seeded(8);
    harness.session.refresh().unwrap();
    let first = harness.session.render();

    harness.session.refresh().unwrap();
    assert_eq!(harness.session.render(), first);
}

#[test]
fn store_filters_but_client_refilters() {
    let harness = LoopbackHarness::seeded(30);
    let session = &harness.session;
    session.set_status_filter("Done");
    session.refresh().unwrap();

    // the store already filtered to "Done"
    assert_eq!(session.manager().entries().len(), 10);
    assert!(session.manager().entries().iter().all(|e| e.status == "Done"));

    // widening the local filter does not fetch anything by itself
    session.set_status_filter("all");
    assert_eq!(session.render().total_items, 10);
    session.refresh().unwrap();
    assert_eq!(session.render().total_items, 30);
}

#[test]
fn export_from_the_store() {
    let harness = LoopbackHarness::seeded(12);
    harness.session.refresh().unwrap();
    harness.session.set_search_term("migration");

    let artifact = harness.session.export_on(day(40)).unwrap();
    assert_eq!(artifact.filename, "logbook_2024-02-09.csv");
    // varied drafts 0, 5 and 10 carry the "migration" detail
    assert_eq!(artifact.rows, 3);
    assert_eq!(artifact.content.lines().count(), 4);
}

#[test]
fn persisted_entries_survive_a_restart() {
    let harness = LoopbackHarness::persistent();
    harness.session.create(sample_draft()).unwrap();
    let path = harness.data_file().unwrap();

    let server = logbook_server::LogbookServer::new(
        logbook_server::ServerConfig::new().with_data_file(&path),
    )
    .unwrap();
    assert_eq!(server.entry_count(), 1);
}

#[test]
fn failed_save_is_not_applied() {
    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig::new().with_data_file(dir.path().join("missing").join("logbook.json"));
    let server = Arc::new(LogbookServer::new(config).unwrap());
    let harness = LoopbackHarness::with_server(
        server,
        &ViewConfig::default(),
        SyncConfig::new(LOOPBACK_URL),
    );

    let err = harness.session.create(sample_draft()).unwrap_err();
    assert_eq!(err.store_message(), Some(STORAGE_FAILURE_MESSAGE));
    assert_eq!(
        harness.notifications.last().unwrap(),
        Notification::error(STORAGE_FAILURE_MESSAGE)
    );

    assert_eq!(harness.session.refresh().unwrap(), 0);
    assert_eq!(harness.server.entry_count(), 0);
}

/// A transport whose first list call blocks until released.
///
/// Later list calls answer immediately with the "fresh" records. The
/// blocked call fails instead of answering when `fail_slow` is set.
struct GatedTransport {
    entered: Mutex<Sender<()>>,
    release: Mutex<Receiver<()>>,
    calls: Mutex<usize>,
    fail_slow: bool,
}

impl GatedTransport {
    fn new(fail_slow: bool) -> (Self, Receiver<()>, Sender<()>) {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let transport = Self {
            entered: Mutex::new(entered_tx),
            release: Mutex::new(release_rx),
            calls: Mutex::new(0),
            fail_slow,
        };
        (transport, entered_rx, release_tx)
    }
}

impl LogbookTransport for GatedTransport {
    fn list(&self, _request: &ListRequest) -> SyncResult<ListResponse> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls
        };

        if call == 1 {
            self.entered.lock().unwrap().send(()).unwrap();
            self.release.lock().unwrap().recv().unwrap();
            if self.fail_slow {
                return Err(SyncError::transport("connection reset"));
            }
            Ok(ListResponse::new(raw_entries(&sample_entries(2))))
        } else {
            Ok(ListResponse::new(raw_entries(&sample_entries(5))))
        }
    }

    fn create(&self, _request: &CreateRequest) -> SyncResult<Ack> {
        Ok(Ack::success(None))
    }

    fn update(&self, _request: &UpdateRequest) -> SyncResult<Ack> {
        Ok(Ack::success(None))
    }

    fn delete(&self, _request: &DeleteRequest) -> SyncResult<Ack> {
        Ok(Ack::success(None))
    }
}

/// Starts a slow refresh, lets a fast one finish, then releases the slow
/// one. Returns the manager afterwards.
fn overlap(
    config: SyncConfig,
    fail_slow: bool,
) -> (
    Arc<SyncManager<GatedTransport, Arc<NotificationLog>>>,
    Arc<NotificationLog>,
) {
    let (transport, entered, release) = GatedTransport::new(fail_slow);
    let log = Arc::new(NotificationLog::new());
    let manager = Arc::new(SyncManager::new(config, transport, Arc::clone(&log)));

    let slow = {
        let manager = Arc::clone(&manager);
        thread::spawn(move || manager.refresh())
    };

    entered.recv().unwrap();
    assert!(manager.is_loading());

    manager.refresh().unwrap();
    assert_eq!(manager.entries().len(), 5);
    assert!(manager.is_loading());

    release.send(()).unwrap();
    let slow_result = slow.join().unwrap();
    assert_eq!(slow_result.is_err(), fail_slow);
    assert!(!manager.is_loading());

    (manager, log)
}

fn overlapping_refreshes(config: SyncConfig) -> (usize, u64) {
    let (manager, _log) = overlap(config, false);
    (manager.entries().len(), manager.stats().stale_discarded)
}

#[test]
fn stale_refresh_is_discarded() {
    let (len, discarded) = overlapping_refreshes(SyncConfig::default());
    assert_eq!(len, 5);
    assert_eq!(discarded, 1);
}

#[test]
fn without_guard_last_completion_wins() {
    let (len, discarded) = overlapping_refreshes(SyncConfig::default().with_stale_guard(false));
    assert_eq!(len, 2);
    assert_eq!(discarded, 0);
}

#[test]
fn stale_failure_is_not_reported() {
    let (manager, log) = overlap(SyncConfig::default(), true);

    assert_eq!(manager.entries().len(), 5);
    let stats = manager.stats();
    assert_eq!(stats.stale_discarded, 1);
    assert_eq!(stats.refreshes_failed, 0);
    assert!(stats.last_error.is_none());
    assert!(log.notifications().iter().all(|n| !n.is_error()));
}

#[test]
fn failure_without_guard_clears_collection() {
    let (manager, log) = overlap(SyncConfig::default().with_stale_guard(false), true);

    assert!(manager.entries().is_empty());
    assert_eq!(manager.stats().refreshes_failed, 1);
    assert_eq!(
        log.last().unwrap(),
        Notification::error("Failed to load logbook entries")
    );
}
