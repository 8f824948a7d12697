//! Loopback harness.
//!
//! Wires a [`LogbookSession`] to an in-process [`LogbookServer`] through
//! the real HTTP transport, so tests exercise URL building, JSON bodies and
//! server routing without a network.

use crate::fixtures::varied_draft;
use logbook_core::ViewConfig;
use logbook_server::{LogbookServer, ServerConfig};
use logbook_sync_engine::{
    HttpTransport, LogbookSession, LoopbackClient, NotificationLog, SyncConfig, SyncManager,
};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Base URL used by loopback transports.
pub const LOOPBACK_URL: &str = "http://logbook.test";

/// Transport that routes to an in-process server.
pub type LoopbackTransport = HttpTransport<LoopbackClient<Arc<LogbookServer>>>;

/// Session over a [`LoopbackTransport`], recording notifications.
pub type LoopbackSession = LogbookSession<LoopbackTransport, Arc<NotificationLog>>;

/// A session, its server and its notifications.
pub struct LoopbackHarness {
    /// The store server.
    pub server: Arc<LogbookServer>,
    /// The client session.
    pub session: LoopbackSession,
    /// Every notification the session raised.
    pub notifications: Arc<NotificationLog>,
    /// Temporary directory holding the snapshot file, if any.
    temp_dir: Option<TempDir>,
}

impl LoopbackHarness {
    /// Creates a harness over an empty in-memory server.
    pub fn new() -> Self {
        let server = LogbookServer::new(ServerConfig::default()).expect("in-memory server");
        Self::with_server(Arc::new(server), &ViewConfig::default(), SyncConfig::new(LOOPBACK_URL))
    }

    /// Creates a harness whose server already holds `count` varied entries.
    pub fn seeded(count: usize) -> Self {
        let harness = Self::new();
        for i in 0..count {
            harness
                .server
                .store()
                .insert(varied_draft(i))
                .expect("seed entry");
        }
        harness
    }

    /// Creates a harness whose server persists to a temporary file.
    pub fn persistent() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config = ServerConfig::new().with_data_file(temp_dir.path().join("logbook.json"));
        let server = LogbookServer::new(config).expect("persistent server");

        let mut harness = Self::with_server(
            Arc::new(server),
            &ViewConfig::default(),
            SyncConfig::new(LOOPBACK_URL),
        );
        harness.temp_dir = Some(temp_dir);
        harness
    }

    /// Creates a harness around an existing server.
    pub fn with_server(server: Arc<LogbookServer>, view: &ViewConfig, sync: SyncConfig) -> Self {
        let notifications = Arc::new(NotificationLog::new());
        let transport = HttpTransport::from_config(&sync, LoopbackClient::new(Arc::clone(&server)));
        let manager = SyncManager::new(sync, transport, Arc::clone(&notifications));

        Self {
            server,
            session: LogbookSession::new(manager, view),
            notifications,
            temp_dir: None,
        }
    }

    /// Path of the snapshot file, for persistent harnesses.
    pub fn data_file(&self) -> Option<PathBuf> {
        self.temp_dir
            .as_ref()
            .map(|dir| dir.path().join("logbook.json"))
    }
}

impl Default for LoopbackHarness {
    fn default() -> Self {
        Self::new()
    }
}
