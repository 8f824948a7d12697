//! CLI commands.

pub mod add;
pub mod delete;
pub mod edit;
pub mod export;
pub mod list;
pub mod show;
pub mod statuses;

use crate::output::StderrNotifier;
use crate::{EntryArgs, FilterArgs};
use logbook_core::ViewConfig;
use logbook_protocol::{Entry, EntryDraft, EntryNo};
use logbook_server::{LogbookServer, ServerConfig};
use logbook_sync_engine::{HttpTransport, LogbookSession, LoopbackClient, SyncConfig, SyncManager};
use std::path::Path;

/// Rows per page when a command does not ask for a page size.
pub const DEFAULT_PER_PAGE: usize = 10;

/// Base URL of the in-process store.
const LOCAL_URL: &str = "http://localhost";

/// A session over the in-process store backed by the data file.
pub type CliSession =
    LogbookSession<HttpTransport<LoopbackClient<LogbookServer>>, StderrNotifier>;

/// Opens the logbook stored at `data`.
///
/// A missing file opens an empty logbook; it is created on the first change.
pub fn open(data: &Path, per_page: usize) -> Result<CliSession, Box<dyn std::error::Error>> {
    let server = LogbookServer::new(ServerConfig::new().with_data_file(data))?;
    tracing::debug!(
        path = %data.display(),
        entries = server.entry_count(),
        "opened logbook"
    );

    let config = SyncConfig::new(LOCAL_URL);
    let transport = HttpTransport::from_config(&config, LoopbackClient::new(server));
    let manager = SyncManager::new(config, transport, StderrNotifier);
    Ok(LogbookSession::new(
        manager,
        &ViewConfig::new().items_per_page(per_page),
    ))
}

/// Copies the search and status selection into the session.
pub(crate) fn apply_filter(session: &CliSession, filter: &FilterArgs) {
    session.set_search_term(filter.search.as_str());
    session.set_status_filter(filter.status.as_str());
}

/// Overwrites the draft fields that were given on the command line.
pub(crate) fn apply_fields(draft: &mut EntryDraft, fields: &EntryArgs) {
    if let Some(date) = fields.date {
        draft.date = date;
    }
    let text_fields = [
        (&mut draft.module_or_feature, &fields.module),
        (&mut draft.activity, &fields.activity),
        (&mut draft.technical_detail, &fields.detail),
        (&mut draft.obstacle, &fields.obstacle),
        (&mut draft.resolution, &fields.resolution),
        (&mut draft.status, &fields.status),
        (&mut draft.person_in_charge, &fields.pic),
    ];
    for (target, value) in text_fields {
        if let Some(value) = value {
            target.clone_from(value);
        }
    }
}

/// Refreshes the whole logbook and looks up one entry.
pub(crate) fn fetch_entry(
    session: &CliSession,
    no: EntryNo,
) -> Result<Entry, Box<dyn std::error::Error>> {
    session.refresh()?;
    session
        .find(no)
        .ok_or_else(|| format!("entry {no} not found").into())
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use tempfile::TempDir;

    /// A session over a fresh data file in a temporary directory.
    pub fn session() -> (CliSession, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let session = open(&dir.path().join("logbook.json"), DEFAULT_PER_PAGE).unwrap();
        (session, dir)
    }

    /// Entry fields with every required value set.
    pub fn fields(activity: &str, status: &str) -> EntryArgs {
        EntryArgs {
            date: chrono::NaiveDate::from_ymd_opt(2024, 3, 5),
            module: Some("Auth".into()),
            activity: Some(activity.into()),
            status: Some(status.into()),
            pic: Some("Rina".into()),
            ..EntryArgs::default()
        }
    }

    /// Captures what a command wrote.
    pub fn text(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }
}
