//! A manager paired with the view state it is displayed through.

use crate::error::SyncResult;
use crate::manager::{ListQuery, SyncManager};
use crate::notify::{Notification, Notifier};
use crate::transport::LogbookTransport;
use chrono::NaiveDate;
use logbook_core::{ExportArtifact, PageItem, StatusFilter, ViewConfig, ViewPipeline, ViewState};
use logbook_protocol::{Entry, EntryDraft, EntryNo};
use parking_lot::Mutex;

/// An owned rendering of one derived page.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedView {
    /// Rows of the current page, most recent first.
    pub entries: Vec<Entry>,
    /// Size of the filtered view.
    pub total_items: usize,
    /// Number of pages in the filtered view.
    pub total_pages: usize,
    /// Current page after clamping.
    pub current_page: usize,
    /// Page-number window.
    pub window: Vec<PageItem>,
    /// Distinct statuses of the unfiltered collection.
    pub status_options: Vec<String>,
    /// Whether a refresh was in flight when the view was derived.
    pub loading: bool,
}

/// Presentation-facing entry point.
///
/// Search and status changes update both the local filter and the query
/// sent with the next refresh; neither triggers a fetch on its own.
pub struct LogbookSession<T: LogbookTransport, N: Notifier> {
    manager: SyncManager<T, N>,
    view: Mutex<ViewState>,
}

impl<T: LogbookTransport, N: Notifier> LogbookSession<T, N> {
    /// Creates a session around `manager`.
    pub fn new(manager: SyncManager<T, N>, config: &ViewConfig) -> Self {
        let view = ViewState::new(config);
        manager.set_query(ListQuery::new(view.search_term(), view.status_filter().clone()));
        Self {
            manager,
            view: Mutex::new(view),
        }
    }

    /// Gets the manager.
    pub fn manager(&self) -> &SyncManager<T, N> {
        &self.manager
    }

    /// A copy of the current view state.
    pub fn view_state(&self) -> ViewState {
        self.view.lock().clone()
    }

    /// Sets the search term.
    pub fn set_search_term(&self, term: impl Into<String>) {
        let mut view = self.view.lock();
        view.set_search_term(term);
        self.sync_query(&view);
    }

    /// Sets the status filter.
    pub fn set_status_filter(&self, filter: impl Into<StatusFilter>) {
        let mut view = self.view.lock();
        view.set_status_filter(filter);
        self.sync_query(&view);
    }

    fn sync_query(&self, view: &ViewState) {
        self.manager.set_query(ListQuery::new(
            view.search_term(),
            view.status_filter().clone(),
        ));
    }

    /// See [`SyncManager::refresh`].
    pub fn refresh(&self) -> SyncResult<usize> {
        self.manager.refresh()
    }

    /// See [`SyncManager::create`].
    pub fn create(&self, draft: EntryDraft) -> SyncResult<()> {
        self.manager.create(draft)
    }

    /// See [`SyncManager::update`].
    pub fn update(&self, no: EntryNo, draft: EntryDraft) -> SyncResult<()> {
        self.manager.update(no, draft)
    }

    /// See [`SyncManager::delete`].
    pub fn delete(&self, no: EntryNo) -> SyncResult<()> {
        self.manager.delete(no)
    }

    /// See [`SyncManager::find`].
    pub fn find(&self, no: EntryNo) -> Option<Entry> {
        self.manager.find(no)
    }

    /// Derives the current page.
    pub fn render(&self) -> RenderedView {
        let entries = self.manager.entries();
        let mut view = self.view.lock();
        let derived = ViewPipeline::new(&entries).derive(&mut view);

        RenderedView {
            entries: derived.page().iter().map(|e| (*e).clone()).collect(),
            total_items: derived.total_items(),
            total_pages: derived.total_pages,
            current_page: derived.current_page,
            window: derived.window,
            status_options: derived.status_options,
            loading: self.manager.is_loading(),
        }
    }

    /// Distinct statuses of the collection.
    pub fn status_options(&self) -> Vec<String> {
        ViewPipeline::new(&self.manager.entries()).status_options()
    }

    /// Moves to the previous page.
    pub fn previous(&self) -> bool {
        self.navigate(|view, _| view.previous())
    }

    /// Moves to the next page.
    pub fn next(&self) -> bool {
        self.navigate(|view, total| view.next(total))
    }

    /// Jumps to `page` if it exists.
    pub fn go_to(&self, page: usize) -> bool {
        self.navigate(|view, total| view.go_to(page, total))
    }

    /// Applies a page-window item.
    pub fn select(&self, item: PageItem) -> bool {
        self.navigate(|view, total| view.select(item, total))
    }

    fn navigate(&self, step: impl FnOnce(&mut ViewState, usize) -> bool) -> bool {
        let entries = self.manager.entries();
        let mut view = self.view.lock();
        let total = ViewPipeline::new(&entries).derive(&mut view).total_pages;
        step(&mut view, total)
    }

    /// Exports the filtered view, named after today's date.
    pub fn export(&self) -> SyncResult<ExportArtifact> {
        self.export_on(logbook_protocol::today())
    }

    /// Exports the filtered view, named after `date`.
    pub fn export_on(&self, date: NaiveDate) -> SyncResult<ExportArtifact> {
        let entries = self.manager.entries();
        let result = {
            let view = self.view.lock();
            ViewPipeline::new(&entries).export(&view, date)
        };

        match result {
            Ok(artifact) => {
                tracing::info!(filename = %artifact.filename, rows = artifact.rows, "exported");
                self.manager
                    .notifier()
                    .notify(Notification::success("Data exported"));
                Ok(artifact)
            }
            Err(error) => {
                tracing::warn!(%error, "export failed");
                self.manager
                    .notifier()
                    .notify(Notification::error("Failed to export data"));
                Err(error.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SyncConfig;
    use crate::notify::NotificationLog;
    use crate::transport::{MockTransport, TransportCall};
    use logbook_protocol::{Ack, ListRequest, ListResponse, RawEntry};
    use serde_json::json;
    use std::sync::Arc;

    type TestSession = LogbookSession<MockTransport, Arc<NotificationLog>>;

    fn raw(no: i64) -> RawEntry {
        serde_json::from_value(json!({
            "no": no,
            "tanggal": format!("2024-01-{:02}", (no - 1) % 28 + 1),
            "modul_fitur": if no % 3 == 0 { "Billing" } else { "Auth" },
            "aktivitas": format!("Activity {no}"),
            "status": if no % 2 == 0 { "Done" } else { "Open" },
            "pic": "Rina",
        }))
        .unwrap()
    }

    fn session(count: i64) -> (TestSession, Arc<NotificationLog>) {
        let log = Arc::new(NotificationLog::new());
        let transport = MockTransport::new();
        transport.set_list_response(ListResponse::new((1..=count).map(raw).collect()));

        let manager = SyncManager::new(SyncConfig::default(), transport, log.clone());
        let session = LogbookSession::new(manager, &ViewConfig::new().items_per_page(5));
        session.refresh().unwrap();
        (session, log)
    }

    #[test]
    fn render_first_page() {
        let (session, _log) = session(23);
        let view = session.render();

        assert_eq!(view.total_items, 23);
        assert_eq!(view.total_pages, 5);
        assert_eq!(view.entries.len(), 5);
        assert_eq!(view.entries[0].no, EntryNo::new(23));
        assert_eq!(view.status_options, vec!["Open", "Done"]);
        assert!(!view.loading);
    }

    #[test]
    fn navigation_respects_bounds() {
        let (session, _log) = session(12);

        assert!(!session.previous());
        assert!(session.next());
        assert!(session.next());
        assert!(!session.next());
        assert_eq!(session.view_state().current_page(), 3);

        assert!(!session.go_to(4));
        assert!(session.select(PageItem::Page(1)));
        assert!(!session.select(PageItem::Ellipsis));
        assert_eq!(session.render().current_page, 1);
    }

    #[test]
    fn filters_feed_next_refresh() {
        let (session, _log) = session(6);
        session.set_search_term("billing");
        session.set_status_filter("Done");

        let view = session.render();
        assert_eq!(view.total_items, 1);
        assert_eq!(view.entries[0].no, EntryNo::new(6));

        session.refresh().unwrap();
        let calls = session.manager().transport().calls();
        assert_eq!(
            calls.last(),
            Some(&TransportCall::List(ListRequest::new("billing", "Done")))
        );
    }

    #[test]
    fn failed_update_keeps_page_and_collection() {
        let (session, log) = session(12);
        session.go_to(2);
        let before = session.manager().entries();
        session
            .manager()
            .transport()
            .set_update_response(Ack::rejected("Entry not found"));

        let draft = session.find(EntryNo::new(3)).unwrap().to_draft();
        assert!(session.update(EntryNo::new(3), draft).is_err());

        assert_eq!(session.view_state().current_page(), 2);
        assert_eq!(*session.manager().entries(), *before);
        assert!(log.last().unwrap().is_error());
    }

    #[test]
    fn export_uses_filtered_view() {
        let (session, log) = session(12);
        session.set_status_filter("Open");
        session.go_to(2);

        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let artifact = session.export_on(date).unwrap();

        assert_eq!(artifact.rows, 6);
        assert_eq!(artifact.filename, "logbook_2024-02-01.csv");
        assert_eq!(log.last().unwrap(), Notification::success("Data exported"));
    }
}
