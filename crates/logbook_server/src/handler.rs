//! Request handlers for store endpoints.

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::store::EntryStore;
use logbook_protocol::{EntryDraft, EntryNo, ListRequest, RawEntry, ResponseBody};
use std::sync::Arc;

/// Context for request handling.
pub struct HandlerContext {
    /// Server configuration.
    pub config: ServerConfig,
    /// Entry store (shared across all handlers).
    pub store: Arc<EntryStore>,
}

impl HandlerContext {
    /// Creates a new handler context.
    pub fn new(config: ServerConfig, store: Arc<EntryStore>) -> Self {
        Self { config, store }
    }

}

/// Handler for store requests.
pub struct RequestHandler {
    context: Arc<HandlerContext>,
}

impl RequestHandler {
    /// Creates a new request handler.
    pub fn new(context: Arc<HandlerContext>) -> Self {
        Self { context }
    }

    /// Handles a list request.
    pub fn handle_list(&self, request: &ListRequest) -> ServerResult<ResponseBody> {
        let entries = self
            .context
            .store
            .list(request, self.context.config.max_list_limit);

        tracing::debug!(
            search = %request.search,
            status = %request.status,
            returned = entries.len(),
            "list"
        );

        Ok(ResponseBody::data(
            entries.iter().map(RawEntry::from).collect(),
        ))
    }

    /// Handles a create request.
    pub fn handle_create(&self, draft: EntryDraft) -> ServerResult<ResponseBody> {
        draft.validate()?;

        let entry = self.context.store.insert(draft)?;

        tracing::info!(no = %entry.no, "entry created");
        Ok(ResponseBody::message("Entry created successfully"))
    }

    /// Handles an update request.
    pub fn handle_update(&self, no: EntryNo, draft: EntryDraft) -> ServerResult<ResponseBody> {
        draft.validate()?;

        self.context.store.replace(no, draft)?;

        tracing::info!(%no, "entry updated");
        Ok(ResponseBody::message("Entry updated successfully"))
    }

    /// Handles a delete request.
    pub fn handle_delete(&self, no: EntryNo) -> ServerResult<ResponseBody> {
        self.context.store.remove(no)?;

        tracing::info!(%no, "entry deleted");
        Ok(ResponseBody::message("Entry deleted successfully"))
    }
}
