//! Store server and request routing.

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::{HandlerContext, RequestHandler};
use crate::store::EntryStore;
use logbook_protocol::{EntryDraft, EntryNo, ListRequest, ResponseBody};
use logbook_sync_engine::{HttpRequest, HttpResponse, LoopbackServer, Method};
use std::sync::Arc;

const LIST_PATH: &str = "/logbook/list";
const CREATE_PATH: &str = "/logbook/create";
const UPDATE_PREFIX: &str = "/logbook/update/";
const DELETE_PREFIX: &str = "/logbook/delete/";

/// The store server.
///
/// Serves the list, create, update and delete endpoints over an
/// [`EntryStore`]. It speaks [`HttpRequest`]/[`HttpResponse`], so it can sit
/// behind any HTTP front end or be called in-process through
/// [`logbook_sync_engine::LoopbackClient`].
///
/// # Example
///
/// ```
/// use logbook_server::{LogbookServer, ServerConfig};
/// use logbook_sync_engine::{HttpTransport, LoopbackClient};
///
/// let server = LogbookServer::new(ServerConfig::default()).unwrap();
/// let transport = HttpTransport::new("http://localhost", LoopbackClient::new(server));
/// ```
pub struct LogbookServer {
    handler: RequestHandler,
    context: Arc<HandlerContext>,
}

impl LogbookServer {
    /// Creates a server, loading the configured snapshot file if any.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let store = match &config.data_file {
            Some(path) => EntryStore::load(path)?,
            None => EntryStore::new(),
        };
        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// Creates a server over an existing store.
    ///
    /// The store's own data file, if any, decides persistence;
    /// `config.data_file` is only read by [`LogbookServer::new`].
    pub fn with_store(config: ServerConfig, store: Arc<EntryStore>) -> Self {
        let context = Arc::new(HandlerContext::new(config, store));
        let handler = RequestHandler::new(Arc::clone(&context));

        Self { handler, context }
    }

    /// Returns the store.
    pub fn store(&self) -> &Arc<EntryStore> {
        &self.context.store
    }

    /// Returns the number of entries held.
    pub fn entry_count(&self) -> usize {
        self.context.store.len()
    }

    /// Routes a request to its handler.
    ///
    /// Returns the success status with the body, or the error to report.
    pub fn route(&self, request: &HttpRequest) -> ServerResult<(u16, ResponseBody)> {
        let (path, query) = request
            .url
            .split_once('?')
            .unwrap_or((request.url.as_str(), ""));

        match (request.method, path) {
            (Method::Get, LIST_PATH) => {
                let list = ListRequest::from_query(query)?;
                Ok((200, self.handler.handle_list(&list)?))
            }
            (Method::Post, CREATE_PATH) => {
                let draft = decode_draft(request)?;
                Ok((201, self.handler.handle_create(draft)?))
            }
            (Method::Put, _) if path.starts_with(UPDATE_PREFIX) => {
                let no = parse_no(&path[UPDATE_PREFIX.len()..])?;
                let draft = decode_draft(request)?;
                Ok((200, self.handler.handle_update(no, draft)?))
            }
            (Method::Delete, _) if path.starts_with(DELETE_PREFIX) => {
                let no = parse_no(&path[DELETE_PREFIX.len()..])?;
                Ok((200, self.handler.handle_delete(no)?))
            }
            _ if is_known_path(path) => Err(ServerError::MethodNotAllowed {
                method: request.method.to_string(),
                path: path.to_string(),
            }),
            _ => Err(ServerError::UnknownRoute(path.to_string())),
        }
    }
}

impl LoopbackServer for LogbookServer {
    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        match self.route(request) {
            Ok((status, body)) => HttpResponse::json(status, &body),
            Err(error) => {
                if error.is_server_error() {
                    tracing::error!(%error, url = %request.url, "request failed");
                } else {
                    tracing::debug!(%error, url = %request.url, "request rejected");
                }
                HttpResponse::json(error.status_code(), &ResponseBody::message(error.client_message()))
            }
        }
    }
}

fn is_known_path(path: &str) -> bool {
    path == LIST_PATH
        || path == CREATE_PATH
        || path.starts_with(UPDATE_PREFIX)
        || path.starts_with(DELETE_PREFIX)
}

fn parse_no(segment: &str) -> ServerResult<EntryNo> {
    segment
        .parse()
        .map_err(|_| ServerError::InvalidRequest(format!("invalid entry number: {segment}")))
}

fn decode_draft(request: &HttpRequest) -> ServerResult<EntryDraft> {
    let body = request
        .body
        .as_deref()
        .ok_or_else(|| ServerError::InvalidRequest("missing body".into()))?;

    serde_json::from_slice(body).map_err(|e| ServerError::InvalidRequest(e.to_string()))
}
