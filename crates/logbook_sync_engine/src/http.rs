//! HTTP transport implementation.
//!
//! The actual HTTP client is abstracted via a trait so any blocking client
//! (or an in-process server, see [`LoopbackClient`]) can carry requests.
//! Bodies are JSON in the `{data, message}` envelope.

use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::transport::LogbookTransport;
use logbook_protocol::{
    Ack, CreateRequest, DeleteRequest, ListRequest, ListResponse, ResponseBody, UpdateRequest,
};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl Method {
    /// Upper-case method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Method.
    pub method: Method,
    /// Absolute URL, or a path for loopback servers.
    pub url: String,
    /// JSON body, if any.
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a request without a body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
        }
    }

    /// Attaches a JSON body.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// The path component, including any query string.
    pub fn path(&self) -> &str {
        match self.url.find("://") {
            Some(scheme_end) => {
                let rest = &self.url[scheme_end + 3..];
                rest.find('/').map(|i| &rest[i..]).unwrap_or("/")
            }
            None => &self.url,
        }
    }
}

/// A received response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Raw body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response.
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Creates a JSON response from an envelope.
    pub fn json(status: u16, body: &ResponseBody) -> Self {
        // ResponseBody holds only strings and JSON values
        let bytes = body.encode().unwrap_or_default();
        Self::new(status, bytes)
    }

    /// Returns true for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client abstraction.
///
/// Implement this trait to provide the actual network layer. An `Err` means
/// no response was received at all; HTTP error statuses are `Ok`.
pub trait HttpClient: Send + Sync {
    /// Sends a request and waits for the response.
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, String>;
}

/// HTTP-based store transport.
pub struct HttpTransport<C: HttpClient> {
    /// Base URL of the store (e.g., "http://localhost:8080").
    base_url: String,
    /// HTTP client implementation.
    client: C,
    /// Last error message.
    last_error: RwLock<Option<String>>,
}

impl<C: HttpClient> HttpTransport<C> {
    /// Creates a new HTTP transport.
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            last_error: RwLock::new(None),
        }
    }

    /// Creates a transport for the store named in `config`.
    pub fn from_config(config: &SyncConfig, client: C) -> Self {
        Self::new(config.base_url.as_str(), client)
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the last error message.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().clone()
    }

    /// Builds the request for a list operation.
    pub fn list_request(&self, request: &ListRequest) -> HttpRequest {
        HttpRequest::new(
            Method::Get,
            format!("{}/logbook/list?{}", self.base_url, request.to_query()),
        )
    }

    /// Builds the request for a create operation.
    pub fn create_request(&self, request: &CreateRequest) -> SyncResult<HttpRequest> {
        Ok(
            HttpRequest::new(Method::Post, format!("{}/logbook/create", self.base_url))
                .with_body(request.encode()?),
        )
    }

    /// Builds the request for an update operation.
    pub fn update_request(&self, request: &UpdateRequest) -> SyncResult<HttpRequest> {
        Ok(HttpRequest::new(
            Method::Put,
            format!("{}/logbook/update/{}", self.base_url, request.no),
        )
        .with_body(request.encode()?))
    }

    /// Builds the request for a delete operation.
    pub fn delete_request(&self, request: &DeleteRequest) -> HttpRequest {
        HttpRequest::new(
            Method::Delete,
            format!("{}/logbook/delete/{}", self.base_url, request.no),
        )
    }

    fn set_error(&self, err: &str) {
        *self.last_error.write() = Some(err.to_string());
    }

    fn clear_error(&self) {
        *self.last_error.write() = None;
    }

    fn exchange(&self, request: HttpRequest) -> SyncResult<HttpResponse> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        let response = self.client.send(request).map_err(|e| {
            self.set_error(&e);
            SyncError::transport(e)
        })?;

        self.clear_error();
        Ok(response)
    }

    fn acknowledge(&self, request: HttpRequest) -> SyncResult<Ack> {
        let response = self.exchange(request)?;

        match ResponseBody::decode(&response.body) {
            Ok(body) if response.is_success() => Ok(Ack::success(body.message)),
            Ok(body) => Ok(Ack {
                success: false,
                message: body.message,
            }),
            Err(e) if response.is_success() => Err(SyncError::Protocol(format!(
                "failed to decode response: {e}"
            ))),
            Err(_) => Ok(Ack {
                success: false,
                message: None,
            }),
        }
    }
}

impl<C: HttpClient> LogbookTransport for HttpTransport<C> {
    fn list(&self, request: &ListRequest) -> SyncResult<ListResponse> {
        let response = self.exchange(self.list_request(request))?;

        if !response.is_success() {
            let message = ResponseBody::decode(&response.body)
                .ok()
                .and_then(|body| body.message);
            return Err(SyncError::Rejected(message));
        }

        let body = ResponseBody::decode(&response.body)
            .map_err(|e| SyncError::Protocol(format!("failed to decode response: {e}")))?;

        Ok(ListResponse {
            entries: body.data.unwrap_or_default(),
            message: body.message,
        })
    }

    fn create(&self, request: &CreateRequest) -> SyncResult<Ack> {
        self.acknowledge(self.create_request(request)?)
    }

    fn update(&self, request: &UpdateRequest) -> SyncResult<Ack> {
        self.acknowledge(self.update_request(request)?)
    }

    fn delete(&self, request: &DeleteRequest) -> SyncResult<Ack> {
        self.acknowledge(self.delete_request(request))
    }
}

/// Trait for servers that can handle loopback requests.
pub trait LoopbackServer: Send + Sync {
    /// Handles a request whose `url` is a path with optional query.
    fn handle(&self, request: &HttpRequest) -> HttpResponse;
}

impl<S: LoopbackServer + ?Sized> LoopbackServer for Arc<S> {
    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        (**self).handle(request)
    }
}

/// A loopback HTTP client that routes requests directly to a server.
///
/// Useful for tests and the CLI, without actual network overhead.
pub struct LoopbackClient<S: LoopbackServer> {
    server: S,
}

impl<S: LoopbackServer> LoopbackClient<S> {
    /// Creates a new loopback client connected to the given server.
    pub fn new(server: S) -> Self {
        Self { server }
    }

    /// Returns the server.
    pub fn server(&self) -> &S {
        &self.server
    }
}

impl<S: LoopbackServer> HttpClient for LoopbackClient<S> {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        let routed = HttpRequest {
            method: request.method,
            url: request.path().to_string(),
            body: request.body,
        };
        Ok(self.server.handle(&routed))
    }
}
