//! Request and response messages exchanged with the remote store.

use crate::entry::{EntryDraft, EntryNo};
use crate::error::{ProtocolError, ProtocolResult};
use crate::raw::RawEntry;
use serde::{Deserialize, Serialize};

/// Status filter value that matches every entry.
pub const STATUS_ALL: &str = "all";

/// Page size that asks the store for the whole collection.
pub const FETCH_ALL_LIMIT: u32 = 99_999;

/// List request.
///
/// The store filters server-side with `search` and `status`; the client
/// re-applies the same predicate on whatever comes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    /// 1-based page to fetch.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Free-text search term.
    pub search: String,
    /// Status filter, or [`STATUS_ALL`].
    pub status: String,
}

impl ListRequest {
    /// Creates a request for the first page of everything matching.
    pub fn new(search: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            page: 1,
            limit: FETCH_ALL_LIMIT,
            search: search.into(),
            status: status.into(),
        }
    }

    /// Sets the page.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the page size.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Renders the request as a percent-encoded query string.
    pub fn to_query(&self) -> String {
        format!(
            "page={}&limit={}&search={}&status={}",
            self.page,
            self.limit,
            urlencoding::encode(&self.search),
            urlencoding::encode(&self.status),
        )
    }

    /// Parses a query string. Absent keys take their defaults.
    pub fn from_query(query: &str) -> ProtocolResult<Self> {
        let mut request = Self::new("", STATUS_ALL);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode_component(value)?;

            match key {
                "page" => request.page = parse_number(key, &value)?,
                "limit" => request.limit = parse_number(key, &value)?,
                "search" => request.search = value,
                "status" => request.status = value,
                _ => {}
            }
        }

        Ok(request)
    }
}

impl Default for ListRequest {
    fn default() -> Self {
        Self::new("", STATUS_ALL)
    }
}

fn decode_component(value: &str) -> ProtocolResult<String> {
    let spaced = value.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|v| v.into_owned())
        .map_err(|e| ProtocolError::InvalidQuery(format!("{value}: {e}")))
}

fn parse_number(key: &str, value: &str) -> ProtocolResult<u32> {
    value
        .trim()
        .parse()
        .map_err(|_| ProtocolError::InvalidQuery(format!("{key}={value}")))
}

/// List response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListResponse {
    /// Records as returned by the store.
    pub entries: Vec<RawEntry>,
    /// Optional message from the store.
    pub message: Option<String>,
}

impl ListResponse {
    /// Creates a response carrying records.
    pub fn new(entries: Vec<RawEntry>) -> Self {
        Self {
            entries,
            message: None,
        }
    }
}

/// Create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    /// The record to create; the store assigns its number.
    pub draft: EntryDraft,
}

impl CreateRequest {
    /// Creates a new create request.
    pub fn new(draft: EntryDraft) -> Self {
        Self { draft }
    }

    /// Encodes the body to JSON.
    pub fn encode(&self) -> ProtocolResult<Vec<u8>> {
        Ok(serde_json::to_vec(&self.draft)?)
    }
}

/// Update request: a full replacement record keyed by sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    /// Entry to replace.
    pub no: EntryNo,
    /// Replacement record.
    pub draft: EntryDraft,
}

impl UpdateRequest {
    /// Creates a new update request.
    pub fn new(no: EntryNo, draft: EntryDraft) -> Self {
        Self { no, draft }
    }

    /// Encodes the body to JSON.
    pub fn encode(&self) -> ProtocolResult<Vec<u8>> {
        Ok(serde_json::to_vec(&self.draft)?)
    }
}

/// Delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteRequest {
    /// Entry to remove.
    pub no: EntryNo,
}

impl DeleteRequest {
    /// Creates a new delete request.
    pub fn new(no: EntryNo) -> Self {
        Self { no }
    }
}

/// Acknowledgement of a create, update or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    /// Whether the store accepted the change.
    pub success: bool,
    /// Optional human-readable message.
    pub message: Option<String>,
}

impl Ack {
    /// Creates a successful acknowledgement.
    pub fn success(message: Option<String>) -> Self {
        Self {
            success: true,
            message,
        }
    }

    /// Creates a rejection.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// JSON envelope of every store response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseBody {
    /// Records, for list responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<RawEntry>>,
    /// Message, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ResponseBody {
    /// A body with only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            data: None,
            message: Some(message.into()),
        }
    }

    /// A body with records.
    pub fn data(entries: Vec<RawEntry>) -> Self {
        Self {
            data: Some(entries),
            message: None,
        }
    }

    /// Encodes to JSON.
    pub fn encode(&self) -> ProtocolResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decodes from JSON. An empty body decodes as an empty envelope.
    pub fn decode(bytes: &[u8]) -> ProtocolResult<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        Ok(serde_json::from_slice(bytes)?)
    }
}
