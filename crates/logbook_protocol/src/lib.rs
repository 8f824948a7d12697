//! # Logbook Protocol
//!
//! Entry model and wire messages for the logbook client.
//!
//! This crate provides:
//! - `Entry` and `EntryDraft`, the record shapes
//! - Defensive normalization of raw remote payloads (`RawEntry`)
//! - Date parsing and display helpers
//! - Status classification for presentation
//! - Request/response messages and their JSON codec
//!
//! This is a pure protocol crate with no I/O operations.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod date;
mod entry;
mod error;
mod messages;
mod raw;
mod status;

pub use date::{display_date, parse_date, today};
pub use entry::{DraftField, Entry, EntryDraft, EntryNo, ValidationErrors};
pub use error::{ProtocolError, ProtocolResult};
pub use messages::{
    Ack, CreateRequest, DeleteRequest, ListRequest, ListResponse, ResponseBody, UpdateRequest,
    FETCH_ALL_LIMIT, STATUS_ALL,
};
pub use raw::RawEntry;
pub use status::{StatusKind, KNOWN_STATUSES};
