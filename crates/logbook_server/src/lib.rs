//! # Logbook Server
//!
//! Reference store for the logbook client.
//!
//! This crate provides:
//! - The list, create, update and delete endpoints
//! - Server-side search/status filtering and page slicing
//! - Required-field validation of drafts
//! - Optional JSON snapshot persistence
//!
//! # Architecture
//!
//! The server applies the same filter predicate as the client
//! (`logbook_core::filter_entries`), but the client never relies on that:
//! it re-filters whatever it receives.
//!
//! Requests and responses use the `HttpRequest`/`HttpResponse` types of
//! `logbook_sync_engine`, so the server plugs straight into a
//! `LoopbackClient` for tests and the CLI.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod config;
mod error;
mod handler;
mod server;
mod store;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult, STORAGE_FAILURE_MESSAGE};
pub use handler::{HandlerContext, RequestHandler};
pub use server::LogbookServer;
pub use store::{EntryStore, StoreSnapshot};
