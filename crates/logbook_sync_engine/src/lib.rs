//! # Logbook Sync Engine
//!
//! Remote synchronization for the logbook client.
//!
//! This crate provides:
//! - `SyncManager`, owner of the authoritative collection
//! - Refresh-after-mutation for create, update and delete
//! - A loading flag and a stale-response guard for overlapping refreshes
//! - User-visible notifications for every outcome
//! - Transport abstraction with HTTP, loopback and mock implementations
//! - `LogbookSession`, the manager paired with its view state
//!
//! ## Architecture
//!
//! The store is authoritative. The manager never patches its local copy:
//! every acknowledged mutation is followed by a full refresh, and every
//! refresh replaces the collection wholesale.
//!
//! ## Failure handling
//!
//! Transport failures and store rejections are both turned into a
//! notification (the store's message when it sent one) before the
//! operation returns. Nothing is retried.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod http;
mod manager;
mod notify;
mod session;
mod transport;

pub use config::SyncConfig;
pub use error::{SyncError, SyncResult};
pub use http::{
    HttpClient, HttpRequest, HttpResponse, HttpTransport, LoopbackClient, LoopbackServer, Method,
};
pub use manager::{ListQuery, SyncManager, SyncStats};
pub use notify::{Notification, NotificationLevel, NotificationLog, Notifier, TracingNotifier};
pub use session::{LogbookSession, RenderedView};
pub use transport::{LogbookTransport, MockTransport, TransportCall};
