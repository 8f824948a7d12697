//! Transport layer abstraction for store operations.

use crate::error::{SyncError, SyncResult};
use logbook_protocol::{
    Ack, CreateRequest, DeleteRequest, ListRequest, ListResponse, UpdateRequest,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A transport carries the four store operations.
///
/// This trait abstracts the network layer, allowing for different
/// implementations (HTTP, in-process loopback, mock for testing).
pub trait LogbookTransport: Send + Sync {
    /// Fetches records matching the request.
    fn list(&self, request: &ListRequest) -> SyncResult<ListResponse>;

    /// Creates a record.
    fn create(&self, request: &CreateRequest) -> SyncResult<Ack>;

    /// Replaces a record.
    fn update(&self, request: &UpdateRequest) -> SyncResult<Ack>;

    /// Removes a record.
    fn delete(&self, request: &DeleteRequest) -> SyncResult<Ack>;
}

impl<T: LogbookTransport + ?Sized> LogbookTransport for Arc<T> {
    fn list(&self, request: &ListRequest) -> SyncResult<ListResponse> {
        (**self).list(request)
    }

    fn create(&self, request: &CreateRequest) -> SyncResult<Ack> {
        (**self).create(request)
    }

    fn update(&self, request: &UpdateRequest) -> SyncResult<Ack> {
        (**self).update(request)
    }

    fn delete(&self, request: &DeleteRequest) -> SyncResult<Ack> {
        (**self).delete(request)
    }
}

/// A request seen by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub enum TransportCall {
    /// List request.
    List(ListRequest),
    /// Create request.
    Create(CreateRequest),
    /// Update request.
    Update(UpdateRequest),
    /// Delete request.
    Delete(DeleteRequest),
}

/// A mock transport for testing.
#[derive(Debug)]
pub struct MockTransport {
    connected: AtomicBool,
    list_response: Mutex<Option<ListResponse>>,
    create_response: Mutex<Option<Ack>>,
    update_response: Mutex<Option<Ack>>,
    delete_response: Mutex<Option<Ack>>,
    calls: Mutex<Vec<TransportCall>>,
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self {
            connected: AtomicBool::new(true),
            list_response: Mutex::new(None),
            create_response: Mutex::new(None),
            update_response: Mutex::new(None),
            delete_response: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Sets the list response.
    pub fn set_list_response(&self, response: ListResponse) {
        *self.list_response.lock() = Some(response);
    }

    /// Removes the list response, so list calls fail.
    pub fn clear_list_response(&self) {
        *self.list_response.lock() = None;
    }

    /// Sets the create acknowledgement.
    pub fn set_create_response(&self, ack: Ack) {
        *self.create_response.lock() = Some(ack);
    }

    /// Sets the update acknowledgement.
    pub fn set_update_response(&self, ack: Ack) {
        *self.update_response.lock() = Some(ack);
    }

    /// Sets the delete acknowledgement.
    pub fn set_delete_response(&self, ack: Ack) {
        *self.delete_response.lock() = Some(ack);
    }

    /// Sets the connected state.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    /// Requests received so far, oldest first.
    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: TransportCall) -> SyncResult<()> {
        self.calls.lock().push(call);
        if self.connected.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(SyncError::NotConnected)
        }
    }

    fn ack(slot: &Mutex<Option<Ack>>, operation: &str) -> SyncResult<Ack> {
        slot.lock()
            .clone()
            .ok_or_else(|| SyncError::Protocol(format!("no mock {operation} response set")))
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl LogbookTransport for MockTransport {
    fn list(&self, request: &ListRequest) -> SyncResult<ListResponse> {
        self.record(TransportCall::List(request.clone()))?;
        self.list_response
            .lock()
            .clone()
            .ok_or_else(|| SyncError::Protocol("no mock list response set".into()))
    }

    fn create(&self, request: &CreateRequest) -> SyncResult<Ack> {
        self.record(TransportCall::Create(request.clone()))?;
        Self::ack(&self.create_response, "create")
    }

    fn update(&self, request: &UpdateRequest) -> SyncResult<Ack> {
        self.record(TransportCall::Update(request.clone()))?;
        Self::ack(&self.update_response, "update")
    }

    fn delete(&self, request: &DeleteRequest) -> SyncResult<Ack> {
        self.record(TransportCall::Delete(*request))?;
        Self::ack(&self.delete_response, "delete")
    }
}
