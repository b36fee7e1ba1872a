//! Shared utilities for integration tests.

use std::sync::{Arc, Mutex};

use rpc_logging::{CallContext, CallRecord, Kind, Logger, Transport};

/// Logger that keeps every record in memory.
#[derive(Clone, Default)]
pub struct CaptureLogger {
    records: Arc<Mutex<Vec<CallRecord>>>,
}

impl CaptureLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<CallRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl Logger for CaptureLogger {
    fn log(&self, record: &CallRecord) {
        self.records.lock().unwrap().push(record.clone());
    }
}

/// HTTP transporter used throughout the tests.
#[allow(dead_code)]
pub fn http_transport() -> Transport {
    Transport::new(Kind::Http, "endpoint", "/package.service/method")
}

#[allow(dead_code)]
pub fn http_server_context() -> CallContext {
    CallContext::server(http_transport())
}

#[allow(dead_code)]
pub fn http_client_context() -> CallContext {
    CallContext::client(http_transport())
}
