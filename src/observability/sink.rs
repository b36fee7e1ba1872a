//! Log sinks for call records.
//!
//! # Responsibilities
//! - Define the `Logger` seam the middleware writes to
//! - Forward records to `tracing` as structured events
//! - Write records as newline-delimited JSON to any writer
//!
//! # Design Decisions
//! - Sinks are shared across concurrent calls and must be `Send + Sync`
//! - A sink never reports failure back to the call path

use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::observability::record::{CallRecord, Level};

/// Target used for `tracing` events emitted by [`TracingLogger`].
pub const ACCESS_TARGET: &str = "rpc_logging::access";

/// Destination for call records.
pub trait Logger: Send + Sync {
    fn log(&self, record: &CallRecord);
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn log(&self, record: &CallRecord) {
        (**self).log(record)
    }
}

impl<L: Logger + ?Sized> Logger for Box<L> {
    fn log(&self, record: &CallRecord) {
        (**self).log(record)
    }
}

/// Emits each record as a `tracing` event at the record's level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

macro_rules! access_event {
    ($level:expr, $r:expr) => {
        tracing::event!(
            target: ACCESS_TARGET,
            $level,
            kind = $r.kind,
            component = $r.component,
            side = %$r.side,
            endpoint = %$r.endpoint,
            operation = %$r.operation,
            args = %$r.args,
            reply = $r.reply.as_deref(),
            code = $r.code,
            reason = %$r.reason,
            stack = $r.stack.as_deref(),
            latency = $r.latency.as_secs_f64(),
            "rpc call"
        )
    };
}

impl Logger for TracingLogger {
    fn log(&self, record: &CallRecord) {
        match record.level {
            Level::Info => access_event!(tracing::Level::INFO, record),
            Level::Warn => access_event!(tracing::Level::WARN, record),
            Level::Error => access_event!(tracing::Level::ERROR, record),
        }
    }
}

/// Writes one JSON object per record, one per line.
pub struct JsonLogger<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLogger<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> Logger for JsonLogger<W> {
    fn log(&self, record: &CallRecord) {
        let line = match serde_json::to_string(record) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode call record");
                return;
            }
        };

        let mut writer = match self.writer.lock() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(writer, "{}", line) {
            tracing::warn!(error = %e, "Failed to write call record");
        }
    }
}
