//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Logging middleware produces:
//!     → record.rs (CallRecord, one per call)
//!     → sink.rs (Logger: tracing events or JSON lines)
//!
//! Consumers:
//!     → tracing subscriber installed by logging.rs (stdout, JSON or pretty)
//!     → any writer handed to JsonLogger
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - The sink is injected, never resolved from process-global state

pub mod logging;
pub mod record;
pub mod sink;

pub use record::{CallRecord, Level, COMPONENT};
pub use sink::{JsonLogger, Logger, TracingLogger, ACCESS_TARGET};
