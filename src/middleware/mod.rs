//! Logging middleware subsystem.
//!
//! # Data Flow
//! ```text
//! Call<Req> { context, payload }
//!     → logging.rs (Logging<S> service)
//!         → transport::extract(context, side)   call identity
//!         → payload.rs + truncate.rs            bounded args summary
//!         → inner service
//!         → outcome::classify(error)            level, code, reason
//!         → payload.rs + truncate.rs            bounded reply summary (success only)
//!     → Logger::log(CallRecord)
//!     → Result<Resp, BoxError> returned unchanged
//! ```
//!
//! # Design Decisions
//! - Composition is plain tower: `ServiceBuilder::new().layer(server(logger))`
//! - Server and client differ only in the `Side` handed to the layer
//! - No per-call state is kept in the layer; it is cheap to clone and share

pub mod logging;
pub mod payload;
pub mod truncate;

pub use logging::{client, server, Logging, LoggingLayer, ResponseFuture};
pub use payload::{Debugged, Displayed, Json, Redact, Redacted, Stringify, StringifyError};
pub use truncate::{truncate, DEFAULT_HALF_LENGTH, MARKER};
