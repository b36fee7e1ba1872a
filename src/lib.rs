//! Request/response logging middleware for RPC services.
//!
//! Wraps any `tower::Service<Call<Req>>` so that every call, inbound or
//! outbound, produces one structured record with the call's identity,
//! latency, truncated payloads and normalized outcome.
//!
//! ```ignore
//! use rpc_logging::{server, TracingLogger};
//! use tower::ServiceBuilder;
//!
//! let svc = ServiceBuilder::new()
//!     .layer(server(TracingLogger))
//!     .service(handler);
//! ```

pub mod config;
pub mod middleware;
pub mod observability;
pub mod outcome;
pub mod transport;

pub use config::Config;
pub use middleware::{client, server, Logging, LoggingLayer, Stringify};
pub use observability::{CallRecord, JsonLogger, Level, Logger, TracingLogger};
pub use outcome::{classify, BoxError, Outcome, Status};
pub use transport::{Call, CallContext, Kind, Side, Transport, Transporter};
