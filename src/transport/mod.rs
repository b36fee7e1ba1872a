//! Transport description subsystem.
//!
//! # Data Flow
//! ```text
//! dispatch layer (server accept / client invoke)
//!     → builds a Transport (kind, endpoint, operation)
//!     → context.rs (CallContext holds server/client transporters)
//!     → Call<T> carries the context alongside the payload
//!     → middleware reads it via extract(ctx, side)
//! ```
//!
//! # Design Decisions
//! - Context is passed explicitly with each call, never looked up from ambient state
//! - Server and client transporters are stored separately; the direction is chosen by `Side`
//! - Transporters are immutable for the duration of one call

pub mod context;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use context::{extract, Call, CallContext, CallMetadata};

/// Transport category of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Http,
    Grpc,
}

impl Kind {
    /// Wire name of the transport kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Http => "http",
            Kind::Grpc => "grpc",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a call relative to this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Inbound call handled by this process.
    Server,
    /// Outbound call made by this process.
    Client,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Server => "server",
            Side::Client => "client",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call description of the transport carrying a call.
pub trait Transporter: Send + Sync + fmt::Debug {
    /// Transport category (HTTP, gRPC).
    fn kind(&self) -> Kind;

    /// Peer address or identity.
    fn endpoint(&self) -> &str;

    /// Invoked method, conventionally `/package.service/method`.
    fn operation(&self) -> &str;
}

/// Plain owned transporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transport {
    pub kind: Kind,
    pub endpoint: String,
    pub operation: String,
}

impl Transport {
    pub fn new(kind: Kind, endpoint: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            kind,
            endpoint: endpoint.into(),
            operation: operation.into(),
        }
    }
}

impl Transporter for Transport {
    fn kind(&self) -> Kind {
        self.kind
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn operation(&self) -> &str {
        &self.operation
    }
}
