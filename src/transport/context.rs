//! Call context and metadata extraction.

use std::sync::Arc;

use crate::transport::{Kind, Side, Transporter};

/// Transport information attached to a single call.
///
/// A server dispatcher populates the server slot, an outbound client the
/// client slot. A call that is both (a server handler calling downstream)
/// can carry both.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    server: Option<Arc<dyn Transporter>>,
    client: Option<Arc<dyn Transporter>>,
}

impl CallContext {
    /// Empty context, as seen outside of a real call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for an inbound call.
    pub fn server(transporter: impl Transporter + 'static) -> Self {
        Self::new().with_server(Arc::new(transporter))
    }

    /// Context for an outbound call.
    pub fn client(transporter: impl Transporter + 'static) -> Self {
        Self::new().with_client(Arc::new(transporter))
    }

    pub fn with_server(mut self, transporter: Arc<dyn Transporter>) -> Self {
        self.server = Some(transporter);
        self
    }

    pub fn with_client(mut self, transporter: Arc<dyn Transporter>) -> Self {
        self.client = Some(transporter);
        self
    }

    /// Transporter registered for the given direction.
    pub fn transporter(&self, side: Side) -> Option<&Arc<dyn Transporter>> {
        match side {
            Side::Server => self.server.as_ref(),
            Side::Client => self.client.as_ref(),
        }
    }
}

/// A request payload together with its call context.
#[derive(Debug, Clone)]
pub struct Call<T> {
    pub context: CallContext,
    pub payload: T,
}

impl<T> Call<T> {
    pub fn new(context: CallContext, payload: T) -> Self {
        Self { context, payload }
    }

    pub fn into_payload(self) -> T {
        self.payload
    }
}

/// Identity of a call as it appears in a log record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallMetadata {
    pub kind: Option<Kind>,
    pub endpoint: String,
    pub operation: String,
}

impl CallMetadata {
    /// Kind as logged; empty when unknown.
    pub fn kind_str(&self) -> &'static str {
        self.kind.map(|k| k.as_str()).unwrap_or("")
    }
}

/// Read the call identity for `side` from `ctx`.
///
/// Returns `None` when the dispatch layer did not register a transporter
/// for that direction.
pub fn extract(ctx: &CallContext, side: Side) -> Option<CallMetadata> {
    ctx.transporter(side).map(|tr| CallMetadata {
        kind: Some(tr.kind()),
        endpoint: tr.endpoint().to_string(),
        operation: tr.operation().to_string(),
    })
}
