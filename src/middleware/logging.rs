//! Request/response logging middleware.
//!
//! # Responsibilities
//! - Time each call through the wrapped service
//! - Classify the result and pick the record level
//! - Summarize request and reply payloads within a bounded size
//! - Emit exactly one `CallRecord` per completed call
//!
//! # Design Decisions
//! - One layer type serves both directions; `Side` selects which transporter is read
//! - The wrapped result is returned untouched; logging problems only degrade the record
//! - Request summary and metadata are taken before the payload moves into the inner service

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use futures_util::ready;
use tower::{Layer, Service};

use crate::config::MiddlewareConfig;
use crate::middleware::payload::Stringify;
use crate::middleware::truncate::{truncate, DEFAULT_HALF_LENGTH};
use crate::observability::{CallRecord, Level, Logger, COMPONENT};
use crate::outcome::{classify, error_chain, BoxError, Outcome};
use crate::transport::{extract, Call, CallMetadata, Side};

/// Logging middleware for inbound calls.
pub fn server(logger: impl Logger + 'static) -> LoggingLayer {
    LoggingLayer::new(Side::Server, logger)
}

/// Logging middleware for outbound calls.
pub fn client(logger: impl Logger + 'static) -> LoggingLayer {
    LoggingLayer::new(Side::Client, logger)
}

/// Layer producing [`Logging`] services.
#[derive(Clone)]
pub struct LoggingLayer {
    side: Side,
    logger: Arc<dyn Logger>,
    half_length: usize,
}

impl LoggingLayer {
    pub fn new(side: Side, logger: impl Logger + 'static) -> Self {
        Self {
            side,
            logger: Arc::new(logger),
            half_length: DEFAULT_HALF_LENGTH,
        }
    }

    pub fn from_config(side: Side, logger: impl Logger + 'static, config: &MiddlewareConfig) -> Self {
        Self::new(side, logger).with_half_length(config.half_length)
    }

    /// Override the truncation half-length.
    pub fn with_half_length(mut self, half_length: usize) -> Self {
        self.half_length = half_length;
        self
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn half_length(&self) -> usize {
        self.half_length
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            side: self.side,
            logger: self.logger.clone(),
            half_length: self.half_length,
        }
    }
}

/// Service wrapper that logs every call.
#[derive(Clone)]
pub struct Logging<S> {
    inner: S,
    side: Side,
    logger: Arc<dyn Logger>,
    half_length: usize,
}

impl<S, Req> Service<Call<Req>> for Logging<S>
where
    S: Service<Call<Req>>,
    S::Error: Into<BoxError>,
    S::Response: Stringify,
    Req: Stringify,
{
    type Response = S::Response;
    type Error = BoxError;
    type Future = ResponseFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, call: Call<Req>) -> Self::Future {
        let pending = Pending {
            side: self.side,
            metadata: extract(&call.context, self.side).unwrap_or_default(),
            args: summarize(&call.payload, self.half_length),
            logger: self.logger.clone(),
            half_length: self.half_length,
            start: Instant::now(),
        };

        ResponseFuture {
            inner: Box::pin(self.inner.call(call)),
            pending: Some(pending),
        }
    }
}

/// Response future of [`Logging`].
///
/// Emits the call record once the inner future resolves.
pub struct ResponseFuture<F> {
    inner: Pin<Box<F>>,
    pending: Option<Pending>,
}

/// Everything the record needs that is known before the inner call.
struct Pending {
    side: Side,
    metadata: CallMetadata,
    args: String,
    logger: Arc<dyn Logger>,
    half_length: usize,
    start: Instant,
}

impl<F, T, E> Future for ResponseFuture<F>
where
    F: Future<Output = Result<T, E>>,
    E: Into<BoxError>,
    T: Stringify,
{
    type Output = Result<T, BoxError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let result = ready!(self.inner.as_mut().poll(cx)).map_err(Into::into);

        if let Some(pending) = self.pending.take() {
            let latency = pending.start.elapsed();
            let record = build_record(
                pending.side,
                pending.metadata,
                pending.args,
                &result,
                latency,
                pending.half_length,
            );
            pending.logger.log(&record);
        }

        Poll::Ready(result)
    }
}

/// Level a record is logged at for the given outcome.
pub fn level_for(outcome: &Outcome) -> Level {
    match outcome {
        Outcome::Success => Level::Info,
        Outcome::Failure { internal: false, .. } => Level::Warn,
        Outcome::Failure { internal: true, .. } => Level::Error,
    }
}

/// Truncated string form of a payload; empty if it cannot be rendered.
pub fn summarize<T: Stringify + ?Sized>(payload: &T, half_length: usize) -> String {
    match payload.stringify() {
        Ok(s) => truncate(&s, half_length),
        Err(e) => {
            tracing::debug!(error = %e, "Payload not logged");
            String::new()
        }
    }
}

fn build_record<R: Stringify>(
    side: Side,
    metadata: CallMetadata,
    args: String,
    result: &Result<R, BoxError>,
    latency: Duration,
    half_length: usize,
) -> CallRecord {
    let err = result
        .as_ref()
        .err()
        .map(|e| &**e as &(dyn StdError + 'static));
    let outcome = classify(err);

    let reply = match result {
        Ok(resp) if outcome.is_success() => Some(summarize(resp, half_length)),
        _ => None,
    };
    let stack = match (&outcome, err) {
        (Outcome::Failure { internal: true, .. }, Some(e)) => Some(error_chain(e)),
        _ => None,
    };

    CallRecord {
        level: level_for(&outcome),
        kind: metadata.kind_str(),
        component: COMPONENT,
        side,
        endpoint: metadata.endpoint,
        operation: metadata.operation,
        args,
        reply,
        code: outcome.code(),
        reason: outcome.reason().to_string(),
        stack,
        latency,
    }
}
