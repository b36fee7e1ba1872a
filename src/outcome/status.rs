//! Structured RPC error.

use std::collections::BTreeMap;
use std::error::Error as StdError;

use thiserror::Error;

/// Boxed error type used at the service boundary.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Code logged for errors that carry no structured code.
pub const UNKNOWN_CODE: i32 = 500;

/// Application-declared error with an explicit code and message.
///
/// Handlers return this (directly, boxed, or as the source of another
/// error) to mark a failure as expected rather than an internal fault.
#[derive(Debug, Error)]
#[error("error: code = {code} message = {message}")]
pub struct Status {
    code: i32,
    message: String,
    metadata: BTreeMap<String, String>,
    #[source]
    cause: Option<BoxError>,
}

impl Status {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            metadata: BTreeMap::new(),
            cause: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(403, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(409, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(503, message)
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Attach the underlying cause.
    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Find a `Status` in `err` or anywhere in its source chain.
    pub fn find<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a Status> {
        let mut current = Some(err);
        while let Some(e) = current {
            if let Some(status) = e.downcast_ref::<Status>() {
                return Some(status);
            }
            current = e.source();
        }
        None
    }
}
