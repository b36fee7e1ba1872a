//! Payload stringification.
//!
//! The logging middleware only needs the string form of a request or reply.
//! Types opt in through [`Stringify`]; the wrappers cover the common cases
//! of serde-serializable messages, `Display` and `Debug` output, and
//! redacted payloads.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

/// Failure to produce the string form of a payload.
#[derive(Debug, Error)]
pub enum StringifyError {
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("payload cannot be rendered: {0}")]
    Unrenderable(String),
}

/// String form of a payload, used for the `args` and `reply` fields.
pub trait Stringify {
    fn stringify(&self) -> Result<String, StringifyError>;
}

impl Stringify for str {
    fn stringify(&self) -> Result<String, StringifyError> {
        Ok(self.to_string())
    }
}

impl Stringify for String {
    fn stringify(&self) -> Result<String, StringifyError> {
        Ok(self.clone())
    }
}

impl Stringify for () {
    fn stringify(&self) -> Result<String, StringifyError> {
        Ok(String::new())
    }
}

impl Stringify for serde_json::Value {
    fn stringify(&self) -> Result<String, StringifyError> {
        Ok(self.to_string())
    }
}

impl<T: Stringify + ?Sized> Stringify for &T {
    fn stringify(&self) -> Result<String, StringifyError> {
        (**self).stringify()
    }
}

impl<T: Stringify + ?Sized> Stringify for Box<T> {
    fn stringify(&self) -> Result<String, StringifyError> {
        (**self).stringify()
    }
}

impl<T: Stringify + ?Sized> Stringify for Arc<T> {
    fn stringify(&self) -> Result<String, StringifyError> {
        (**self).stringify()
    }
}

/// Payload rendered as compact JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct Json<T>(pub T);

impl<T: Serialize> Stringify for Json<T> {
    fn stringify(&self) -> Result<String, StringifyError> {
        Ok(serde_json::to_string(&self.0)?)
    }
}

/// Payload rendered with its `Debug` implementation.
#[derive(Clone, PartialEq)]
pub struct Debugged<T>(pub T);

impl<T: fmt::Debug> fmt::Debug for Debugged<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: fmt::Debug> Stringify for Debugged<T> {
    fn stringify(&self) -> Result<String, StringifyError> {
        Ok(format!("{:?}", self.0))
    }
}

/// Payload rendered with its `Display` implementation.
#[derive(Debug, Clone, PartialEq)]
pub struct Displayed<T>(pub T);

impl<T: fmt::Display> Stringify for Displayed<T> {
    fn stringify(&self) -> Result<String, StringifyError> {
        Ok(self.0.to_string())
    }
}

/// Payloads that know how to render themselves without secrets.
pub trait Redact {
    fn redact(&self) -> String;
}

/// Payload rendered through [`Redact`].
#[derive(Debug, Clone, PartialEq)]
pub struct Redacted<T>(pub T);

impl<T: Redact> Stringify for Redacted<T> {
    fn stringify(&self) -> Result<String, StringifyError> {
        Ok(self.0.redact())
    }
}
