//! Outcome classification.

use std::error::Error as StdError;
use std::fmt::Write;

use crate::outcome::status::{Status, UNKNOWN_CODE};

/// Normalized result of a call as it is logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure {
        code: i32,
        reason: String,
        /// True when the error had no structured shape.
        internal: bool,
    },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    pub fn code(&self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::Failure { code, .. } => *code,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            Outcome::Success => "",
            Outcome::Failure { reason, .. } => reason,
        }
    }
}

/// Classify the error returned by a handler.
///
/// A `Status` anywhere in the source chain marks the failure as
/// application-declared. A `Status` with code 0 does not describe a failure
/// and is treated as unstructured.
pub fn classify(err: Option<&(dyn StdError + 'static)>) -> Outcome {
    let Some(err) = err else {
        return Outcome::Success;
    };

    match Status::find(err) {
        Some(status) if status.code() != 0 => Outcome::Failure {
            code: status.code(),
            reason: status.message().to_string(),
            internal: false,
        },
        _ => Outcome::Failure {
            code: UNKNOWN_CODE,
            reason: err.to_string(),
            internal: true,
        },
    }
}

/// Render `err` and its sources as `outer: inner: root`.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut out = err.to_string();
    let mut current = err.source();
    while let Some(e) = current {
        let _ = write!(out, ": {}", e);
        current = e.source();
    }
    out
}
