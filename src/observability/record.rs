//! Call record emitted once per intercepted call.

use std::fmt;
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::transport::Side;

/// Value of the `component` field on every record.
pub const COMPONENT: &str = "logging";

/// Severity of a call record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Level> for tracing::Level {
    fn from(level: Level) -> Self {
        match level {
            Level::Info => tracing::Level::INFO,
            Level::Warn => tracing::Level::WARN,
            Level::Error => tracing::Level::ERROR,
        }
    }
}

/// Structured description of one completed call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallRecord {
    pub level: Level,
    pub kind: &'static str,
    pub component: &'static str,
    pub side: Side,
    pub endpoint: String,
    pub operation: String,
    pub args: String,
    /// Present only when the call succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    pub code: i32,
    pub reason: String,
    /// Present only for internal failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(serialize_with = "serialize_secs")]
    pub latency: Duration,
}

fn serialize_secs<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}
