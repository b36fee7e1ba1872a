//! Call outcome subsystem.
//!
//! # Data Flow
//! ```text
//! handler Result<_, BoxError>
//!     → classify.rs (Success | Failure { code, reason, internal })
//!         - Status in source chain → application failure
//!         - anything else          → internal failure, UNKNOWN_CODE
//!     → middleware picks log level and fields from the Outcome
//! ```
//!
//! # Design Decisions
//! - Structured errors are detected by downcasting, not by string matching
//! - Classification is total; it never produces an error of its own

pub mod classify;
pub mod status;

pub use classify::{classify, error_chain, Outcome};
pub use status::{BoxError, Status, UNKNOWN_CODE};
