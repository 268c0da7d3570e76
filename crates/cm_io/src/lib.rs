//! cm_io — wire layer: parse and validate the per-session API payload into
//! `cm_core` entities.
//!
//! Validation posture: malformed structure is **fatal at load** — no partial
//! `RawMetrics` ever escapes this crate — while absent optional sections
//! degrade to empty collections per the payload contract. Errors carry a
//! JSON pointer to the offending node.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for payload loading and validation.
///
/// The `NotAnObject`/`BadCount` variants are the "malformed data" taxonomy:
/// structural failures in external JSON that must surface as one load-time
/// message, never as a crash mid-render.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Filesystem errors while reading a payload file.
    #[error("read error: {0}")]
    Read(String),

    /// The payload is not parseable JSON at all.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// A required section is missing.
    #[error("missing required field: {0}")]
    Missing(&'static str),

    /// A node that must be a JSON object is something else.
    #[error("expected object at {pointer}")]
    NotAnObject { pointer: String },

    /// A count that must be a non-negative integer is negative, fractional,
    /// or not a number.
    #[error("bad count at {pointer}: {found}")]
    BadCount { pointer: String, found: String },
}

pub type PayloadResult<T> = Result<T, PayloadError>;

impl From<std::io::Error> for PayloadError {
    fn from(e: std::io::Error) -> Self {
        PayloadError::Read(e.to_string())
    }
}

impl From<serde_json::Error> for PayloadError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json keeps line/column, not a pointer; root is the best hint.
        PayloadError::Json { pointer: "/".to_string(), msg: e.to_string() }
    }
}

pub mod loader;
pub mod payload;

pub use loader::{load_payload, load_state_directory};
pub use payload::{
    parse_payload, parse_state_directory, payload_from_value, totals_mismatches, TotalsMismatch,
};
