//! File loaders. The engine fetches nothing itself; the host hands it paths
//! (or text) for the one payload snapshot a session runs on.

use std::fs;
use std::path::Path;

use cm_core::{RawMetrics, StateDirectory};

use crate::{payload, PayloadResult};

/// Read, parse, and validate an API payload file.
pub fn load_payload(path: &Path) -> PayloadResult<RawMetrics> {
    let text = fs::read_to_string(path)?;
    payload::parse_payload(&text)
}

/// Read and parse a state-names file into a directory.
pub fn load_state_directory(path: &Path) -> PayloadResult<StateDirectory> {
    let text = fs::read_to_string(path)?;
    payload::parse_state_directory(&text)
}
