//! Event Sink Implementations
//!
//! - JsonEventSink: NDJSON output for CI/automation
//!
//! The human-readable console sink lives with the rest of the terminal UI.

mod json;

pub use json::{event_json, JsonEventSink};
