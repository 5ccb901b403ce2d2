//! Events emitted during a search (the outbound half of the worker protocol)

use serde::{Deserialize, Serialize};

/// A single keyword occurrence in the input text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Absolute byte offset of the occurrence.
    pub index: usize,
    /// The matched substring as it appeared in the input.
    pub text: String,
    /// Length of the occurrence in bytes.
    pub length: usize,
}

/// Messages sent from the scan worker back to the caller.
///
/// For every request the stream is zero or more `progress` events followed by
/// exactly one terminal event: `complete` on success, `error` if the request
/// was rejected before scanning started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchEvent {
    /// One chunk finished. `matches` covers that chunk only, not cumulative.
    Progress { progress: f64, matches: Vec<Match> },

    /// All chunks finished. `matches` spans the whole input, ascending by
    /// offset.
    Complete { matches: Vec<Match> },

    /// The scan aborted without processing any chunks.
    Error { message: String },
}
