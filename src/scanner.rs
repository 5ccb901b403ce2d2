//! Chunked scan over a block of text
//!
//! Walks the input in fixed-size windows, collects the matches inside each
//! window, and reports progress after every window. Windows are scanned
//! independently, so an occurrence cut in half by the chunk grid is not
//! found. This is a known limitation of the design, not a bug to paper over.

use crate::error::ScanError;
use crate::pattern;
use crate::scan_events::Match;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Default window size: 1 MiB.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// One search invocation. Immutable once built.
///
/// Deserializes from the wire shape `{ text, keywords, chunkSize? }`, with
/// `chunkSize` defaulting to 1 MiB when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// The text to search.
    pub text: String,
    /// Keywords to look for, matched literally and case-insensitively.
    /// Each keyword must be a non-empty string.
    pub keywords: Vec<String>,
    /// Window size in bytes.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl SearchRequest {
    pub fn new(text: impl Into<String>, keywords: Vec<String>) -> Self {
        Self {
            text: text.into(),
            keywords,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Reject malformed requests before any scanning starts.
    ///
    /// An empty-string keyword is rejected rather than compiled: it would
    /// match with zero length at every position, including past the last
    /// byte of the text.
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.chunk_size == 0 {
            return Err(ScanError::InvalidChunkSize);
        }
        if self.keywords.iter().any(String::is_empty) {
            return Err(ScanError::EmptyKeyword);
        }
        Ok(())
    }
}

/// Cooperative cancellation flag, checked between windows.
///
/// Cloning shares the flag, so one clone can live with the caller while the
/// scan holds another.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// How a scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Every window was processed and the complete callback fired.
    Completed,
    /// The cancel token tripped between windows; no complete callback.
    Cancelled,
}

/// Run the scan, invoking `on_progress` after every window and `on_complete`
/// exactly once at the end.
///
/// The pattern is compiled once for the whole request. `regex` match
/// iteration carries no state across calls, so each window starts from a
/// fresh scan position.
pub fn scan<P, C>(request: &SearchRequest, on_progress: P, on_complete: C) -> Result<(), ScanError>
where
    P: FnMut(f64, Vec<Match>),
    C: FnOnce(Vec<Match>),
{
    scan_with_cancel(request, None, on_progress, on_complete).map(|_| ())
}

/// Like [`scan`], but checks `cancel` between windows. A cancelled scan
/// stops immediately and never invokes `on_complete`.
pub fn scan_with_cancel<P, C>(
    request: &SearchRequest,
    cancel: Option<&CancelToken>,
    mut on_progress: P,
    on_complete: C,
) -> Result<ScanOutcome, ScanError>
where
    P: FnMut(f64, Vec<Match>),
    C: FnOnce(Vec<Match>),
{
    request.validate()?;
    let pattern = pattern::compile(&request.keywords)?;
    let text = request.text.as_str();

    let windows = window_grid(text, request.chunk_size);
    let total = windows.len();
    let mut all_matches = Vec::new();

    for (processed, &(start, end)) in windows.iter().enumerate() {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Ok(ScanOutcome::Cancelled);
        }

        let found = pattern.find_in(&text[start..end], start);

        // total > 0 inside the loop; empty input skips straight to complete,
        // so the percentage never divides by zero.
        let progress = (processed + 1) as f64 / total as f64 * 100.0;
        on_progress(progress, found.clone());
        all_matches.extend(found);
    }

    on_complete(all_matches);
    Ok(ScanOutcome::Completed)
}

/// Compute the window grid: consecutive non-overlapping byte ranges of
/// `chunk_size`, the final window possibly shorter.
///
/// Each window end is snapped forward to the next UTF-8 character boundary
/// so every window is valid text. For ASCII input the window count is
/// exactly `ceil(text.len() / chunk_size)`.
fn window_grid(text: &str, chunk_size: usize) -> Vec<(usize, usize)> {
    let mut windows = Vec::new();
    let mut start = 0;

    while start < text.len() {
        let mut end = (start + chunk_size).min(text.len());
        while !text.is_char_boundary(end) {
            end += 1;
        }
        windows.push((start, end));
        start = end;
    }

    windows
}
