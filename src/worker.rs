//! Background execution of a search request
//!
//! One inbound request, a stream of outbound [`SearchEvent`]s over an mpsc
//! channel, the scan running on its own thread so the caller never blocks.
//! Every spawn gets an independent compiled pattern and channel; concurrent
//! scans share nothing.

use crate::scan_events::SearchEvent;
use crate::scanner::{self, CancelToken, SearchRequest};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// Handle to a running scan: the event stream plus a cancellation switch.
pub struct ScanHandle {
    /// Outbound event stream. Ends after the terminal event, or without one
    /// if the scan was cancelled.
    pub events: Receiver<SearchEvent>,
    cancel: CancelToken,
    thread: JoinHandle<()>,
}

impl ScanHandle {
    /// Stop the scan at the next window boundary. Dropping the handle does
    /// not stop it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Block until the worker thread exits.
    pub fn join(self) {
        let ScanHandle { thread, .. } = self;
        let _ = thread.join();
    }
}

/// Spawn a scan on a dedicated thread and return a handle to it.
pub fn spawn(request: SearchRequest) -> ScanHandle {
    let (sender, events) = mpsc::channel();
    let cancel = CancelToken::new();
    let token = cancel.clone();
    let thread = thread::spawn(move || run(request, &token, &sender));

    ScanHandle {
        events,
        cancel,
        thread,
    }
}

/// Run a scan synchronously, pushing every event into `sender`.
///
/// Send failures are ignored: a caller that dropped its receiver has walked
/// away from the results, and the scan simply finishes quietly.
pub fn run(request: SearchRequest, cancel: &CancelToken, sender: &Sender<SearchEvent>) {
    let result = scanner::scan_with_cancel(
        &request,
        Some(cancel),
        |progress, matches| {
            let _ = sender.send(SearchEvent::Progress { progress, matches });
        },
        |matches| {
            let _ = sender.send(SearchEvent::Complete { matches });
        },
    );

    if let Err(e) = result {
        let _ = sender.send(SearchEvent::Error {
            message: e.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str, words: &[&str], chunk_size: usize) -> SearchRequest {
        SearchRequest::new(text, words.iter().map(|w| w.to_string()).collect())
            .with_chunk_size(chunk_size)
    }

    #[test]
    fn test_spawn_delivers_progress_then_complete() {
        let handle = spawn(request("aaaa", &["a"], 2));
        let events: Vec<SearchEvent> = handle.events.iter().collect();
        handle.join();

        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], SearchEvent::Progress { .. }));
        assert!(matches!(events[1], SearchEvent::Progress { .. }));
        match &events[2] {
            SearchEvent::Complete { matches } => {
                let indices: Vec<usize> = matches.iter().map(|m| m.index).collect();
                assert_eq!(indices, vec![0, 1, 2, 3]);
            }
            other => panic!("expected complete event, got {other:?}"),
        }
    }

    #[test]
    fn test_complete_is_the_only_terminal_event() {
        let handle = spawn(request("the cat sat", &["cat"], 1024));
        let events: Vec<SearchEvent> = handle.events.iter().collect();
        handle.join();

        let completes = events
            .iter()
            .filter(|e| matches!(e, SearchEvent::Complete { .. }))
            .count();
        assert_eq!(completes, 1);
        assert!(matches!(events.last(), Some(SearchEvent::Complete { .. })));
    }

    #[test]
    fn test_empty_text_yields_single_empty_complete() {
        let handle = spawn(request("", &["x"], 1024));
        let events: Vec<SearchEvent> = handle.events.iter().collect();
        handle.join();

        assert_eq!(
            events,
            vec![SearchEvent::Complete {
                matches: Vec::new()
            }]
        );
    }

    #[test]
    fn test_invalid_chunk_size_yields_single_error_event() {
        let handle = spawn(request("some text", &["some"], 0));
        let events: Vec<SearchEvent> = handle.events.iter().collect();
        handle.join();

        assert_eq!(events.len(), 1);
        match &events[0] {
            SearchEvent::Error { message } => {
                assert!(message.contains("chunk size"));
            }
            other => panic!("expected error event, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_string_keyword_yields_single_error_event() {
        let handle = spawn(request("abc", &[""], 1024));
        let events: Vec<SearchEvent> = handle.events.iter().collect();
        handle.join();

        assert_eq!(events.len(), 1);
        match &events[0] {
            SearchEvent::Error { message } => {
                assert!(message.contains("empty"));
            }
            other => panic!("expected error event, got {other:?}"),
        }
    }

    #[test]
    fn test_cancelled_scan_ends_stream_without_terminal_event() {
        let (sender, receiver) = mpsc::channel();
        let cancel = CancelToken::new();
        cancel.cancel();

        run(request("the cat sat", &["cat"], 4), &cancel, &sender);
        drop(sender);

        let events: Vec<SearchEvent> = receiver.iter().collect();
        assert!(events.is_empty());
    }
}
