//! Textsweep library crate
//!
//! This crate provides both the `textsweep` CLI binary and a library API for
//! programmatic use: compile a keyword pattern, scan text in fixed-size
//! chunks, and consume progress/complete events from a background worker.

pub mod cli;
pub mod error;
pub mod output;
pub mod pattern;
pub mod progress;
pub mod scan_events;
pub mod scanner;
pub mod worker;
