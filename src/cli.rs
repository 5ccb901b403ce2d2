use clap::{ArgAction, Parser};
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use memmap2::Mmap;

use crate::output::{self, OutputMode};
use crate::progress;
use crate::scan_events::SearchEvent;
use crate::scanner::{SearchRequest, DEFAULT_CHUNK_SIZE};
use crate::worker;

#[derive(Parser)]
#[command(name = "textsweep")]
#[command(version)]
#[command(about = "Search large text files for keywords, chunk by chunk")]
#[command(long_about = "Textsweep scans a text file in fixed-size chunks and reports matches \
    as it goes, so large files show progress instead of a frozen terminal.\n\n\
    Keywords are matched literally (special characters are escaped) and \
    case-insensitively.\n\n\
    Examples:\n  \
    textsweep access.log error timeout        # Find either keyword\n  \
    textsweep notes.txt \"c++\" --chunk-size 64KB\n  \
    textsweep dump.txt secret --json          # Raw event stream as JSON lines")]
pub struct Cli {
    /// File to search
    pub file: PathBuf,

    /// Keywords to search for
    #[arg(required = true)]
    pub keywords: Vec<String>,

    /// Chunk size, e.g. 64KB or 1MB
    #[arg(long, value_name = "SIZE")]
    pub chunk_size: Option<String>,

    /// Emit the raw event stream as JSON lines instead of human output
    #[arg(long)]
    pub json: bool,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let mode = if self.quiet {
            OutputMode::Quiet
        } else if self.verbose >= 1 {
            OutputMode::Verbose
        } else {
            OutputMode::Normal
        };

        let chunk_size = match &self.chunk_size {
            Some(s) => parse_chunk_size(s)?,
            None => DEFAULT_CHUNK_SIZE,
        };

        let text = load_text(&self.file)?;
        let request = SearchRequest::new(text, self.keywords).with_chunk_size(chunk_size);

        if self.json {
            return run_json(request);
        }

        // The worker owns the request, so keep a copy of the text for
        // rendering matched lines afterwards.
        let display_text = if mode == OutputMode::Quiet {
            String::new()
        } else {
            request.text.clone()
        };

        let bar = if mode == OutputMode::Quiet {
            None
        } else {
            Some(progress::create_percent_bar("Scanning..."))
        };

        let handle = worker::spawn(request);
        let mut matches = Vec::new();
        let mut failure = None;

        for event in handle.events.iter() {
            match event {
                SearchEvent::Progress { progress, .. } => {
                    if let Some(ref bar) = bar {
                        bar.set_position(progress.round() as u64);
                    }
                }
                SearchEvent::Complete { matches: all } => matches = all,
                SearchEvent::Error { message } => failure = Some(message),
            }
        }
        handle.join();

        if let Some(ref bar) = bar {
            progress::finish_and_clear(bar);
        }
        if let Some(message) = failure {
            bail!("scan failed: {message}");
        }

        output::print_human(&display_text, &matches, mode);
        Ok(())
    }
}

/// Stream every event to stdout as one JSON object per line.
fn run_json(request: SearchRequest) -> Result<()> {
    let handle = worker::spawn(request);
    let mut failed = false;

    for event in handle.events.iter() {
        failed |= matches!(event, SearchEvent::Error { .. });
        println!("{}", serde_json::to_string(&event)?);
    }
    handle.join();

    if failed {
        bail!("scan reported an error");
    }
    Ok(())
}

/// Parse a human-readable size like "64KB" or "1MB" into bytes.
fn parse_chunk_size(s: &str) -> Result<usize> {
    let size: bytesize::ByteSize = s
        .parse()
        .map_err(|e: String| anyhow::anyhow!("invalid chunk size '{s}': {e}"))?;
    let bytes = size.as_u64() as usize;
    if bytes == 0 {
        bail!("chunk size must be at least 1 byte");
    }
    Ok(bytes)
}

/// Read the whole file as UTF-8, memory-mapping when possible.
fn load_text(path: &Path) -> Result<String> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;

    // Zero-length files cannot be mapped on every platform.
    let len = file
        .metadata()
        .with_context(|| format!("failed to stat {}", path.display()))?
        .len();
    if len == 0 {
        return Ok(String::new());
    }

    match unsafe { Mmap::map(&file) } {
        Ok(map) => {
            let text = std::str::from_utf8(&map)
                .with_context(|| format!("{} is not valid UTF-8", path.display()))?;
            Ok(text.to_string())
        }
        Err(_) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
    }
}
