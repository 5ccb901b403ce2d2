//! Terminal rendering of search results
//!
//! Matches are grouped by line and printed with the matched text highlighted
//! in place, grep-style, followed by a summary of how much text was scanned.

use crate::scan_events::Match;
use colored::*;

/// Output verbosity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Quiet,   // Only errors
    Normal,  // Highlighted lines + summary
    Verbose, // Also byte offsets per match
}

/// Print the final match list against the original text.
pub fn print_human(text: &str, matches: &[Match], mode: OutputMode) {
    if mode == OutputMode::Quiet {
        return;
    }

    println!();
    if matches.is_empty() {
        println!("{}", "No matches found.".yellow());
        return;
    }

    let mut i = 0;
    while i < matches.len() {
        let (line_start, line_end) = line_bounds(text, matches[i].index);
        let line_no = line_number(text, matches[i].index);

        // Pull in every match that lands on the same line.
        let mut j = i;
        while j < matches.len() && matches[j].index < line_end {
            j += 1;
        }
        let on_line = &matches[i..j];

        println!(
            "{} {}",
            format!("{line_no:>6}:").dimmed(),
            highlight_line(text, line_start, line_end, on_line)
        );

        if mode == OutputMode::Verbose {
            for m in on_line {
                let col = m.index - line_start + 1;
                println!(
                    "        {} {}",
                    format!("{}:{}", line_no, col).dimmed(),
                    format!("\"{}\" at byte {}", m.text, m.index).dimmed()
                );
            }
        }

        i = j;
    }

    println!();
    let noun = if matches.len() == 1 { "match" } else { "matches" };
    println!(
        "{} {} {} in {} of text",
        "Found".green().bold(),
        matches.len(),
        noun,
        bytesize::to_string(text.len() as u64, true)
    );
}

/// Render one line with every match on it highlighted.
fn highlight_line(text: &str, line_start: usize, line_end: usize, matches: &[Match]) -> String {
    let mut out = String::new();
    let mut cursor = line_start;

    for m in matches {
        let end = (m.index + m.length).min(line_end);
        if m.index < cursor {
            continue;
        }
        out.push_str(&text[cursor..m.index]);
        out.push_str(&text[m.index..end].black().on_yellow().to_string());
        cursor = end;
    }

    out.push_str(&text[cursor..line_end]);
    out
}

/// 1-based line number of the byte at `index`.
fn line_number(text: &str, index: usize) -> usize {
    text[..index].bytes().filter(|&b| b == b'\n').count() + 1
}

/// Byte range of the full line containing `index`, newline excluded.
fn line_bounds(text: &str, index: usize) -> (usize, usize) {
    let start = text[..index].rfind('\n').map_or(0, |p| p + 1);
    let end = text[index..].find('\n').map_or(text.len(), |p| index + p);
    (start, end)
}
