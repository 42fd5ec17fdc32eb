//! Boilerplate removal for archive plain-text books.
//!
//! Books in the archive are wrapped in a header (title block, producer
//! credits, license preamble) and a footer (the full license). This module
//! removes both, plus any embedded legalese block, in a single pass over the
//! document's lines.
//!
//! # Example
//!
//! ```rust
//! use gutentext_core::strip_headers_str;
//!
//! let text = "Title: Example\n*** START OF THE PROJECT GUTENBERG EBOOK ***\nCall me Ishmael.";
//! assert_eq!(strip_headers_str(text), "Call me Ishmael.");
//! ```

use std::ops::Range;

use crate::markers::{
    LEGALESE_END_MARKERS, LEGALESE_START_MARKERS, TEXT_END_MARKERS, TEXT_START_MARKERS, starts_with_any,
};

/// Line separator of the current platform.
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
/// Line separator of the current platform.
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Configuration for header and footer removal.
#[derive(Debug, Clone)]
pub struct StripConfig {
    /// Start markers are honoured while at most this many lines have been kept (default: 600).
    pub header_window: usize,
    /// End markers are honoured once at least this many lines have been kept (default: 100).
    pub footer_threshold: usize,
    /// Separator placed between kept lines, also trimmed from their ends.
    pub line_separator: String,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self { header_window: 600, footer_threshold: 100, line_separator: LINE_SEPARATOR.to_string() }
    }
}

/// Removes the archive header, footer and legalese blocks from `text`.
///
/// Accepts anything byte-like; the result is the kept lines joined with
/// [`LINE_SEPARATOR`].
pub fn strip_headers(text: impl AsRef<[u8]>) -> Vec<u8> {
    strip_headers_with_config(text, &StripConfig::default())
}

/// String flavour of [`strip_headers`].
pub fn strip_headers_str(text: &str) -> String {
    let config = StripConfig::default();
    let kept = kept_ranges(text.as_bytes(), &config);

    // Every range boundary sits next to an ASCII byte, so slicing cannot split a character.
    let lines: Vec<&str> = kept.into_iter().map(|range| &text[range]).collect();
    lines.join(config.line_separator.as_str())
}

/// Removes boilerplate using custom positional thresholds.
pub fn strip_headers_with_config(text: impl AsRef<[u8]>, config: &StripConfig) -> Vec<u8> {
    let text = text.as_ref();
    let kept = kept_ranges(text, config);

    let lines: Vec<&[u8]> = kept.into_iter().map(|range| &text[range]).collect();
    lines.join(config.line_separator.as_bytes())
}

/// Outcome of feeding one line to the [`Stripper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Stop,
}

/// Line-by-line state machine.
///
/// `kept_count` counts lines appended so far and is only used as a positional
/// gate: a header reset empties `kept` but leaves `kept_count` untouched.
#[derive(Debug)]
struct Stripper<'a> {
    config: &'a StripConfig,
    kept: Vec<Range<usize>>,
    kept_count: usize,
    footer_found: bool,
    ignore_section: bool,
}

impl<'a> Stripper<'a> {
    fn new(config: &'a StripConfig) -> Self {
        Self { config, kept: Vec::new(), kept_count: 0, footer_found: false, ignore_section: false }
    }

    fn feed(&mut self, text: &[u8], range: Range<usize>) -> Step {
        let line = &text[range.clone()];

        if self.kept_count <= self.config.header_window && starts_with_any(line, TEXT_START_MARKERS) {
            self.kept.clear();
            return Step::Continue;
        }

        if self.kept_count >= self.config.footer_threshold {
            if starts_with_any(line, TEXT_END_MARKERS) {
                self.footer_found = true;
            }
            if self.footer_found {
                return Step::Stop;
            }
        }

        if starts_with_any(line, LEGALESE_START_MARKERS) {
            self.ignore_section = true;
            return Step::Continue;
        }
        if starts_with_any(line, LEGALESE_END_MARKERS) {
            self.ignore_section = false;
            return Step::Continue;
        }

        if !self.ignore_section {
            self.kept.push(trim_separator(text, range, self.config.line_separator.as_bytes()));
            self.kept_count += 1;
        }

        Step::Continue
    }
}

fn kept_ranges(text: &[u8], config: &StripConfig) -> Vec<Range<usize>> {
    let mut stripper = Stripper::new(config);

    for range in line_ranges(text) {
        if stripper.feed(text, range) == Step::Stop {
            break;
        }
    }

    stripper.kept
}

/// Drops trailing bytes that belong to the separator's character set.
fn trim_separator(text: &[u8], range: Range<usize>, separator: &[u8]) -> Range<usize> {
    let mut end = range.end;
    while end > range.start && separator.contains(&text[end - 1]) {
        end -= 1;
    }
    range.start..end
}

/// Splits on `\n`, `\r` and `\r\n`, yielding line ranges without terminators.
///
/// A terminator at the very end does not produce a trailing empty line.
fn line_ranges(text: &[u8]) -> impl Iterator<Item = Range<usize>> + '_ {
    let mut pos = 0;

    std::iter::from_fn(move || {
        if pos >= text.len() {
            return None;
        }

        let start = pos;
        let mut end = start;
        while end < text.len() && text[end] != b'\n' && text[end] != b'\r' {
            end += 1;
        }

        pos = end;
        if pos < text.len() {
            pos += if text[pos] == b'\r' && text.get(pos + 1) == Some(&b'\n') { 2 } else { 1 };
        }

        Some(start..end)
    })
}
