//! # LRC Parser
//!
//! Reads time-stamped lyrics in the LRC format:
//!
//! ```text
//! [ti:Morning Song]
//! [offset:+200]
//! [00:12.30]First line
//! [00:15.120]Second line
//! ```
//!
//! ## Timestamps
//! `[MM:SS.ff]` or `[MM:SS.fff]`: two-digit minutes and seconds, then a
//! fraction that is centiseconds when it has two digits and milliseconds when
//! it has three. `[00:01.50]` and `[00:01.500]` are both 1.5 seconds.
//!
//! ## Leniency
//! Nothing here returns an error. Lines without a leading timestamp, lines
//! with empty text, and structural cues such as `Chorus` or `[主歌]` are left
//! out of the result. A missing lyric line is acceptable for display, a
//! failed parse is not.
//!
//! ## Entry Points
//! - [`parse_lrc`] - timed lines with the built-in marker filter
//! - [`parse_lrc_with`] - same, with a custom [`MarkerFilter`]
//! - [`parse_lrc_metadata`] - `[ti:]`, `[ar:]`, `[offset:]` and friends
//! - [`clean_lrc`] - filter LRC text and write it back out
//! - [`format_lrc`] - serialize timed lines

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::markers::MarkerFilter;
use crate::types::{LrcMetadata, TimedLyricLine};

static TIMESTAMP_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\[([0-9]{2}):([0-9]{2})\.([0-9]{2,3})\])(.*)$")
        .expect("timestamp pattern is valid")
});

static ID_TAG: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"^\[(ti|ar|al|by|length|offset):(.*)\]\s*$")
        .case_insensitive(true)
        .build()
        .expect("id tag pattern is valid")
});

/// A timestamped line before filtering.
struct RawLine<'a> {
    tag: &'a str,
    time: f64,
    text: &'a str,
}

fn split_timestamp(line: &str) -> Option<RawLine<'_>> {
    let caps = TIMESTAMP_LINE.captures(line)?;
    let minutes: u64 = caps[2].parse().ok()?;
    let seconds: u64 = caps[3].parse().ok()?;
    let fraction = &caps[4];
    let mut fraction_ms: u64 = fraction.parse().ok()?;
    if fraction.len() == 2 {
        // centiseconds
        fraction_ms *= 10;
    }

    let total_ms = minutes * 60_000 + seconds * 1_000 + fraction_ms;
    Some(RawLine {
        tag: caps.get(1)?.as_str(),
        time: total_ms as f64 / 1000.0,
        text: caps.get(5)?.as_str().trim(),
    })
}

/// Timestamped lines that carry a real lyric, in source order.
fn sung_lines<'a>(
    lrc_text: &'a str,
    filter: &'a MarkerFilter,
) -> impl Iterator<Item = RawLine<'a>> + 'a {
    lrc_text.lines().filter_map(move |line| {
        let Some(raw) = split_timestamp(line) else {
            log::trace!("skipping untimed line: {:?}", line);
            return None;
        };
        if raw.text.is_empty() {
            return None;
        }
        if filter.is_marker(raw.text) {
            log::trace!("dropping structural marker {:?} at {}s", raw.text, raw.time);
            return None;
        }
        Some(raw)
    })
}

/// Parse LRC text into timed lines using the built-in marker list.
///
/// ```
/// use lyricsync::parse_lrc;
///
/// let lines = parse_lrc("[00:01.50]Hello\n[00:03.000]Chorus\n[00:04.25]World");
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[0].time, 1.5);
/// assert_eq!(lines[1].text, "World");
/// ```
pub fn parse_lrc(lrc_text: &str) -> Vec<TimedLyricLine> {
    parse_lrc_with(lrc_text, &MarkerFilter::default())
}

/// Parse LRC text, dropping whatever `filter` considers a structural cue.
///
/// Order follows the source; lines are neither sorted nor de-duplicated.
pub fn parse_lrc_with(lrc_text: &str, filter: &MarkerFilter) -> Vec<TimedLyricLine> {
    let lines: Vec<TimedLyricLine> = sung_lines(lrc_text, filter)
        .map(|raw| TimedLyricLine::new(raw.time, raw.text))
        .collect();
    log::debug!("parsed {} timed lyric line(s)", lines.len());
    lines
}

/// Strip markers, blank lines and untimed lines from LRC text.
///
/// Kept lines are written as their original timestamp tag followed by the
/// trimmed text, one per line.
///
/// Only the strict `[MM:SS.ff]` / `[MM:SS.fff]` tags that [`parse_lrc`]
/// accepts are kept. Looser tags such as `[1:02.5]`, which the generation
/// backend's own cleanup lets through, are dropped here, so the output
/// always parses to the same lines as the input.
///
/// ```
/// use lyricsync::clean_lrc;
///
/// let cleaned = clean_lrc("[ti:Song]\n[00:01.00][Verse 1]\n[00:02.00]  Hi  \n[00:03.00]");
/// assert_eq!(cleaned, "[00:02.00]Hi");
/// ```
pub fn clean_lrc(lrc_text: &str) -> String {
    clean_lrc_with(lrc_text, &MarkerFilter::default())
}

pub fn clean_lrc_with(lrc_text: &str, filter: &MarkerFilter) -> String {
    sung_lines(lrc_text, filter)
        .map(|raw| format!("{}{}", raw.tag, raw.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Latest time a two-digit-minute timestamp can hold, `99:59.99`.
const MAX_TIMESTAMP_MS: u64 = 99 * 60_000 + 59_990;

/// Format seconds as an LRC timestamp body, `mm:ss.xx`.
///
/// Negative and NaN times become `00:00.00`. Times past `99:59.99`
/// are clamped to it so the result stays readable by [`parse_lrc`].
pub fn format_timestamp(time: f64) -> String {
    let ms = if time.is_nan() || time <= 0.0 {
        0
    } else {
        ((time * 1000.0).round() as u64).min(MAX_TIMESTAMP_MS)
    };
    let total_cs = ms / 10;
    let cs = total_cs % 100;
    let total_s = total_cs / 100;
    format!("{:02}:{:02}.{:02}", total_s / 60, total_s % 60, cs)
}

/// Serialize timed lines as LRC with centisecond timestamps.
///
/// ```
/// use lyricsync::{format_lrc, TimedLyricLine};
///
/// let lrc = format_lrc(&[TimedLyricLine::new(75.5, "Hello")]);
/// assert_eq!(lrc, "[01:15.50]Hello\n");
/// ```
pub fn format_lrc(lines: &[TimedLyricLine]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&format!("[{}]{}\n", format_timestamp(line.time), line.text));
    }
    out
}

/// Read the ID tags from the header of an LRC file.
///
/// Unknown tags and malformed offsets are ignored; empty values stay `None`.
pub fn parse_lrc_metadata(lrc_text: &str) -> LrcMetadata {
    let mut metadata = LrcMetadata::default();

    for line in lrc_text.lines() {
        let Some(caps) = ID_TAG.captures(line.trim()) else {
            continue;
        };
        let value = caps[2].trim();
        if value.is_empty() {
            continue;
        }
        match caps[1].to_ascii_lowercase().as_str() {
            "ti" => metadata.title = Some(value.to_string()),
            "ar" => metadata.artist = Some(value.to_string()),
            "al" => metadata.album = Some(value.to_string()),
            "by" => metadata.author = Some(value.to_string()),
            "length" => metadata.length = Some(value.to_string()),
            "offset" => match value.parse::<i64>() {
                Ok(offset) => metadata.offset_ms = offset,
                Err(_) => log::debug!("ignoring malformed offset {:?}", value),
            },
            _ => {}
        }
    }

    metadata
}

/// Header tags plus timed lines of one LRC file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LrcDocument {
    pub metadata: LrcMetadata,
    pub lines: Vec<TimedLyricLine>,
}

impl LrcDocument {
    pub fn parse(lrc_text: &str) -> Self {
        Self::parse_with(lrc_text, &MarkerFilter::default())
    }

    pub fn parse_with(lrc_text: &str, filter: &MarkerFilter) -> Self {
        Self {
            metadata: parse_lrc_metadata(lrc_text),
            lines: parse_lrc_with(lrc_text, filter),
        }
    }

    /// Lines shifted by `metadata.offset_ms`, never before zero.
    pub fn adjusted_lines(&self) -> Vec<TimedLyricLine> {
        self.shifted_lines(self.metadata.offset_ms)
    }

    /// Lines shifted earlier by `offset_ms` (later when negative).
    pub fn shifted_lines(&self, offset_ms: i64) -> Vec<TimedLyricLine> {
        if offset_ms == 0 {
            return self.lines.clone();
        }
        let shift = offset_ms as f64 / 1000.0;
        self.lines
            .iter()
            .map(|line| TimedLyricLine::new((line.time - shift).max(0.0), line.text.clone()))
            .collect()
    }
}
