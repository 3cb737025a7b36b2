//! # Section Parser
//!
//! Splits free-text lyrics into blocks introduced by `[Tag]` lines, the
//! layout produced by the lyric generator (`[Verse]`, `[Chorus]`, ...).
//!
//! ## Rules
//! - A line whose trimmed text is exactly `[something]` starts a new section
//! - Every other line, blank ones included, belongs to the current section
//! - Text before the first tag forms a section with an empty tag
//! - A section is kept if it has a tag or at least one line
//!
//! ## Example
//! ```rust
//! use lyricsync::parse_sections;
//!
//! let sections = parse_sections(Some("[Verse 1]\nLine A\n\n[Chorus]\nLine B"));
//! assert_eq!(sections.len(), 2);
//! assert_eq!(sections[0].tag, "Verse 1");
//! assert_eq!(sections[0].lines, vec!["Line A", ""]);
//! assert_eq!(sections[1].tag, "Chorus");
//! assert_eq!(sections[1].index, 1);
//! ```
//!
//! ## Active Section
//! Plain lyrics carry no timing, so [`active_section_index`] guesses the
//! current block by assuming every section lasts the same time. It is coarse
//! on purpose: no per-line data is needed. When LRC timing exists, use
//! [`crate::find_active_index`] instead.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::LyricSection;

static TAG_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(.+)\]$").expect("tag line pattern is valid"));

/// Accumulates lines for the section being read.
struct SectionBuilder {
    sections: Vec<LyricSection>,
    tag: String,
    lines: Vec<String>,
}

impl SectionBuilder {
    fn new() -> Self {
        Self {
            sections: Vec::new(),
            tag: String::new(),
            lines: Vec::new(),
        }
    }

    /// Emit the current section if it has a tag or content.
    fn flush(&mut self) {
        let tag = std::mem::take(&mut self.tag);
        let lines = std::mem::take(&mut self.lines);
        if tag.is_empty() && lines.is_empty() {
            return;
        }
        let index = self.sections.len();
        self.sections.push(LyricSection { tag, lines, index });
    }

    fn start(&mut self, tag: &str) {
        self.flush();
        self.tag = tag.to_string();
    }

    fn push_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn finish(mut self) -> Vec<LyricSection> {
        self.flush();
        self.sections
    }
}

/// Parse tagged lyrics into sections, in the order the tags appear.
///
/// `None` and `Some("")` both mean "no lyrics" and give an empty vector.
pub fn parse_sections(lyrics: Option<&str>) -> Vec<LyricSection> {
    let text = match lyrics {
        Some(text) if !text.is_empty() => text,
        _ => return Vec::new(),
    };

    let mut builder = SectionBuilder::new();
    for line in text.split('\n') {
        match TAG_LINE.captures(line.trim()) {
            Some(caps) => builder.start(&caps[1]),
            None => builder.push_line(line),
        }
    }

    let sections = builder.finish();
    log::debug!("parsed {} lyric section(s)", sections.len());
    sections
}

/// Estimate which section is playing from the elapsed fraction of the track.
///
/// Returns `None` when there are no sections or the duration is unknown
/// (`<= 0`). Otherwise `floor(current_time / duration * section_count)`,
/// clamped to a valid index.
///
/// ```
/// use lyricsync::active_section_index;
///
/// assert_eq!(active_section_index(30.0, 120.0, 4), Some(1));
/// assert_eq!(active_section_index(500.0, 120.0, 4), Some(3));
/// assert_eq!(active_section_index(10.0, 0.0, 4), None);
/// ```
pub fn active_section_index(current_time: f64, duration: f64, section_count: usize) -> Option<usize> {
    if section_count == 0 || duration.is_nan() || duration <= 0.0 {
        return None;
    }
    let last = (section_count - 1) as f64;
    let estimate = ((current_time / duration) * section_count as f64).floor();
    // NaN falls through both comparisons and is treated as the first section
    let clamped = if estimate > last {
        last
    } else if estimate >= 0.0 {
        estimate
    } else {
        0.0
    };
    Some(clamped as usize)
}

/// Write sections back out as tagged text.
///
/// Each tagged section contributes a `[tag]` line followed by its lines.
/// For input whose tag lines carry no extra whitespace this gives back the
/// text [`parse_sections`] was called on.
pub fn join_sections(sections: &[LyricSection]) -> String {
    let mut out: Vec<String> = Vec::new();
    for section in sections {
        if !section.tag.is_empty() {
            out.push(format!("[{}]", section.tag));
        }
        out.extend(section.lines.iter().cloned());
    }
    out.join("\n")
}
