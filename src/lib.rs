pub mod config;
pub mod error;
pub mod locator;
pub mod lrc;
pub mod markers;
pub mod sections;
pub mod types;

pub use config::{OutputFormat, Settings};
pub use error::*;
pub use locator::find_active_index;
pub use lrc::{
    clean_lrc, clean_lrc_with, format_lrc, format_timestamp, parse_lrc, parse_lrc_metadata,
    parse_lrc_with, LrcDocument,
};
pub use markers::{is_structural_marker, MarkerFilter};
pub use sections::{active_section_index, join_sections, parse_sections};
pub use types::*;

/// Parse LRC text and return the line playing at `current_time`.
/// This is the usual per-tick entry point for a player.
pub fn active_line(lrc_text: &str, current_time: f64) -> Option<TimedLyricLine> {
    let lines = parse_lrc(lrc_text);
    find_active_index(&lines, current_time).map(|i| lines[i].clone())
}

/// Parse tagged lyrics and return the section estimated to be playing
pub fn active_section(lyrics: Option<&str>, current_time: f64, duration: f64) -> Option<LyricSection> {
    let sections = parse_sections(lyrics);
    active_section_index(current_time, duration, sections.len()).map(|i| sections[i].clone())
}
