//! Lyric value types
//!
//! Plain data handed to the rendering layer. Serialized in camelCase for the
//! JSON boundary, the same way playback data is.

use serde::{Deserialize, Serialize};

/// A block of lyrics introduced by a `[Tag]` line.
///
/// # Fields
/// - `tag`: label inside the brackets, empty for text before the first tag
/// - `lines`: raw lines of the block, blank lines included
/// - `index`: zero-based position among the sections of one parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricSection {
    pub tag: String,
    pub lines: Vec<String>,
    pub index: usize,
}

/// One sung line of an LRC file.
///
/// `time` is in seconds from the start of the track. `text` is trimmed and
/// never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedLyricLine {
    pub time: f64,
    pub text: String,
}

impl TimedLyricLine {
    pub fn new(time: f64, text: impl Into<String>) -> Self {
        Self {
            time,
            text: text.into(),
        }
    }
}

/// ID tags from the header of an LRC file.
///
/// `offset_ms` follows the LRC convention: a positive value makes lyrics
/// show up earlier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LrcMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub author: Option<String>,
    pub length: Option<String>,
    pub offset_ms: i64,
}

impl LrcMetadata {
    pub fn is_empty(&self) -> bool {
        *self == LrcMetadata::default()
    }
}
