//! # Structural Marker Filter
//!
//! Many LRC sources embed song-structure cues ("Chorus", "Verse 2", "[副歌]")
//! as if they were sung lines. This module decides whether a line of LRC text
//! is such a cue so the parser can drop it.
//!
//! ## Matching Rules
//! - Case-insensitive
//! - Optionally wrapped in `[` `]`
//! - Optionally followed by a number (`Verse 2`, `Chorus 1`)
//! - The whole trimmed text must be the marker; `Chorus of angels` is a lyric
//!
//! ## Built-in Tokens
//! | English | Chinese |
//! |---------|---------|
//! | Intro | 前奏 |
//! | Verse N | 主歌, 第一段, 第二段, 第三段 |
//! | Pre-Chorus | 副歌前, 预副歌, 导歌 |
//! | Chorus | 副歌 |
//! | Bridge | 桥段, 过桥, 过渡 |
//! | Instrumental Break | 间奏 |
//! | Outro | 尾声, 结尾, 尾奏 |
//!
//! ## Extending
//! New languages or house conventions are extra tokens, not new code:
//! ```rust
//! use lyricsync::MarkerFilter;
//!
//! let filter = MarkerFilter::with_extra(&["Hook".to_string()])?;
//! assert!(filter.is_marker("[Hook 2]"));
//! assert!(filter.is_marker("chorus"));
//! # Ok::<(), lyricsync::LyricsError>(())
//! ```

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::error::LyricsError;

const BUILTIN_TOKENS: &str = r"Intro|Verse\s*\d*|Pre-?Chorus|Chorus|Bridge|Outro|Instrumental\s*Break|前奏|主歌|副歌前?|预副歌|导歌|桥段|过桥|过渡|间奏|尾声|结尾|尾奏|第[一二三]段";

static BUILTIN: Lazy<Regex> = Lazy::new(|| {
    build_pattern(BUILTIN_TOKENS).expect("built-in marker pattern is valid")
});

fn build_pattern(tokens: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&format!(r"^\[?\s*(?:{})\s*\d*\s*\]?\s*$", tokens))
        .case_insensitive(true)
        .build()
}

/// Decides whether LRC text is a structural cue rather than a lyric.
#[derive(Debug, Clone)]
pub struct MarkerFilter {
    pattern: Regex,
}

impl Default for MarkerFilter {
    fn default() -> Self {
        Self {
            pattern: BUILTIN.clone(),
        }
    }
}

impl MarkerFilter {
    /// Built-in tokens plus `extra`, each matched literally.
    ///
    /// Blank entries are ignored. Returns `LyricsError::Pattern` only if the
    /// combined pattern exceeds the regex size limits.
    pub fn with_extra(extra: &[String]) -> Result<Self, LyricsError> {
        let escaped: Vec<String> = extra
            .iter()
            .map(|token| token.trim())
            .filter(|token| !token.is_empty())
            .map(regex::escape)
            .collect();

        if escaped.is_empty() {
            return Ok(Self::default());
        }

        log::debug!("marker filter extended with {} token(s)", escaped.len());
        let tokens = format!("{}|{}", BUILTIN_TOKENS, escaped.join("|"));
        Ok(Self {
            pattern: build_pattern(&tokens)?,
        })
    }

    /// True if `text` is only a section cue.
    pub fn is_marker(&self, text: &str) -> bool {
        self.pattern.is_match(text.trim())
    }
}

/// Check `text` against the built-in marker list.
pub fn is_structural_marker(text: &str) -> bool {
    BUILTIN.is_match(text.trim())
}
