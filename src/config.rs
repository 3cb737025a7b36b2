//! # Settings
//!
//! Optional YAML file for the command-line tool:
//!
//! ```yaml
//! format: text          # json (default) or text
//! offset-ms: 250        # extra shift applied on top of the LRC [offset:] tag
//! extra-markers:        # more cue words to drop from LRC lyrics
//!   - Hook
//!   - Refrain
//! ```
//!
//! Unknown keys are rejected so typos surface as errors instead of being
//! silently ignored.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::LyricsError;
use crate::markers::MarkerFilter;

/// How the CLI prints results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

/// Raw settings for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawSettings {
    format: Option<OutputFormat>,
    offset_ms: Option<i64>,
    extra_markers: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    pub format: OutputFormat,
    pub offset_ms: i64,
    pub extra_markers: Vec<String>,
}

impl Settings {
    /// Parse settings from YAML text. An empty document gives the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, LyricsError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawSettings = serde_yaml::from_str(content)?;
        Ok(Self {
            format: raw.format.unwrap_or_default(),
            offset_ms: raw.offset_ms.unwrap_or(0),
            extra_markers: raw.extra_markers.unwrap_or_default(),
        })
    }

    /// Read settings from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LyricsError> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| LyricsError::io(path.display().to_string(), e))?;
        let settings = Self::from_yaml(&content)?;
        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Marker filter with the configured extra tokens.
    pub fn marker_filter(&self) -> Result<MarkerFilter, LyricsError> {
        MarkerFilter::with_extra(&self.extra_markers)
    }
}
