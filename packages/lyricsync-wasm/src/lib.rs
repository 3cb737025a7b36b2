use serde::Serialize;
use wasm_bindgen::prelude::*;

use lyricsync::{LyricsError, MarkerFilter, TimedLyricLine};

#[derive(Serialize)]
struct BindingError {
    message: String,
    kind: &'static str,
}

fn error_to_binding_error(e: LyricsError) -> BindingError {
    let kind = match &e {
        LyricsError::Io { .. } => "io",
        LyricsError::Config(_) => "config",
        LyricsError::Pattern(_) => "pattern",
        LyricsError::Output(_) => "output",
        LyricsError::Usage(_) => "usage",
        LyricsError::InvalidNumber { .. } => "number",
    };
    BindingError {
        message: e.to_string(),
        kind,
    }
}

fn to_js_error(e: LyricsError) -> JsValue {
    let error = error_to_binding_error(e);
    JsValue::from_str(&serde_json::to_string(&error).unwrap_or_else(|_| error.message.clone()))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| to_js_error(e.into()))
}

/// The JS side uses -1 for "nothing active"
fn to_js_index(index: Option<usize>) -> i32 {
    index.map_or(-1, |i| i as i32)
}

/// Split tagged lyrics into sections, returned as a JSON array
#[wasm_bindgen]
pub fn parse_sections(lyrics: Option<String>) -> Result<String, JsValue> {
    to_json(&lyricsync::parse_sections(lyrics.as_deref()))
}

/// Estimated section index for a playback position, or -1
#[wasm_bindgen]
pub fn active_section_index(current_time: f64, duration: f64, section_count: usize) -> i32 {
    to_js_index(lyricsync::active_section_index(current_time, duration, section_count))
}

/// Parse LRC text into a JSON array of `{ time, text }`
#[wasm_bindgen]
pub fn parse_lrc(lrc_text: &str) -> Result<String, JsValue> {
    to_json(&lyricsync::parse_lrc(lrc_text))
}

/// Parse LRC text, also dropping the given cue words (JSON array of strings)
#[wasm_bindgen]
pub fn parse_lrc_with_markers(lrc_text: &str, extra_markers: &str) -> Result<String, JsValue> {
    let extra: Vec<String> = serde_json::from_str(extra_markers).map_err(|e| to_js_error(e.into()))?;
    let filter = MarkerFilter::with_extra(&extra).map_err(to_js_error)?;
    to_json(&lyricsync::parse_lrc_with(lrc_text, &filter))
}

/// Parse a whole LRC file, metadata included, as JSON
#[wasm_bindgen]
pub fn parse_lrc_document(lrc_text: &str) -> Result<String, JsValue> {
    to_json(&lyricsync::LrcDocument::parse(lrc_text))
}

#[wasm_bindgen]
pub fn clean_lrc(lrc_text: &str) -> String {
    lyricsync::clean_lrc(lrc_text)
}

/// Serialize a JSON array of `{ time, text }` back into LRC text
#[wasm_bindgen]
pub fn format_lrc(lines_json: &str) -> Result<String, JsValue> {
    let lines: Vec<TimedLyricLine> = serde_json::from_str(lines_json).map_err(|e| to_js_error(e.into()))?;
    Ok(lyricsync::format_lrc(&lines))
}

/// Parsed LRC lines kept on the Rust side for per-frame lookups.
#[wasm_bindgen]
pub struct LyricTrack {
    lines: Vec<TimedLyricLine>,
}

#[wasm_bindgen]
impl LyricTrack {
    /// Parse `lrc_text`, applying its `[offset:]` tag.
    #[wasm_bindgen(constructor)]
    pub fn new(lrc_text: &str) -> LyricTrack {
        let document = lyricsync::LrcDocument::parse(lrc_text);
        LyricTrack {
            lines: document.adjusted_lines(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Index of the line playing at `current_time`, or -1
    pub fn active_index(&self, current_time: f64) -> i32 {
        to_js_index(lyricsync::find_active_index(&self.lines, current_time))
    }

    pub fn line_text(&self, index: usize) -> Option<String> {
        self.lines.get(index).map(|line| line.text.clone())
    }

    pub fn line_time(&self, index: usize) -> Option<f64> {
        self.lines.get(index).map(|line| line.time)
    }

    pub fn to_json(&self) -> Result<String, JsValue> {
        to_json(&self.lines)
    }
}
