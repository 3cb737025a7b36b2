//! # Error Types
//!
//! Parsing itself never fails: malformed lyric lines are dropped, not
//! reported. Errors only come from the edges around the parsers.
//!
//! ## Error Types
//! - `Io` - reading lyric or config files
//! - `Config` - invalid YAML settings
//! - `Pattern` - extra marker tokens that do not compile into a regex
//! - `Output` - JSON encoding of a result
//! - `Usage` - bad command-line arguments
//! - `InvalidNumber` - a time or duration argument that is not a number
//!
//! ## Usage
//! ```rust
//! use lyricsync::{LyricsError, Settings};
//!
//! match Settings::from_yaml("offset-ms: [1, 2]") {
//!     Ok(settings) => println!("offset {}", settings.offset_ms),
//!     Err(LyricsError::Config(e)) => eprintln!("bad config: {}", e),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LyricsError {
    /// Failure reading or writing a file.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid YAML or has the wrong shape.
    ///
    /// # Example
    /// ```
    /// # use lyricsync::Settings;
    /// let err = Settings::from_yaml("format: midi").unwrap_err();
    /// assert!(err.to_string().starts_with("Invalid config:"));
    /// ```
    #[error("Invalid config: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Extra structural-marker tokens produced an invalid pattern.
    #[error("Invalid marker pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Result could not be encoded as JSON.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    /// Command-line usage error.
    ///
    /// # Example
    /// ```
    /// # use lyricsync::LyricsError;
    /// let err = LyricsError::Usage("missing <file>".to_string());
    /// assert_eq!(err.to_string(), "Usage error: missing <file>");
    /// ```
    #[error("Usage error: {0}")]
    Usage(String),

    /// A numeric argument (seconds, duration) failed to parse.
    #[error("Invalid number for {name}: '{value}'")]
    InvalidNumber { name: String, value: String },
}

impl LyricsError {
    pub(crate) fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        LyricsError::Io {
            path: path.into(),
            source,
        }
    }
}
