//! Error types for the px-to-viewport transform.

use std::path::PathBuf;

/// Result type alias for transform operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors. Everything else the transform meets is either silent
/// control flow or a [`Warning`](crate::transform::Warning).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `include` / `exclude` was neither a pattern nor a list of patterns.
    #[error("options.{option} should be a pattern or an array of patterns")]
    InvalidPatternOption { option: &'static str },

    /// A pattern string failed to compile.
    #[error("invalid pattern '{pattern}' in options.{option}: {source}")]
    InvalidPattern {
        option: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A base width that cannot be divided by.
    #[error("options.{option} must be a positive number, got {value}")]
    InvalidWidth { option: &'static str, value: f64 },

    /// More decimals than an `f64` carries.
    #[error("options.unitPrecision must be at most {max}, got {value}")]
    InvalidPrecision { value: u32, max: u32 },

    /// File I/O error.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be decoded.
    #[error("failed to parse config '{path}': {message}")]
    Config { path: PathBuf, message: String },

    /// lightningcss rejected the output during minification.
    #[error("failed to minify output: {0}")]
    Minify(String),
}

impl Error {
    /// Create a pattern compile error.
    pub fn invalid_pattern(option: &'static str, pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            option,
            pattern: pattern.into(),
            source,
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a config decoding error.
    pub fn config(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Config {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
