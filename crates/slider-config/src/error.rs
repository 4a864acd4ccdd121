//! Error types for building and loading slider configurations.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors produced while reading form values or decoding a stored configuration.
pub enum Error {
    #[error("field `{field}` is required")]
    /// A required select or number field had no value.
    MissingField {
        /// Form field name.
        field: &'static str,
    },
    #[error("field `{field}` expects a number, got {value:?}")]
    /// A numeric field did not start with an integer.
    InvalidNumber {
        /// Form field name.
        field: &'static str,
        /// Raw field content, `None` when the field was absent.
        value: Option<String>,
    },
    #[error("field `{field}` must be between {min} and {max}, got {value}")]
    /// A numeric field parsed but lies outside the accepted range.
    OutOfRange {
        /// Form field name.
        field: &'static str,
        /// Parsed value.
        value: i64,
        /// Smallest accepted value.
        min: u32,
        /// Largest accepted value.
        max: u32,
    },
    #[error("field `{field}` must be one of {expected}, got {value:?}")]
    /// A select field held a value outside its choices.
    InvalidChoice {
        /// Form field name.
        field: &'static str,
        /// Raw field content.
        value: String,
        /// Comma separated list of accepted values.
        expected: String,
    },
    #[error("invalid slider configuration JSON: {message}")]
    /// The stored configuration is not valid JSON of the expected shape.
    Json {
        /// Decoder message.
        message: String,
    },
    #[error("{message}")]
    /// I/O failure while reading a form file.
    Read {
        /// Path that failed to read.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// RON syntax or shape error in a form file. The message carries the position.
    Parse {
        /// Path of the form file, when loaded from disk.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("failed to render form as RON: {message}")]
    /// A form snapshot could not be written out as RON.
    Serialize {
        /// Encoder message.
        message: String,
    },
}

impl Error {
    /// Name of the form field this error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { field }
            | Self::InvalidNumber { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::InvalidChoice { field, .. } => Some(*field),
            Self::Json { .. } | Self::Read { .. } | Self::Parse { .. } | Self::Serialize { .. } => {
                None
            }
        }
    }

    /// Render a human-friendly message including the file location when available.
    pub fn pretty(&self) -> String {
        match self {
            Self::Read { path, message } => match path {
                Some(p) => format!("Read error at {}: {}", p.display(), message),
                None => format!("Read error: {}", message),
            },
            Self::Parse { path, message } => match path {
                Some(p) => format!("Form parse error in {}\n{}", p.display(), message),
                None => format!("Form parse error\n{}", message),
            },
            other => other.to_string(),
        }
    }
}

/// Convenient result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
