//! Error types and handling for front matter parsing
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Absence of front matter is never an error: the parse pipeline reports it
//! through its return value. The variants here cover the failures that do
//! surface to callers: syntax errors inside a detected metadata block,
//! serialization failures, I/O at the load/dump boundary, and missing-key
//! lookups.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for front matter operations
#[derive(Error, Diagnostic, Debug)]
pub enum FrontmatterError {
    /// The metadata block was detected but is not valid syntax for its format.
    ///
    /// `reason` carries the underlying parser's message, including line and
    /// column where the format library provides them.
    #[error("Failed to decode {format} front matter: {reason}")]
    #[diagnostic(
        code(frontmatter::decode_failed),
        help("Fix the metadata block syntax, or remove the block entirely")
    )]
    DecodeFailed { format: &'static str, reason: String },

    /// Metadata could not be serialized in the requested format.
    #[error("Failed to encode metadata as {format}: {reason}")]
    #[diagnostic(code(frontmatter::encode_failed))]
    EncodeFailed { format: &'static str, reason: String },

    /// A metadata key lookup failed.
    #[error("Metadata key '{key}' not found")]
    #[diagnostic(
        code(frontmatter::missing_key),
        help("Use Post::get or Post::get_or for lookups that may be absent")
    )]
    MissingKey { key: String },

    /// A source file could not be read.
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(frontmatter::read_failed))]
    ReadFailed { path: String, reason: String },

    /// A destination file could not be written.
    #[error("Failed to write file: {path}")]
    #[diagnostic(code(frontmatter::write_failed))]
    WriteFailed { path: String, reason: String },

    /// An I/O error on a caller-supplied stream.
    #[error("IO error: {message}")]
    #[diagnostic(code(frontmatter::io_error))]
    IoError { message: String },
}

/// Creates a decode failed error
pub fn decode_failed(format: &'static str, reason: impl Into<String>) -> FrontmatterError {
    FrontmatterError::DecodeFailed {
        format,
        reason: reason.into(),
    }
}

/// Creates an encode failed error
pub fn encode_failed(format: &'static str, reason: impl Into<String>) -> FrontmatterError {
    FrontmatterError::EncodeFailed {
        format,
        reason: reason.into(),
    }
}

/// Creates a missing key error
pub fn missing_key(key: impl Into<String>) -> FrontmatterError {
    FrontmatterError::MissingKey { key: key.into() }
}

/// Creates a file read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> FrontmatterError {
    FrontmatterError::ReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> FrontmatterError {
    FrontmatterError::WriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

impl From<std::io::Error> for FrontmatterError {
    fn from(err: std::io::Error) -> Self {
        FrontmatterError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, FrontmatterError>;
