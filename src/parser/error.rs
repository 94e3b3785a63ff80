//! Parse error type.
//!
//! A `ParseError` is fatal to the enclosing parse operation: the whole parse
//! is abandoned and no partial codebase escapes. Every variant carries the
//! file name and 1-based line number it was detected at.

use thiserror::Error;

/// Error raised while reading signature text.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The header named a format version this crate does not support.
    #[error("{file}:{line}: unknown signature format version: {version}")]
    UnknownFormat {
        file: String,
        line: u32,
        version: String,
    },

    /// The text violates the signature grammar.
    #[error("{file}:{line}: {message}")]
    Syntax {
        file: String,
        line: u32,
        message: String,
    },

    /// A class or member was declared twice in one fragment with differing
    /// signatures. (Cross-fragment duplicates are legal and resolved by the
    /// merge engine.)
    #[error("{file}:{line}: duplicate declaration of `{name}` with a conflicting signature")]
    ConflictingDuplicate {
        file: String,
        line: u32,
        name: String,
    },

    /// The fragment could not be read from disk at all.
    #[error("failed to read {file}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// File the error was detected in.
    pub fn file(&self) -> &str {
        match self {
            Self::UnknownFormat { file, .. }
            | Self::Syntax { file, .. }
            | Self::ConflictingDuplicate { file, .. }
            | Self::Io { file, .. } => file,
        }
    }

    /// 1-based line number, `None` for I/O failures.
    pub fn line(&self) -> Option<u32> {
        match self {
            Self::UnknownFormat { line, .. }
            | Self::Syntax { line, .. }
            | Self::ConflictingDuplicate { line, .. } => Some(*line),
            Self::Io { .. } => None,
        }
    }
}
