//! Error types for source parsing.

use thiserror::Error;

/// Error type for syntax tree operations.
#[derive(Debug, Error)]
pub enum SyntaxError {
    /// The grammar could not be loaded.
    #[error("grammar error: {message}")]
    Language {
        /// Error message.
        message: String,
    },

    /// The parser produced no tree.
    #[error("parser produced no syntax tree")]
    ParseFailed,

    /// The source contains a syntax error.
    #[error("malformed source at line {line}, column {column}: unexpected {kind}")]
    Malformed {
        /// 1-based line.
        line: usize,
        /// 1-based column.
        column: usize,
        /// Offending node kind.
        kind: String,
    },
}
