//! Error types for proto source parsing.

use std::path::PathBuf;

use thiserror::Error;

use crate::ast::Position;

/// Errors raised while reading or parsing a proto source file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// The source file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// The file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The parser met a token it did not expect.
    #[error("{}:{pos}: expected {expected}, found {found}", path.display())]
    Unexpected {
        /// The file being parsed.
        path: PathBuf,
        /// Where the unexpected token starts.
        pos: Position,
        /// What the grammar required at this point.
        expected: String,
        /// What was actually present.
        found: String,
    },

    /// A string literal ran to the end of the file without a closing quote.
    #[error("{}:{pos}: unterminated string literal", path.display())]
    UnterminatedString {
        /// The file being parsed.
        path: PathBuf,
        /// Where the literal starts.
        pos: Position,
    },

    /// An integer literal could not be represented.
    #[error("{}:{pos}: invalid integer literal '{text}'", path.display())]
    InvalidNumber {
        /// The file being parsed.
        path: PathBuf,
        /// Where the literal starts.
        pos: Position,
        /// The offending literal text.
        text: String,
    },
}
