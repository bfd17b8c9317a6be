//! Readers and writers for graph and drawing files.
//!
//! - [`text`] — the plain `nodes:` / `edges:` graph format
//! - [`graphml`] — GraphML export with color and position data keys
//! - [`svg`] — SVG rendering of a finished drawing

pub mod graphml;
pub mod svg;
pub mod text;

use thiserror::Error;

/// Errors that can occur during file parsing.
#[derive(Error, Debug)]
pub enum ParseError {
    /// IO error reading the file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid file format or syntax.
    #[error("Parse error at line {line}: {message}")]
    InvalidFormat { line: usize, message: String },
}

impl ParseError {
    pub(crate) fn at(line: usize, message: impl Into<String>) -> Self {
        ParseError::InvalidFormat {
            line,
            message: message.into(),
        }
    }
}
