use std::{path::PathBuf, sync::Arc};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop a parser from producing frames.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Script file could not be opened.
    #[error("cannot open script '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        source: Arc<std::io::Error>,
    },

    /// Reading from the underlying stream failed.
    #[error("{0}")]
    Io(Arc<std::io::Error>),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.into())
    }
}

/// Errors confined to a single script line.
///
/// The parser never propagates these: the offending record is skipped and
/// reported as a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Fewer fields than the tag requires.
    #[error("'{tag}' expects {expected} field(s), found {found}")]
    MissingField {
        tag: String,
        expected: usize,
        found: usize,
    },

    /// A field that must be numeric is not.
    #[error("'{tag}' field '{token}' is not a number")]
    Malformed { tag: String, token: String },

    /// `@` with a field count other than 1, 3 or 4.
    #[error("color takes 1, 3 or 4 fields, found {0}")]
    ColorArity(usize),

    /// `@ <index>` below zero.
    #[error("palette index '{0}' is negative")]
    NegativePaletteIndex(String),

    /// `@ <index>` outside the palette.
    #[error("palette index {index} out of range (palette has {len} colors)")]
    PaletteIndexOutOfRange { index: usize, len: usize },
}
