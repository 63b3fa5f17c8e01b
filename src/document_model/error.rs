use super::marks::MarkId;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by buffer operations.
///
/// None of these are fatal: the command layer is expected to show the
/// message and carry on.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("Beginning of buffer")]
    BeginningOfBuffer,

    #[error("End of buffer")]
    EndOfBuffer,

    #[error("Position {position} is outside the buffer (size {size})")]
    OutOfRange { position: usize, size: usize },

    #[error("No file name")]
    NoFilename,

    #[error("Kill ring is empty")]
    EmptyKillRing,

    #[error("The mark is not set")]
    MarkNotSet,

    #[error("Mark {0:?} has been deleted")]
    UnknownMark(MarkId),

    #[error("Could not detect the encoding of {}", path.display())]
    EncodingDetection { path: PathBuf },

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("Cannot write files in {encoding}")]
    UnsupportedEncoding { encoding: &'static str },

    #[error("Text cannot be encoded as {encoding}")]
    Unencodable { encoding: &'static str },

    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error("Invalid regular expression: {0}")]
    InvalidRegex(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EditError {
    /// True for the errors that mean "would leave the buffer".
    pub fn is_boundary(&self) -> bool {
        matches!(
            self,
            EditError::BeginningOfBuffer | EditError::EndOfBuffer | EditError::OutOfRange { .. }
        )
    }
}

pub type EditResult<T> = Result<T, EditError>;
