//! Error type shared by every stage of the codec.

use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, HuffError>;

#[derive(Debug, thiserror::Error)]
pub enum HuffError {
    /// A source file could not be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other I/O failure (writing artifacts, bit stream plumbing).
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// The serialized tree is truncated, has an unknown marker, trailing
    /// bytes, or nests deeper than any real tree can.
    #[error("malformed tree: {0}")]
    MalformedTree(String),

    /// The payload is missing its padding byte or the padding count is invalid.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The bit stream ended in the middle of a code. `decoded` bytes had been
    /// recovered before the cut; they are not returned.
    #[error("truncated payload: bit stream ended mid-code after {decoded} decoded bytes")]
    TruncatedPayload { decoded: usize },

    /// A byte has no code in the table it is being packed with.
    #[error("byte {0:#04x} has no code in the table")]
    UnknownSymbol(u8),
}

impl HuffError {
    pub(crate) fn input(path: impl Into<PathBuf>, source: io::Error) -> Self {
        HuffError::InputUnavailable {
            path: path.into(),
            source,
        }
    }
}
