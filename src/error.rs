//! Error type shared by the readers and the scene importer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can make a load fail. Accessors never fail: an absent object or an
/// out-of-range index is a normal query outcome, see [`crate::handle`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[source] io::Error),

    #[error("Unrecognized file format: not a binary or ASCII FBX document")]
    UnrecognizedFormat,

    #[error("Unsupported FBX version {0}")]
    UnsupportedVersion(u32),

    #[error("File is larger than the configured limit ({size} > {limit} bytes)")]
    TooLarge { size: u64, limit: u64 },

    #[error("Unexpected end of file")]
    Truncated,

    #[error("Malformed binary record at offset {offset}: {message}")]
    Malformed { offset: u64, message: String },

    #[error("Syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("Failed to inflate array: {0}")]
    Decompress(String),

    #[error("Mesh '{mesh}': {attribute} index {index} is out of range")]
    BadIndex {
        mesh: String,
        attribute: &'static str,
        index: i64,
    },
}

impl Error {
    pub(crate) fn malformed(offset: u64, message: impl Into<String>) -> Error {
        Error::Malformed {
            offset,
            message: message.into(),
        }
    }

    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Error {
        Error::Syntax {
            line,
            message: message.into(),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => Error::Truncated,
            _ => Error::Io(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
