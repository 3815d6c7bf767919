use std::path::PathBuf;
use thiserror::Error;

/// Library error type for indexing and database operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A required path argument was empty or otherwise unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A root directory or database file that must exist does not.
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),

    /// The file extension is not one of the supported image types.
    #[error("unsupported image type: {}", .0.display())]
    Unsupported(PathBuf),

    /// Keys and index columns are UTF-8, so such a file cannot be indexed.
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("failed to decode image")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode thumbnail")]
    Encode(#[source] image::ImageError),

    /// Open/create/write failure on a source, thumbnail, index or database file.
    #[error("I/O failure on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The directory walker could not read an entry.
    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    /// The persisted database exists but is not valid JSON for a database.
    #[error("malformed database file {}", path.display())]
    MalformedPersisted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The index file has a row that is not a record.
    #[error("malformed index file {} at line {line}: {reason}", path.display())]
    MalformedIndex {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// Neither the embedded nor a synthesized thumbnail could be produced.
    #[error("cannot generate a thumbnail for {}", path.display())]
    ThumbnailUnavailable {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
