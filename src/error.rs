use std::path::PathBuf;

use crate::ObjectId;

/// error type for gitlite operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("repository not found at {0}")]
    NoRepo(PathBuf),

    #[error("repository already exists at {0}")]
    RepoExists(PathBuf),

    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    #[error("invalid object id: {0:?}")]
    InvalidObjectId(String),

    #[error("invalid object type: {0}")]
    InvalidObjectKind(String),

    #[error("bad object header: {0}")]
    Framing(String),

    #[error("zlib stream is invalid: {0}")]
    Decompress(#[source] std::io::Error),

    #[error("corrupt object {id}: {source}")]
    CorruptObject {
        id: ObjectId,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt object: hash mismatch for {0}")]
    HashMismatch(ObjectId),

    #[error("object {id} is a {actual}, expected {expected}")]
    UnexpectedKind {
        id: ObjectId,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("malformed tree: {0}")]
    TreeParse(String),

    #[error("invalid tree entry name: {0}")]
    InvalidEntryName(String),

    #[error("duplicate tree entry name: {0}")]
    DuplicateEntryName(String),

    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("config serialization error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// helper to wrap io errors with path context
pub trait IoResultExt<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| Error::Io {
            path: path.into(),
            source,
        })
    }
}
