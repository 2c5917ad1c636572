use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum SplitMergeError {
    /// Bad part count, part size, chunk size or an empty merge list.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("file is empty: {}", .0.display())]
    EmptyFile(PathBuf),

    /// Requested partitioning is finer than one byte per part.
    #[error("too many parts, or file too small: {0}")]
    TooManyParts(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SplitMergeError>;

/// `with_context` for plain io results, producing [`SplitMergeError::Io`].
pub trait IoContext<T> {
    fn io_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn io_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|source| SplitMergeError::Io { context: f().into(), source })
    }
}
