//! Error types for the index crate.

/// Errors that can occur during index operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// The path has no segments.
    #[error("empty path")]
    EmptyPath,

    /// The path is rooted; only repository-relative paths are accepted.
    #[error("absolute path not allowed: {0}")]
    AbsolutePath(String),

    /// A segment is empty, contains a separator, or is `.`/`..`.
    #[error("invalid path segment: {0:?}")]
    InvalidSegment(String),

    /// A file was to be written where a directory already exists.
    #[error("file blocked by existing directory: {0}")]
    FileBlockedByDirectory(String),

    /// A directory was needed where a file already exists.
    #[error("directory blocked by existing file: {0}")]
    DirectoryBlockedByFile(String),
}

/// Convenience alias for index results.
pub type IndexResult<T> = Result<T, IndexError>;
