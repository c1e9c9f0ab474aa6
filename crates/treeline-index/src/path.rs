//! Repository-relative paths.
//!
//! A [`RepoPath`] is a non-empty list of segments. Valid segments:
//! - Must be non-empty
//! - Must not contain `/`
//! - Must not be `.` or `..`
//!
//! String paths are split on `/`; repeated and trailing slashes collapse
//! (`a//b/` is `a/b`). A leading `/` makes the path absolute, which is
//! rejected.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use crate::error::{IndexError, IndexResult};

/// Validated repository-relative path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepoPath {
    segments: Vec<String>,
}

impl RepoPath {
    /// Build a path from explicit segments, validating each one.
    pub fn from_segments<I, S>(segments: I) -> IndexResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        for segment in &segments {
            validate_segment(segment)?;
        }
        if segments.is_empty() {
            return Err(IndexError::EmptyPath);
        }
        Ok(Self { segments })
    }

    /// Parse a `/`-separated string.
    pub fn parse(path: &str) -> IndexResult<Self> {
        if path.starts_with('/') {
            return Err(IndexError::AbsolutePath(path.to_string()));
        }
        Self::from_segments(path.split('/').filter(|s| !s.is_empty()))
    }

    /// Convert a filesystem-style path made of normal components.
    ///
    /// Validated like [`RepoPath::parse`]: a `.` anywhere is an error, even
    /// where `Path::components` would silently skip it.
    pub fn from_std_path(path: &Path) -> IndexResult<Self> {
        if path.has_root() || path.is_absolute() {
            return Err(IndexError::AbsolutePath(path.display().to_string()));
        }
        if path
            .as_os_str()
            .to_string_lossy()
            .split(std::path::is_separator)
            .any(|segment| segment == ".")
        {
            return Err(IndexError::InvalidSegment(".".into()));
        }
        let mut segments = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(os) => {
                    let segment = os
                        .to_str()
                        .ok_or_else(|| IndexError::InvalidSegment(os.to_string_lossy().into()))?;
                    segments.push(segment.to_string());
                }
                Component::CurDir => return Err(IndexError::InvalidSegment(".".into())),
                Component::ParentDir => return Err(IndexError::InvalidSegment("..".into())),
                Component::RootDir | Component::Prefix(_) => {
                    return Err(IndexError::AbsolutePath(path.display().to_string()));
                }
            }
        }
        Self::from_segments(segments)
    }

    /// The path's segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments (always at least one).
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`; a `RepoPath` has at least one segment.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The final segment and the directory segments leading to it.
    pub fn split_last(&self) -> (&str, &[String]) {
        // from_segments rejects empty lists
        let (last, dirs) = self
            .segments
            .split_last()
            .expect("RepoPath has at least one segment");
        (last.as_str(), dirs)
    }

    /// The final segment.
    pub fn file_name(&self) -> &str {
        self.split_last().0
    }
}

pub(crate) fn validate_segment(segment: &str) -> IndexResult<()> {
    if segment.is_empty() || segment.contains('/') || segment == "." || segment == ".." {
        return Err(IndexError::InvalidSegment(segment.to_string()));
    }
    Ok(())
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl FromStr for RepoPath {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Anything that can name a location in the index.
pub trait IntoRepoPath {
    fn into_repo_path(self) -> IndexResult<RepoPath>;
}

impl IntoRepoPath for RepoPath {
    fn into_repo_path(self) -> IndexResult<RepoPath> {
        Ok(self)
    }
}

impl IntoRepoPath for &RepoPath {
    fn into_repo_path(self) -> IndexResult<RepoPath> {
        Ok(self.clone())
    }
}

impl IntoRepoPath for &str {
    fn into_repo_path(self) -> IndexResult<RepoPath> {
        RepoPath::parse(self)
    }
}

impl IntoRepoPath for &String {
    fn into_repo_path(self) -> IndexResult<RepoPath> {
        RepoPath::parse(self)
    }
}

impl IntoRepoPath for String {
    fn into_repo_path(self) -> IndexResult<RepoPath> {
        RepoPath::parse(&self)
    }
}

impl IntoRepoPath for &Path {
    fn into_repo_path(self) -> IndexResult<RepoPath> {
        RepoPath::from_std_path(self)
    }
}

impl IntoRepoPath for &PathBuf {
    fn into_repo_path(self) -> IndexResult<RepoPath> {
        RepoPath::from_std_path(self)
    }
}

impl IntoRepoPath for &[&str] {
    fn into_repo_path(self) -> IndexResult<RepoPath> {
        RepoPath::from_segments(self.iter().copied())
    }
}

impl<const N: usize> IntoRepoPath for [&str; N] {
    fn into_repo_path(self) -> IndexResult<RepoPath> {
        RepoPath::from_segments(self)
    }
}

impl IntoRepoPath for &[String] {
    fn into_repo_path(self) -> IndexResult<RepoPath> {
        RepoPath::from_segments(self.iter().cloned())
    }
}

impl IntoRepoPath for Vec<String> {
    fn into_repo_path(self) -> IndexResult<RepoPath> {
        RepoPath::from_segments(self)
    }
}
