//! The working tree: a mutable, hierarchical staging area.
//!
//! Each [`Index`] node holds the files and subdirectories of one directory.
//! A name is never both a file and a subdirectory of the same node; every
//! mutating operation checks this before touching the tree, so a failed
//! call leaves the index unchanged.
//!
//! Removing a file never prunes directories that become empty. Empty
//! directories are dropped when a snapshot is taken.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{IndexError, IndexResult};
use crate::path::{validate_segment, IntoRepoPath};

/// One directory of the working tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Index {
    /// Files directly in this directory, keyed by name.
    files: BTreeMap<String, Vec<u8>>,
    /// Subdirectories, keyed by name.
    subtrees: BTreeMap<String, Index>,
}

impl Index {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Files directly in this directory.
    pub fn files(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.files
    }

    /// Subdirectories of this directory.
    pub fn subtrees(&self) -> &BTreeMap<String, Index> {
        &self.subtrees
    }

    /// Content of a file directly in this directory.
    pub fn file(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(Vec::as_slice)
    }

    /// A subdirectory of this directory.
    pub fn subtree(&self, name: &str) -> Option<&Index> {
        self.subtrees.get(name)
    }

    /// Returns `true` if this node has neither files nor subdirectories.
    ///
    /// A node whose subdirectories are all (recursively) empty is not empty
    /// by this definition.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.subtrees.is_empty()
    }

    /// Number of files in this directory and all subdirectories.
    pub fn file_count(&self) -> usize {
        self.files.len() + self.subtrees.values().map(Index::file_count).sum::<usize>()
    }

    // ---------------------------------------------------------------
    // Path operations
    // ---------------------------------------------------------------

    /// Look up a file by path.
    pub fn get(&self, path: impl IntoRepoPath) -> IndexResult<Option<&[u8]>> {
        let path = path.into_repo_path()?;
        let (name, dirs) = path.split_last();
        let mut node = self;
        for dir in dirs {
            match node.subtrees.get(dir) {
                Some(child) => node = child,
                None => return Ok(None),
            }
        }
        Ok(node.file(name))
    }

    /// Add or overwrite a file, creating intermediate directories as needed.
    ///
    /// Fails with [`IndexError::DirectoryBlockedByFile`] if a directory
    /// segment names an existing file, and with
    /// [`IndexError::FileBlockedByDirectory`] if the file name names an
    /// existing directory.
    pub fn add_file(
        &mut self,
        path: impl IntoRepoPath,
        content: impl Into<Vec<u8>>,
    ) -> IndexResult<()> {
        let path = path.into_repo_path()?;
        let (name, dirs) = path.split_last();

        // Validate along the existing part of the chain before mutating.
        let mut node: &Index = self;
        let mut walked = 0;
        for dir in dirs {
            if node.files.contains_key(dir) {
                return Err(IndexError::DirectoryBlockedByFile(
                    dirs[..=walked].join("/"),
                ));
            }
            match node.subtrees.get(dir) {
                Some(child) => {
                    node = child;
                    walked += 1;
                }
                None => break,
            }
        }
        if walked == dirs.len() && node.subtrees.contains_key(name) {
            return Err(IndexError::FileBlockedByDirectory(path.to_string()));
        }

        let mut node = self;
        for dir in dirs {
            node = node.subtrees.entry(dir.clone()).or_default();
        }
        node.files.insert(name.to_string(), content.into());
        Ok(())
    }

    /// Remove a file, returning its content.
    ///
    /// A path that does not name a file (missing file, missing directory,
    /// or a directory) is a no-op and returns `Ok(None)`. Directories left
    /// empty are kept.
    pub fn remove_file(&mut self, path: impl IntoRepoPath) -> IndexResult<Option<Vec<u8>>> {
        let path = path.into_repo_path()?;
        let (name, dirs) = path.split_last();
        let mut node = self;
        for dir in dirs {
            match node.subtrees.get_mut(dir) {
                Some(child) => node = child,
                None => return Ok(None),
            }
        }
        Ok(node.files.remove(name))
    }

    /// Remove every file and directory.
    pub fn clear(&mut self) {
        self.files.clear();
        self.subtrees.clear();
    }

    // ---------------------------------------------------------------
    // Single-level builders
    // ---------------------------------------------------------------

    /// Insert a file directly into this directory.
    pub fn insert_file(&mut self, name: &str, content: impl Into<Vec<u8>>) -> IndexResult<()> {
        validate_segment(name)?;
        if self.subtrees.contains_key(name) {
            return Err(IndexError::FileBlockedByDirectory(name.to_string()));
        }
        self.files.insert(name.to_string(), content.into());
        Ok(())
    }

    /// Insert (or replace) a whole subdirectory of this directory.
    pub fn insert_subtree(&mut self, name: &str, subtree: Index) -> IndexResult<()> {
        validate_segment(name)?;
        if self.files.contains_key(name) {
            return Err(IndexError::DirectoryBlockedByFile(name.to_string()));
        }
        self.subtrees.insert(name.to_string(), subtree);
        Ok(())
    }

    // ---------------------------------------------------------------
    // Inspection
    // ---------------------------------------------------------------

    /// Every file as a `(path, content)` pair; subdirectories before the
    /// files of their parent, names in byte order.
    pub fn walk_files(&self) -> Vec<(String, &[u8])> {
        let mut out = Vec::new();
        self.walk_into("", &mut out);
        out
    }

    fn walk_into<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a [u8])>) {
        for (name, subtree) in &self.subtrees {
            subtree.walk_into(&format!("{prefix}{name}/"), out);
        }
        for (name, content) in &self.files {
            out.push((format!("{prefix}{name}"), content.as_slice()));
        }
    }
}

/// Debug listing: one `File <path>:` header per file followed by its
/// content (lossy UTF-8).
impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (path, content) in self.walk_files() {
            writeln!(f, "File {path}:")?;
            writeln!(f, "{}", String::from_utf8_lossy(content))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn sample() -> Index {
        let mut idx = Index::new();
        idx.add_file("file1", "file1 contents").unwrap();
        idx.add_file("dir/nested/deep.txt", "deep").unwrap();
        idx.add_file("dir/top.txt", "top").unwrap();
        idx
    }

    #[test]
    fn new_index_is_empty() {
        let idx = Index::new();
        assert!(idx.is_empty());
        assert_eq!(idx.file_count(), 0);
        assert!(idx.walk_files().is_empty());
    }

    #[test]
    fn add_file_creates_intermediate_directories() {
        let idx = sample();
        assert_eq!(idx.files().len(), 1);
        assert_eq!(idx.subtrees().len(), 1);
        let dir = idx.subtree("dir").unwrap();
        assert_eq!(dir.file("top.txt"), Some(&b"top"[..]));
        assert_eq!(
            dir.subtree("nested").unwrap().file("deep.txt"),
            Some(&b"deep"[..])
        );
        assert_eq!(idx.file_count(), 3);
    }

    #[test]
    fn add_file_overwrites() {
        let mut idx = Index::new();
        idx.add_file("a.txt", "before").unwrap();
        idx.add_file("a.txt", "after").unwrap();
        assert_eq!(idx.get("a.txt").unwrap(), Some(&b"after"[..]));
        assert_eq!(idx.file_count(), 1);
    }

    #[test]
    fn add_file_accepts_std_paths_and_segments() {
        let mut idx = Index::new();
        idx.add_file(Path::new("a/b/c.txt"), "meow").unwrap();
        idx.add_file(["a", "a.txt"], "meow").unwrap();
        assert_eq!(idx.get("a/b/c.txt").unwrap(), Some(&b"meow"[..]));
        assert_eq!(idx.get(["a", "a.txt"]).unwrap(), Some(&b"meow"[..]));
    }

    #[test]
    fn add_file_rejects_bad_paths() {
        let mut idx = Index::new();
        assert_eq!(idx.add_file("", "x"), Err(IndexError::EmptyPath));
        assert!(matches!(
            idx.add_file("/abs/file", "x"),
            Err(IndexError::AbsolutePath(_))
        ));
        assert!(matches!(
            idx.add_file(Path::new("/abs/file"), "x"),
            Err(IndexError::AbsolutePath(_))
        ));
        assert!(idx.is_empty());
    }

    #[test]
    fn directory_blocked_by_file() {
        let mut idx = Index::new();
        idx.add_file("name", "contents").unwrap();
        assert_eq!(
            idx.add_file("name/file", "contents"),
            Err(IndexError::DirectoryBlockedByFile("name".into()))
        );
        assert_eq!(idx.file_count(), 1);
        assert!(idx.subtrees().is_empty());
    }

    #[test]
    fn directory_blocked_by_file_deep() {
        let mut idx = Index::new();
        idx.add_file("a/b", "file").unwrap();
        assert_eq!(
            idx.add_file("a/b/c/d", "x"),
            Err(IndexError::DirectoryBlockedByFile("a/b".into()))
        );
        assert_eq!(idx.subtree("a").unwrap().subtrees().len(), 0);
    }

    #[test]
    fn file_blocked_by_directory() {
        let mut idx = Index::new();
        idx.add_file("name/file", "contents").unwrap();
        assert_eq!(
            idx.add_file("name", "contents"),
            Err(IndexError::FileBlockedByDirectory("name".into()))
        );
        assert!(idx.files().is_empty());
    }

    #[test]
    fn failed_add_leaves_no_partial_directories() {
        let mut idx = Index::new();
        idx.add_file("x/y", "file").unwrap();
        // "x/y" is a file, so "x/y/z/w" fails before "x/y/z" is created.
        assert!(idx.add_file("x/y/z/w", "data").is_err());
        assert_eq!(idx.walk_files(), vec![("x/y".to_string(), &b"file"[..])]);
    }

    #[test]
    fn remove_file_returns_content() {
        let mut idx = sample();
        let removed = idx.remove_file("dir/top.txt").unwrap();
        assert_eq!(removed, Some(b"top".to_vec()));
        assert_eq!(idx.get("dir/top.txt").unwrap(), None);
        assert_eq!(idx.file_count(), 2);
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut idx = sample();
        let before = idx.clone();
        assert_eq!(idx.remove_file("nope.txt").unwrap(), None);
        assert_eq!(idx.remove_file("missing/dir/file").unwrap(), None);
        assert_eq!(idx.remove_file("file1/child").unwrap(), None);
        // A directory is not a file; nothing happens.
        assert_eq!(idx.remove_file("dir").unwrap(), None);
        assert_eq!(idx, before);
    }

    #[test]
    fn remove_rejects_bad_paths() {
        let mut idx = sample();
        assert_eq!(idx.remove_file(""), Err(IndexError::EmptyPath));
        assert!(matches!(idx.remove_file("/file1"), Err(IndexError::AbsolutePath(_))));
        assert_eq!(idx.file_count(), 3);
    }

    #[test]
    fn remove_keeps_empty_directories() {
        let mut idx = Index::new();
        idx.add_file("dir/only", "x").unwrap();
        idx.remove_file("dir/only").unwrap();
        let dir = idx.subtree("dir").expect("directory survives removal");
        assert!(dir.is_empty());
        assert!(!idx.is_empty());
        assert_eq!(idx.file_count(), 0);
    }

    #[test]
    fn clear_resets_everything() {
        let mut idx = sample();
        idx.clear();
        assert!(idx.is_empty());
        assert_eq!(idx, Index::new());
    }

    #[test]
    fn insert_builders_enforce_exclusion() {
        let mut idx = Index::new();
        idx.insert_file("f", "x").unwrap();
        idx.insert_subtree("d", Index::new()).unwrap();
        assert_eq!(
            idx.insert_subtree("f", Index::new()),
            Err(IndexError::DirectoryBlockedByFile("f".into()))
        );
        assert_eq!(
            idx.insert_file("d", "y"),
            Err(IndexError::FileBlockedByDirectory("d".into()))
        );
        assert_eq!(
            idx.insert_file("a/b", "y"),
            Err(IndexError::InvalidSegment("a/b".into()))
        );
    }

    #[test]
    fn walk_files_lists_subtrees_first() {
        let idx = sample();
        let paths: Vec<String> = idx.walk_files().into_iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["dir/nested/deep.txt", "dir/top.txt", "file1"]);
    }

    #[test]
    fn display_lists_every_file() {
        let mut idx = Index::new();
        idx.add_file("a/b.txt", "bee").unwrap();
        idx.add_file("c.txt", "sea").unwrap();
        assert_eq!(idx.to_string(), "File a/b.txt:\nbee\nFile c.txt:\nsea\n");
    }

    proptest::proptest! {
        #[test]
        fn add_is_all_or_nothing(
            paths in proptest::collection::vec("[ab]{1,2}(/[ab]{1,2}){0,2}", 1..16)
        ) {
            let mut idx = Index::new();
            for (n, path) in paths.iter().enumerate() {
                let before = idx.clone();
                let content = n.to_string();
                match idx.add_file(path.as_str(), content.as_str()) {
                    Ok(()) => {
                        proptest::prop_assert_eq!(
                            idx.get(path.as_str()).unwrap(),
                            Some(content.as_bytes())
                        );
                    }
                    Err(_) => proptest::prop_assert_eq!(&idx, &before),
                }
                proptest::prop_assert_eq!(idx.walk_files().len(), idx.file_count());
            }
        }
    }
}
