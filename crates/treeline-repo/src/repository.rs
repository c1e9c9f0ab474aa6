//! The repository: snapshotting, commit history, reconstruction and search.
//!
//! # Invariants
//!
//! - Objects and commits are only ever added, never changed or removed.
//! - `history` grows by exactly one entry per [`Repo::commit`] call, even
//!   when the new commit's id equals an earlier one.
//! - A directory that holds no files after pruning its own empty
//!   subdirectories is not materialized as a tree. The root is the
//!   exception: an empty working tree commits to the canonical empty tree.

use std::collections::HashMap;

use tracing::debug;
use treeline_crypto::ContentHasher;
use treeline_index::Index;
use treeline_store::{Blob, Commit, InMemoryObjectStore, Object, ObjectKind, ObjectStore, Tree};
use treeline_types::ObjectId;

use crate::clock::{Clock, SystemClock};
use crate::config::RepoConfig;
use crate::error::{RepoError, RepoResult};

/// A repository: one object store, one commit history, one working tree.
pub struct Repo<S: ObjectStore = InMemoryObjectStore> {
    hasher: ContentHasher,
    store: S,
    clock: Box<dyn Clock>,
    /// All commits, keyed by id.
    commits: HashMap<ObjectId, Commit>,
    /// Commit ids in creation order.
    history: Vec<ObjectId>,
    working_tree: Index,
}

impl Repo<InMemoryObjectStore> {
    /// Create an empty in-memory repository using SHA-1 and the system clock.
    pub fn new() -> Self {
        Self::with_hasher(ContentHasher::default())
    }

    /// Create an empty in-memory repository using the given hasher.
    pub fn with_hasher(hasher: ContentHasher) -> Self {
        Self::with_store(InMemoryObjectStore::new(), hasher)
    }

    /// Create an empty in-memory repository from configuration.
    pub fn from_config(config: &RepoConfig) -> Self {
        Self::with_hasher(config.hasher())
    }
}

impl Default for Repo<InMemoryObjectStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ObjectStore> Repo<S> {
    /// Create a repository on top of an existing (empty) object store.
    pub fn with_store(store: S, hasher: ContentHasher) -> Self {
        Self {
            hasher,
            store,
            clock: Box::new(SystemClock),
            commits: HashMap::new(),
            history: Vec::new(),
            working_tree: Index::new(),
        }
    }

    /// Replace the clock commits take their timestamps from.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // ---- Views ----

    pub fn hasher(&self) -> &ContentHasher {
        &self.hasher
    }

    /// The object store holding every blob and tree.
    pub fn objects(&self) -> &S {
        &self.store
    }

    /// All commits, keyed by id.
    pub fn commits(&self) -> &HashMap<ObjectId, Commit> {
        &self.commits
    }

    /// Commit ids in creation order.
    pub fn history_ids(&self) -> &[ObjectId] {
        &self.history
    }

    /// Commits in creation order. An id recorded twice appears twice.
    pub fn history(&self) -> impl Iterator<Item = &Commit> + '_ {
        self.history.iter().filter_map(|id| self.commits.get(id))
    }

    /// The most recent commit.
    pub fn head(&self) -> Option<&Commit> {
        self.history.last().and_then(|id| self.commits.get(id))
    }

    pub fn find_commit(&self, id: &ObjectId) -> Option<&Commit> {
        self.commits.get(id)
    }

    pub fn working_tree(&self) -> &Index {
        &self.working_tree
    }

    pub fn working_tree_mut(&mut self) -> &mut Index {
        &mut self.working_tree
    }

    // ---- Snapshotting ----

    /// Snapshot an index into the store and return the root tree id.
    ///
    /// Never prunes the root: an index with no files yields the empty tree.
    pub fn write_tree(&self, index: &Index) -> RepoResult<ObjectId> {
        match self.create_tree(index, "")? {
            Some(id) => Ok(id),
            None => Ok(self.store.write(Tree::empty(&self.hasher).into())?),
        }
    }

    /// Recursively store an index; `None` means the directory pruned to
    /// nothing and no tree was written.
    fn create_tree(&self, index: &Index, dir: &str) -> RepoResult<Option<ObjectId>> {
        let mut entries: Vec<(String, ObjectId)> =
            Vec::with_capacity(index.files().len() + index.subtrees().len());

        for (name, content) in index.files() {
            let blob = Blob::new(&self.hasher, content.as_slice());
            let id = self.store.write(blob.into())?;
            entries.push((name.clone(), id));
        }

        for (name, subtree) in index.subtrees() {
            let path = format!("{dir}{name}/");
            match self.create_tree(subtree, &path)? {
                Some(id) => entries.push((name.clone(), id)),
                None => debug!(dir = %path, "pruned empty directory"),
            }
        }

        if entries.is_empty() {
            return Ok(None);
        }
        let tree = Tree::new(&self.hasher, entries);
        Ok(Some(self.store.write(tree.into())?))
    }

    // ---- Commit operations ----

    /// Snapshot the working tree and append a commit to history.
    ///
    /// The working tree is left as it is.
    pub fn commit(
        &mut self,
        author: impl Into<String>,
        message: impl Into<String>,
    ) -> RepoResult<Commit> {
        let timestamp = self.clock.now();
        let tree_id = self.write_tree(&self.working_tree)?;
        let commit = Commit::new(&self.hasher, tree_id, author, message, timestamp);

        self.commits
            .entry(commit.id().clone())
            .or_insert_with(|| commit.clone());
        self.history.push(commit.id().clone());

        debug!(
            commit = %commit.id().short_hex(),
            tree = %commit.tree_id().short_hex(),
            history_len = self.history.len(),
            "created commit"
        );
        Ok(commit)
    }

    // ---- History reconstruction ----

    /// Rebuild the working tree as it was when `commit` was made.
    ///
    /// The returned index is a fresh copy; changing it affects nothing in
    /// the repository.
    pub fn commit_contents(&self, commit: &Commit) -> RepoResult<Index> {
        let tree_id = commit.tree_id();
        let root = self
            .store
            .read(tree_id)?
            .ok_or_else(|| RepoError::TreeNotFound(tree_id.clone()))?;
        match root {
            Object::Tree(tree) => self.tree_contents(&tree),
            other => Err(RepoError::ObjectIsNotTree {
                id: tree_id.clone(),
                kind: other.kind(),
            }),
        }
    }

    /// [`Repo::commit_contents`] for a commit id.
    pub fn commit_contents_by_id(&self, id: &ObjectId) -> RepoResult<Index> {
        let commit = self
            .commits
            .get(id)
            .ok_or_else(|| RepoError::CommitNotFound(id.clone()))?;
        self.commit_contents(commit)
    }

    fn tree_contents(&self, tree: &Tree) -> RepoResult<Index> {
        let mut index = Index::new();
        for (name, id) in tree.iter() {
            let object = self
                .store
                .read(id)?
                .ok_or_else(|| RepoError::ObjectNotFound(id.clone()))?;
            match object {
                Object::Tree(subtree) => {
                    index.insert_subtree(name, self.tree_contents(&subtree)?)?;
                }
                Object::Blob(blob) => {
                    index.insert_file(name, blob.into_data())?;
                }
                Object::Commit(_) => {
                    debug!(entry = name, id = %id.short_hex(), "tree entry names a commit");
                    return Err(RepoError::ObjectIsNotTree {
                        id: id.clone(),
                        kind: ObjectKind::Commit,
                    });
                }
            }
        }
        Ok(index)
    }

    // ---- Search ----

    /// Commits whose author equals `author` exactly (case-sensitive), in
    /// history order.
    pub fn search_commits_by_author(&self, author: &str) -> Vec<&Commit> {
        self.history().filter(|c| c.author() == author).collect()
    }

    /// Commits whose message contains `text`, ignoring case, in history
    /// order.
    pub fn search_commits_by_message(&self, text: &str) -> Vec<&Commit> {
        let needle = text.to_lowercase();
        self.history()
            .filter(|c| c.message().to_lowercase().contains(&needle))
            .collect()
    }
}

impl<S: ObjectStore> std::fmt::Debug for Repo<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repo")
            .field("algorithm", &self.hasher.algorithm())
            .field("commits", &self.commits.len())
            .field("history", &self.history.len())
            .finish()
    }
}
