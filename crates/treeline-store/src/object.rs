use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use treeline_crypto::ContentHasher;
use treeline_types::{ObjectId, Timestamp};

/// The kind of object stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Raw file content.
    Blob,
    /// Directory listing: entries mapping names to object ids.
    Tree,
    /// Snapshot record pointing at a root tree.
    Commit,
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blob => write!(f, "blob"),
            Self::Tree => write!(f, "tree"),
            Self::Commit => write!(f, "commit"),
        }
    }
}

// ---------------------------------------------------------------------------
// Blob
// ---------------------------------------------------------------------------

/// Raw content object (analogous to git blob).
///
/// `id = H(data)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    id: ObjectId,
    data: Vec<u8>,
}

impl Blob {
    /// Create a new blob from raw bytes.
    pub fn new(hasher: &ContentHasher, data: impl Into<Vec<u8>>) -> Self {
        let data = data.into();
        let id = Self::compute_id(hasher, &data);
        Self { id, data }
    }

    fn compute_id(hasher: &ContentHasher, data: &[u8]) -> ObjectId {
        hasher.hash(data)
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

/// Directory listing object (analogous to git tree).
///
/// Entries are kept in a `BTreeMap`, i.e. sorted by name in byte order, so
/// the id does not depend on the order entries were added:
///
/// `id = H(hex(H(name_0)) ++ hex(child_0) ++ hex(H(name_1)) ++ hex(child_1) ...)`
///
/// The empty tree hashes the empty string and is the canonical empty
/// directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    id: ObjectId,
    entries: BTreeMap<String, ObjectId>,
}

impl Tree {
    /// Create a tree from `(name, child id)` pairs in any order.
    ///
    /// A name given twice keeps the last child id.
    pub fn new<I, N>(hasher: &ContentHasher, entries: I) -> Self
    where
        I: IntoIterator<Item = (N, ObjectId)>,
        N: Into<String>,
    {
        let entries: BTreeMap<String, ObjectId> = entries
            .into_iter()
            .map(|(name, id)| (name.into(), id))
            .collect();
        let id = Self::compute_id(hasher, &entries);
        Self { id, entries }
    }

    /// Create an empty tree.
    pub fn empty(hasher: &ContentHasher) -> Self {
        Self::new(hasher, std::iter::empty::<(String, ObjectId)>())
    }

    fn compute_id(hasher: &ContentHasher, entries: &BTreeMap<String, ObjectId>) -> ObjectId {
        let mut buf = String::new();
        for (name, child) in entries {
            buf.push_str(&hasher.hash_str(name).to_hex());
            buf.push_str(&child.to_hex());
        }
        hasher.hash_str(&buf)
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    /// Look up an entry by name.
    pub fn get(&self, name: &str) -> Option<&ObjectId> {
        self.entries.get(name)
    }

    /// Iterate entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ObjectId)> {
        self.entries.iter().map(|(name, id)| (name.as_str(), id))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Commit
// ---------------------------------------------------------------------------

/// Snapshot record: a root tree plus authorship metadata.
///
/// `id = H(hex(tree_id) ++ hex(H(author)) ++ hex(H(message)) ++ hex(H(timestamp)))`
/// where the timestamp enters in its canonical string form. Two commits with
/// the same four fields share an id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    id: ObjectId,
    tree_id: ObjectId,
    author: String,
    message: String,
    timestamp: Timestamp,
}

impl Commit {
    pub fn new(
        hasher: &ContentHasher,
        tree_id: ObjectId,
        author: impl Into<String>,
        message: impl Into<String>,
        timestamp: Timestamp,
    ) -> Self {
        let author = author.into();
        let message = message.into();
        let id = Self::compute_id(hasher, &tree_id, &author, &message, &timestamp);
        Self {
            id,
            tree_id,
            author,
            message,
            timestamp,
        }
    }

    fn compute_id(
        hasher: &ContentHasher,
        tree_id: &ObjectId,
        author: &str,
        message: &str,
        timestamp: &Timestamp,
    ) -> ObjectId {
        let buf = [
            tree_id.to_hex(),
            hasher.hash_str(author).to_hex(),
            hasher.hash_str(message).to_hex(),
            hasher.hash_str(&timestamp.canonical()).to_hex(),
        ]
        .concat();
        hasher.hash_str(&buf)
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    /// Id of the root tree this commit snapshots.
    pub fn tree_id(&self) -> &ObjectId {
        &self.tree_id
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

// ---------------------------------------------------------------------------
// Object
// ---------------------------------------------------------------------------

/// Any content-addressed object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
}

impl Object {
    pub fn id(&self) -> &ObjectId {
        match self {
            Self::Blob(blob) => blob.id(),
            Self::Tree(tree) => tree.id(),
            Self::Commit(commit) => commit.id(),
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Blob(_) => ObjectKind::Blob,
            Self::Tree(_) => ObjectKind::Tree,
            Self::Commit(_) => ObjectKind::Commit,
        }
    }

    pub fn as_blob(&self) -> Option<&Blob> {
        match self {
            Self::Blob(blob) => Some(blob),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            Self::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    pub fn as_commit(&self) -> Option<&Commit> {
        match self {
            Self::Commit(commit) => Some(commit),
            _ => None,
        }
    }

    /// Recompute the id from the object's fields and compare it with the
    /// stored one. Only objects that came from outside the constructors
    /// (e.g. deserialized by a durable backend) can fail this.
    pub fn verify(&self, hasher: &ContentHasher) -> bool {
        let computed = match self {
            Self::Blob(blob) => Blob::compute_id(hasher, &blob.data),
            Self::Tree(tree) => Tree::compute_id(hasher, &tree.entries),
            Self::Commit(c) => {
                Commit::compute_id(hasher, &c.tree_id, &c.author, &c.message, &c.timestamp)
            }
        };
        computed == *self.id()
    }
}

impl From<Blob> for Object {
    fn from(blob: Blob) -> Self {
        Self::Blob(blob)
    }
}

impl From<Tree> for Object {
    fn from(tree: Tree) -> Self {
        Self::Tree(tree)
    }
}

impl From<Commit> for Object {
    fn from(commit: Commit) -> Self {
        Self::Commit(commit)
    }
}
