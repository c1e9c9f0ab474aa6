use thiserror::Error;
use treeline_store::ObjectKind;
use treeline_types::ObjectId;

#[derive(Debug, Error)]
pub enum RepoError {
    /// A commit's root tree id does not resolve to any stored object.
    #[error("tree not found: {0}")]
    TreeNotFound(ObjectId),

    /// A commit's root, or a tree entry, resolves to an object that cannot
    /// stand in a tree position.
    #[error("object {id} is a {kind}, not a tree")]
    ObjectIsNotTree { id: ObjectId, kind: ObjectKind },

    /// A tree entry points at an object missing from the store.
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    #[error("commit not found: {0}")]
    CommitNotFound(ObjectId),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] treeline_store::StoreError),

    #[error("index error: {0}")]
    Index(#[from] treeline_index::IndexError),
}

pub type RepoResult<T> = Result<T, RepoError>;
