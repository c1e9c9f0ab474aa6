//! Treeline repository.
//!
//! [`Repo`] turns successive states of its working [`Index`] into an
//! append-only history of commits. Each commit points at a root tree built
//! from the working tree; blobs and trees are shared between directories and
//! between commits whenever their content is equal.
//!
//! This is the main entry point for applications embedding Treeline.

pub mod clock;
pub mod config;
pub mod error;
pub mod repository;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::RepoConfig;
pub use error::{RepoError, RepoResult};
pub use repository::Repo;

// Re-export key types
pub use treeline_crypto::{ContentHasher, HashAlgorithm};
pub use treeline_index::{Index, IndexError, IntoRepoPath, RepoPath};
pub use treeline_store::{Blob, Commit, InMemoryObjectStore, Object, ObjectKind, ObjectStore, Tree};
pub use treeline_types::{ObjectId, Timestamp};
