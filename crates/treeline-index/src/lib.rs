//! Staging index for Treeline.
//!
//! The [`Index`] is the mutable, hierarchical working tree that callers edit
//! between commits. It is independent of the object store: nothing here is
//! hashed, and a commit only reads it.
//!
//! # Key Types
//!
//! - [`Index`] -- one directory node holding files and subtrees
//! - [`RepoPath`] -- validated repository-relative path
//! - [`IntoRepoPath`] -- conversions from strings, `std::path::Path` and segment lists

pub mod error;
pub mod index;
pub mod path;

pub use error::{IndexError, IndexResult};
pub use index::Index;
pub use path::{IntoRepoPath, RepoPath};
