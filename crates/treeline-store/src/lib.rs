//! Content-addressed object storage for Treeline.
//!
//! This crate implements the immutable object model and a hash-keyed object
//! store analogous to git's `.git/objects/` directory. Every blob and tree
//! is identified by the digest of its own fields, computed once when the
//! object is constructed.
//!
//! # Object Types
//!
//! - [`Blob`] -- raw file content
//! - [`Tree`] -- directory listing mapping names to child object ids
//! - [`Commit`] -- root tree id plus author, message and timestamp
//!
//! [`Object`] is the closed sum of the three.
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`InMemoryObjectStore`] -- `HashMap`-based store
//!
//! # Design Rules
//!
//! 1. Objects are immutable once written (content-addressing guarantees this).
//! 2. Writing an id that is already present is a no-op.
//! 3. Objects are never deleted.
//! 4. Concurrent reads are always safe (objects are immutable).

pub mod error;
pub mod memory;
pub mod object;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryObjectStore;
pub use object::{Blob, Commit, Object, ObjectKind, Tree};
pub use traits::ObjectStore;
