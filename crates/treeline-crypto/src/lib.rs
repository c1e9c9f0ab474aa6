//! Content hashing for Treeline.
//!
//! Every object id in a repository is produced by one [`ContentHasher`]. The
//! algorithm is a strategy chosen when the repository is created; nothing
//! else in the system depends on which one it is, only on the fixed width of
//! its output.
//!
//! All digests wrap established libraries; no custom cryptography.

pub mod hasher;

pub use hasher::{ContentHasher, HashAlgorithm, HasherError};
