//! Foundation types for Treeline.
//!
//! This crate provides the value types shared by every other Treeline crate.
//!
//! # Key Types
//!
//! - [`ObjectId`] -- Content-addressed identifier (digest bytes of any width)
//! - [`Timestamp`] -- Opaque UTC instant recorded in commits

pub mod error;
pub mod object;
pub mod temporal;

pub use error::TypeError;
pub use object::ObjectId;
pub use temporal::Timestamp;
