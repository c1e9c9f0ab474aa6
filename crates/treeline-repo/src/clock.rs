//! Time sources for commit timestamps.
//!
//! The repository never reads the wall clock directly; it asks its
//! [`Clock`]. Tests and reproducible scripts swap in a [`FixedClock`].

use treeline_types::Timestamp;

/// Source of commit timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// The system wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock stuck at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}
