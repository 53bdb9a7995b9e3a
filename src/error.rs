//! Error types for the lrukit library.
//!
//! ## Key Components
//!
//! - [`ArenaError`]: Returned when the node arena cannot grow (allocator
//!   refusal or slot-id space exhaustion). This is the only failure the cache
//!   surfaces to callers, and only through the `try_*` operations.
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (diagnostic `check_invariants` methods).
//!
//! Misses, expired entries and capacity pressure are never errors: they are
//! reported through `Option`/`bool` returns and resolved by eviction.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::error::ArenaError;
//! use lrukit::policy::lru::LruCache;
//!
//! let cache: LruCache<u64, u64> = LruCache::new(2);
//! let inserted: Result<(), ArenaError> = cache.try_set(1, 10);
//! assert!(inserted.is_ok());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ArenaError
// ---------------------------------------------------------------------------

/// Error returned when the slot arena cannot provide a new slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    /// The arena already addresses the maximum number of slots a
    /// [`SlotId`](crate::ds::SlotId) can represent.
    CapacityOverflow,
    /// The allocator refused to grow the slot vector.
    AllocFailed {
        /// Total number of slots the arena attempted to hold.
        requested: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArenaError::CapacityOverflow => f.write_str("slot arena capacity overflow"),
            ArenaError::AllocFailed { requested } => {
                write!(f, "slot arena allocation failed growing to {requested} slots")
            },
        }
    }
}

impl std::error::Error for ArenaError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` methods on the recency list and the cache
/// engine. Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- ArenaError -------------------------------------------------------

    #[test]
    fn arena_overflow_display() {
        let err = ArenaError::CapacityOverflow;
        assert_eq!(err.to_string(), "slot arena capacity overflow");
    }

    #[test]
    fn arena_alloc_failed_display_includes_request() {
        let err = ArenaError::AllocFailed { requested: 4096 };
        assert!(err.to_string().contains("4096"));
    }

    #[test]
    fn arena_implements_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<ArenaError>();
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("tail link mismatch");
        assert_eq!(err.to_string(), "tail link mismatch");
    }

    #[test]
    fn invariant_message_accessor() {
        let err = InvariantError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn invariant_clone_and_eq() {
        let a = InvariantError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }
}
