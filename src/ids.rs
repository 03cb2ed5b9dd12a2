//! Monotonic identifier generation.
//!
//! ## Design
//!
//! `SequenceGenerator` hands out a strictly increasing sequence of `u64`
//! values starting at 0, using a single atomic increment-and-fetch. Two
//! callers can never observe the same value, so one generator can be
//! shared (behind an `Arc`) across several order books to produce trade
//! identifiers that are globally unique and globally ordered across
//! instruments.
//!
//! Each book also owns a private generator for its time-priority tokens.

use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe source of strictly increasing identifiers.
///
/// ## Example
///
/// ```
/// use matchbook::SequenceGenerator;
///
/// let ids = SequenceGenerator::new();
/// assert_eq!(ids.next(), 0);
/// assert_eq!(ids.next(), 1);
/// assert_eq!(ids.next(), 2);
/// ```
#[derive(Debug, Default)]
pub struct SequenceGenerator {
    next: AtomicU64,
}

impl SequenceGenerator {
    /// Create a generator starting at 0.
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    /// Return the next identifier.
    ///
    /// Safe to call concurrently without external locking: the fetch-add
    /// is a single atomic read-modify-write, so every caller gets a
    /// distinct value. Only atomicity is required here, hence `Relaxed`.
    #[inline]
    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Rewind the sequence to 0.
    ///
    /// Hazard: previously issued values stop being unique after a reset.
    /// Callers must ensure no concurrent users remain and no consumer
    /// still depends on the old values.
    pub fn reset(&self) {
        self.next.store(0, Ordering::Relaxed);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
