//! Error types for the order book.
//!
//! Only caller-recoverable conditions surface as errors: an insert that
//! reuses a resting id, or an amend that names an unknown id. Pulling an
//! unknown id is a tolerated no-op (cancel-after-fill races are benign),
//! and internal consistency violations are asserted, not returned.

use thiserror::Error;

/// Caller-recoverable failures from [`OrderBook`](crate::OrderBook) mutations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BookError {
    /// Insert with an external id that is already resting in this book.
    #[error("order {0} is already resting")]
    DuplicateOrder(u64),

    /// Amend targeting an external id that is not resting in this book.
    #[error("order {0} is not resting")]
    UnknownOrder(u64),
}
