//! # matchbook
//!
//! Single-instrument limit order book with price-time priority matching.
//!
//! ## Architecture
//!
//! - **Types**: core data structures (`Order`, `Trade`, depth snapshot rows)
//! - **Ids**: thread-safe monotonic sequence generator
//! - **OrderBook**: slab-backed book with per-side `BTreeMap` ladders and
//!   a synchronous crossing loop
//!
//! ## Design principles
//!
//! 1. **Exact prices**: `rust_decimal::Decimal` keys, no floating point
//! 2. **Stable handles**: orders are addressed by slab key and priority
//!    token, never by live iterators
//! 3. **Synchronous execution**: every mutation returns with the book
//!    uncrossed and all resulting trades in the ledger
//! 4. **Injected identity**: trade ids come from a caller-owned
//!    [`SequenceGenerator`], shareable across books
//!
//! ## Example
//!
//! ```
//! use std::str::FromStr;
//! use std::sync::Arc;
//! use rust_decimal::Decimal;
//! use matchbook::{OrderBook, SequenceGenerator, Side};
//!
//! let ids = Arc::new(SequenceGenerator::new());
//! let mut book = OrderBook::new("MSFT", ids);
//!
//! let px = |s: &str| Decimal::from_str(s).unwrap();
//! book.insert(1, Side::Buy, px("12.2"), 5)?;
//! book.insert(2, Side::Sell, px("12.1"), 8)?;
//!
//! assert_eq!(book.trades().len(), 1);
//! assert_eq!(book.price_levels().len(), 1);
//! # Ok::<(), matchbook::BookError>(())
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Caller-recoverable error taxonomy
pub mod error;

/// Monotonic identifier generation
pub mod ids;

/// Order book: ladders, matching, ledger, snapshot
pub mod orderbook;

/// Core data types: Order, Side, Trade, depth rows
pub mod types;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use error::BookError;
pub use ids::SequenceGenerator;
pub use orderbook::OrderBook;
pub use types::{DepthPair, LevelDepth, Order, Side, Trade};
