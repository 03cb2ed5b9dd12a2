//! Core data types for the matchbook order book.
//!
//! ## Types
//!
//! - [`Order`]: A resting limit order
//! - [`Side`]: Buy or Sell
//! - [`Trade`]: An executed match between two orders
//! - [`LevelDepth`] / [`DepthPair`]: Rank-aligned price-level snapshot rows
//!
//! Prices are `rust_decimal::Decimal` so book ordering is exact; there is
//! no floating point anywhere in the matching path. Quantities are `u64`.

mod depth;
mod order;
mod trade;

// Re-export all types at module level
pub use depth::{DepthPair, LevelDepth};
pub use order::{Order, Side};
pub use trade::Trade;
