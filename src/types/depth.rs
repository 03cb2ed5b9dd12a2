//! Rank-aligned price-level snapshot rows.
//!
//! ## Pairing semantics
//!
//! [`OrderBook::price_levels`](crate::OrderBook::price_levels) walks both
//! sides best-to-worst *in lockstep by rank*: row `i` pairs the i-th best
//! buy level with the i-th best sell level. The pairing is purely
//! positional, not a closest-opposing-price view, and the shorter side is
//! padded with `None`.

use rust_decimal::Decimal;

/// Aggregate of one price level: the price and the summed remaining
/// quantity of every order resting at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelDepth {
    /// Price of the level
    pub price: Decimal,

    /// Total remaining quantity across all orders at this price
    pub quantity: u64,
}

impl LevelDepth {
    /// Create a level aggregate.
    pub fn new(price: Decimal, quantity: u64) -> Self {
        Self { price, quantity }
    }
}

/// One row of the snapshot: the buy and sell levels sharing a rank.
///
/// `None` means that side has fewer distinct price levels than the rank
/// of this row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DepthPair {
    /// i-th best buy level, highest price first
    pub buy: Option<LevelDepth>,

    /// i-th best sell level, lowest price first
    pub sell: Option<LevelDepth>,
}

// ============================================================================
// Unit Tests
// ============================================================================
