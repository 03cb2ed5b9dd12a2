//! Order side and resting order record.

use rust_decimal::Decimal;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Buy order (bid) - wants to purchase the instrument
    #[default]
    Buy,
    /// Sell order (ask) - wants to sell the instrument
    Sell,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A resting limit order.
///
/// ## Identity
///
/// `id` is the caller-supplied external identifier, unique among orders
/// currently resting in one book; it is the handle for amend and pull.
/// `token` is the internal time-priority token: strictly increasing,
/// never reused, and reassigned (higher) whenever the order forfeits
/// queue position. Within a price level, lower token matches first.
///
/// ## Example
///
/// ```
/// use std::str::FromStr;
/// use rust_decimal::Decimal;
/// use matchbook::{Order, Side};
///
/// let order = Order::new(1, 0, Side::Buy, Decimal::from_str("12.2").unwrap(), 5);
/// assert_eq!(order.quantity, 5);
/// assert!(!order.is_filled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Caller-supplied external identifier
    pub id: u64,

    /// Time-priority token (internal, strictly increasing per book)
    pub token: u64,

    /// Buy or Sell; immutable for the lifetime of the order
    pub side: Side,

    /// Limit price; mutable via amend
    pub price: Decimal,

    /// Remaining tradable quantity; reduced by matching and amends
    pub quantity: u64,
}

impl Order {
    /// Create a new resting order.
    pub fn new(id: u64, token: u64, side: Side, price: Decimal, quantity: u64) -> Self {
        Self {
            id,
            token,
            side,
            price,
            quantity,
        }
    }

    /// Reduce the remaining quantity by a fill.
    ///
    /// Returns the quantity actually consumed (capped at what remains).
    #[inline]
    pub fn fill(&mut self, quantity: u64) -> u64 {
        let consumed = quantity.min(self.quantity);
        self.quantity -= consumed;
        consumed
    }

    /// Check whether the order has no remaining quantity
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.quantity == 0
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
