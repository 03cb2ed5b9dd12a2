//! Trade type representing an executed match between two orders.

use rust_decimal::Decimal;

/// An executed trade between the two top-of-book orders.
///
/// ## Terminology
///
/// - **Passive leg**: of the two matched orders, the one with the lower
///   priority token (it has been resting, or been re-prioritized, longer).
///   Its limit price sets the trade price.
/// - **Aggressive leg**: the other order; it never pays worse than its
///   own limit, so any price improvement goes to it.
///
/// Trades are immutable once created and appended to the ledger in
/// execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    /// Unique trade identifier from the shared [`SequenceGenerator`](crate::SequenceGenerator)
    pub id: u64,

    /// Execution price: always the passive leg's limit price
    pub price: Decimal,

    /// Executed quantity
    pub quantity: u64,

    /// External id of the aggressive leg
    pub aggressive_order_id: u64,

    /// External id of the passive leg
    pub passive_order_id: u64,
}

impl Trade {
    /// Create a new trade record.
    pub fn new(
        id: u64,
        price: Decimal,
        quantity: u64,
        aggressive_order_id: u64,
        passive_order_id: u64,
    ) -> Self {
        Self {
            id,
            price,
            quantity,
            aggressive_order_id,
            passive_order_id,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
