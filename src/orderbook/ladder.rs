//! Per-side price ladder: the ordered index of resting orders.
//!
//! ## Structure
//!
//! Each side of the book is a `BTreeMap` from price to a price bucket,
//! where a bucket is itself a `BTreeMap` from priority token to the slab
//! key of the resting order:
//!
//! ```text
//! price -> { token -> slab key }
//! ```
//!
//! - Buy side: best = highest price (iterated back-to-front)
//! - Sell side: best = lowest price (iterated front-to-back)
//! - Within a bucket: ascending token, i.e. oldest non-re-prioritized first
//!
//! This gives O(log levels) placement/removal and O(log levels) best-price
//! access while keeping both ordering invariants in the key types
//! themselves. A bucket is removed the instant it becomes empty, so the
//! first bucket on a side is always the best *populated* level.
//!
//! Order payloads live in the book's slab; the ladder only holds keys, so
//! nothing here is invalidated by matching or amends elsewhere.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use slab::Slab;

use crate::types::{LevelDepth, Order, Side};

/// Top-of-book position on one side: enough to address the order without
/// holding any reference into the ladder or the slab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestOrder {
    /// Price of the best bucket
    pub price: Decimal,

    /// Priority token of the first order in that bucket
    pub token: u64,

    /// Slab key of that order
    pub key: usize,
}

/// One side of the book: price levels in priority order.
#[derive(Debug)]
pub struct SideIndex {
    side: Side,
    levels: BTreeMap<Decimal, BTreeMap<u64, usize>>,
}

impl SideIndex {
    /// Create an empty ladder for the given side.
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
        }
    }

    /// Which side this ladder indexes
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Number of populated price levels
    #[inline]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Number of resting orders across all levels
    pub fn order_count(&self) -> usize {
        self.levels.values().map(BTreeMap::len).sum()
    }

    /// Check if the ladder has no resting orders
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Place an order into the bucket for `price`, keyed by its token.
    ///
    /// Creates the bucket if absent. Tokens are never reused, so this
    /// cannot displace an existing entry.
    pub fn place(&mut self, price: Decimal, token: u64, key: usize) {
        self.levels.entry(price).or_default().insert(token, key);
    }

    /// Remove the order with `token` from the bucket for `price`,
    /// deleting the bucket if it becomes empty.
    ///
    /// Calling this with a pair that is not present is a caller bug; it
    /// is asserted in debug builds and tolerated as a no-op in release.
    pub fn remove(&mut self, price: Decimal, token: u64) {
        let Some(bucket) = self.levels.get_mut(&price) else {
            debug_assert!(false, "remove from absent price level {price}");
            return;
        };

        let removed = bucket.remove(&token);
        debug_assert!(removed.is_some(), "remove of absent token {token} at {price}");

        if bucket.is_empty() {
            self.levels.remove(&price);
        }
    }

    /// First order at the best price level, or `None` if the side is empty.
    pub fn best(&self) -> Option<BestOrder> {
        let (price, bucket) = match self.side {
            Side::Buy => self.levels.iter().next_back()?,
            Side::Sell => self.levels.iter().next()?,
        };

        // Buckets are deleted when emptied, so the first entry exists.
        let (&token, &key) = bucket.iter().next()?;

        Some(BestOrder {
            price: *price,
            token,
            key,
        })
    }

    /// Sum of remaining quantities of every order in the best bucket,
    /// or 0 if the side is empty.
    pub fn total_quantity_at_best(&self, orders: &Slab<Order>) -> u64 {
        let bucket = match self.side {
            Side::Buy => self.levels.values().next_back(),
            Side::Sell => self.levels.values().next(),
        };

        bucket.map_or(0, |bucket| Self::bucket_quantity(bucket, orders))
    }

    /// Aggregate every level best-to-worst into `(price, total quantity)`
    /// rows for the snapshot.
    pub fn depth(&self, orders: &Slab<Order>) -> Vec<LevelDepth> {
        match self.side {
            Side::Buy => self
                .levels
                .iter()
                .rev()
                .map(|(price, bucket)| LevelDepth::new(*price, Self::bucket_quantity(bucket, orders)))
                .collect(),
            Side::Sell => self
                .levels
                .iter()
                .map(|(price, bucket)| LevelDepth::new(*price, Self::bucket_quantity(bucket, orders)))
                .collect(),
        }
    }

    fn bucket_quantity(bucket: &BTreeMap<u64, usize>, orders: &Slab<Order>) -> u64 {
        bucket.values().map(|&key| orders[key].quantity).sum()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
