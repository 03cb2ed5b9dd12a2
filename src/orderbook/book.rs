//! Single-instrument limit order book.
//!
//! ## Architecture
//!
//! The book uses a hybrid data structure:
//!
//! - **Slab**: pre-allocatable arena owning every resting [`Order`]
//! - **HashMap**: external order id to slab key, for O(1) amend/pull lookup
//! - **[`SideIndex`]**: per-side `BTreeMap` ladders holding slab keys in
//!   price-time priority order
//!
//! Orders are always addressed by stable keys (slab key, price, token) and
//! the crossing loop re-reads top-of-book after every structural change,
//! so no iterator is ever held across an erase.
//!
//! ## Control flow
//!
//! Every mutation updates the arena, the id index, and the relevant ladder
//! synchronously, then conditionally resolves crosses before returning:
//!
//! - [`insert`](OrderBook::insert): always matches afterwards
//! - [`amend`](OrderBook::amend): matches only when the price changed
//! - [`pull`](OrderBook::pull): never matches (removing liquidity cannot
//!   create a cross)
//!
//! There is no deferred work; a call returns only once the book is
//! uncrossed and all resulting trades are in the ledger.
//!
//! ## Concurrency
//!
//! A book is not internally synchronized: callers serialize access to one
//! instance. Only the injected [`SequenceGenerator`] is thread-safe, so
//! that a single generator can be shared by several books to give trades
//! one global ordering across instruments.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use slab::Slab;

use crate::error::BookError;
use crate::ids::SequenceGenerator;
use crate::orderbook::ladder::{BestOrder, SideIndex};
use crate::types::{DepthPair, Order, Side, Trade};

/// Single-instrument limit order book with price-time priority.
///
/// ## Example
///
/// ```
/// use std::str::FromStr;
/// use std::sync::Arc;
/// use rust_decimal::Decimal;
/// use matchbook::{OrderBook, SequenceGenerator, Side};
///
/// let mut book = OrderBook::new("MSFT", Arc::new(SequenceGenerator::new()));
///
/// book.insert(1, Side::Buy, Decimal::from_str("12.2").unwrap(), 5).unwrap();
/// book.insert(2, Side::Sell, Decimal::from_str("12.1").unwrap(), 8).unwrap();
///
/// // The aggressive sell crossed the resting buy and trades at 12.2
/// let trades = book.trades();
/// assert_eq!(trades.len(), 1);
/// assert_eq!(trades[0].price, Decimal::from_str("12.2").unwrap());
/// assert_eq!(trades[0].quantity, 5);
/// ```
#[derive(Debug)]
pub struct OrderBook {
    /// Instrument label; opaque to matching
    symbol: String,

    /// Arena owning every resting order
    orders: Slab<Order>,

    /// External order id -> slab key
    index: HashMap<u64, usize>,

    /// Buy ladder (best = highest price)
    bids: SideIndex,

    /// Sell ladder (best = lowest price)
    asks: SideIndex,

    /// Append-only ledger of executed trades, in execution order
    trades: Vec<Trade>,

    /// Time-priority tokens, private to this book
    tokens: SequenceGenerator,

    /// Trade identifiers; shared across books for a global trade ordering
    trade_ids: Arc<SequenceGenerator>,
}

impl OrderBook {
    /// Create an empty book for one instrument.
    ///
    /// `trade_ids` may be shared between several books so trade ids stay
    /// unique and ordered across instruments, or be freshly created for a
    /// standalone book.
    pub fn new(symbol: impl Into<String>, trade_ids: Arc<SequenceGenerator>) -> Self {
        Self {
            symbol: symbol.into(),
            orders: Slab::new(),
            index: HashMap::new(),
            bids: SideIndex::new(Side::Buy),
            asks: SideIndex::new(Side::Sell),
            trades: Vec::new(),
            tokens: SequenceGenerator::new(),
            trade_ids,
        }
    }

    /// Create a book with pre-allocated capacity for `order_capacity`
    /// resting orders.
    pub fn with_capacity(
        symbol: impl Into<String>,
        trade_ids: Arc<SequenceGenerator>,
        order_capacity: usize,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            orders: Slab::with_capacity(order_capacity),
            index: HashMap::with_capacity(order_capacity),
            bids: SideIndex::new(Side::Buy),
            asks: SideIndex::new(Side::Sell),
            trades: Vec::new(),
            tokens: SequenceGenerator::new(),
            trade_ids,
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Insert a new limit order and resolve any crosses it creates.
    ///
    /// The order is assigned a fresh priority token, so it always joins
    /// the back of its price level.
    ///
    /// # Errors
    ///
    /// [`BookError::DuplicateOrder`] if `id` is already resting; the book
    /// is untouched in that case.
    pub fn insert(
        &mut self,
        id: u64,
        side: Side,
        price: Decimal,
        quantity: u64,
    ) -> Result<(), BookError> {
        if self.index.contains_key(&id) {
            return Err(BookError::DuplicateOrder(id));
        }

        let token = self.tokens.next();
        let key = self.orders.insert(Order::new(id, token, side, price, quantity));
        self.index.insert(id, key);
        self.ladder_mut(side).place(price, token, key);

        // An insert can always create a cross.
        self.execute_crosses();
        Ok(())
    }

    /// Amend the price and/or quantity of a resting order.
    ///
    /// A new price or a quantity increase is a new economic commitment:
    /// the order forfeits its queue position, gets a fresh priority token,
    /// and is re-placed at the back of the (possibly new) price level.
    /// Reducing quantity at an unchanged price keeps its place in line.
    ///
    /// Crosses are resolved only when the price changed; a quantity-only
    /// amend at the same price cannot cross the book.
    ///
    /// # Errors
    ///
    /// [`BookError::UnknownOrder`] if `id` is not resting; the book is
    /// untouched in that case.
    pub fn amend(&mut self, id: u64, price: Decimal, quantity: u64) -> Result<(), BookError> {
        let key = *self.index.get(&id).ok_or(BookError::UnknownOrder(id))?;

        let (old_price, old_quantity, old_token, side) = {
            let order = &self.orders[key];
            (order.price, order.quantity, order.token, order.side)
        };

        let price_changed = price != old_price;
        let loses_priority = price_changed || quantity > old_quantity;

        if loses_priority {
            self.ladder_mut(side).remove(old_price, old_token);

            let token = self.tokens.next();
            let order = &mut self.orders[key];
            order.token = token;
            order.price = price;
            order.quantity = quantity;

            self.ladder_mut(side).place(price, token, key);

            if price_changed {
                self.execute_crosses();
            }
        } else {
            // Pure size reduction at the same price: priority preserved.
            self.orders[key].quantity = quantity;
        }

        Ok(())
    }

    /// Remove a resting order.
    ///
    /// Pulling an id that is not resting is a tolerated no-op:
    /// cancel-after-fill races are expected and benign. Pull never
    /// triggers matching.
    pub fn pull(&mut self, id: u64) {
        if let Some(key) = self.index.remove(&id) {
            let order = self.orders.remove(key);
            self.ladder_mut(order.side).remove(order.price, order.token);
        }
    }

    // ========================================================================
    // Read APIs
    // ========================================================================

    /// Executed trades in execution order (append-only view).
    #[inline]
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Rank-aligned snapshot of both ladders.
    ///
    /// Row `i` pairs the i-th best buy level with the i-th best sell
    /// level; the side with fewer levels is padded with `None`. The
    /// pairing is positional, not by price proximity.
    pub fn price_levels(&self) -> Vec<DepthPair> {
        let buys = self.bids.depth(&self.orders);
        let sells = self.asks.depth(&self.orders);

        (0..buys.len().max(sells.len()))
            .map(|rank| DepthPair {
                buy: buys.get(rank).copied(),
                sell: sells.get(rank).copied(),
            })
            .collect()
    }

    /// Instrument label this book was created with
    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Number of resting orders
    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Check if the book has no resting orders
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Check if an order is currently resting
    #[inline]
    pub fn contains_order(&self, id: u64) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of populated buy price levels
    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.level_count()
    }

    /// Number of populated sell price levels
    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.level_count()
    }

    /// Best (highest) buy price, or `None` if no bids rest
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.best().map(|best| best.price)
    }

    /// Best (lowest) sell price, or `None` if no asks rest
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.best().map(|best| best.price)
    }

    /// Total resting quantity at the best buy price (0 if none)
    pub fn best_bid_quantity(&self) -> u64 {
        self.bids.total_quantity_at_best(&self.orders)
    }

    /// Total resting quantity at the best sell price (0 if none)
    pub fn best_ask_quantity(&self) -> u64 {
        self.asks.total_quantity_at_best(&self.orders)
    }

    /// Spread between best ask and best bid, or `None` if either side is
    /// empty.
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Resolve crosses until the book is uncrossed or a side empties.
    ///
    /// Each iteration trades the two top-of-book orders: the leg with the
    /// lower priority token is passive and sets the trade price (price
    /// improvement always goes to the aggressive leg), quantity is the
    /// min of the two remainders, and fully consumed legs are removed
    /// from ladder, index, and arena before the next iteration re-reads
    /// top-of-book. Every iteration drains `min > 0` quantity, so the
    /// loop terminates within the current order count.
    fn execute_crosses(&mut self) {
        loop {
            let (Some(best_buy), Some(best_sell)) = (self.bids.best(), self.asks.best()) else {
                break;
            };

            if best_buy.price < best_sell.price {
                break;
            }

            let traded = self.orders[best_buy.key]
                .quantity
                .min(self.orders[best_sell.key].quantity);

            // Passive is the leg with the lower token, independent of
            // side or of which call placed it.
            let buy_is_passive = best_buy.token < best_sell.token;
            let (passive, aggressive) = if buy_is_passive {
                (best_buy, best_sell)
            } else {
                (best_sell, best_buy)
            };

            self.trades.push(Trade::new(
                self.trade_ids.next(),
                self.orders[passive.key].price,
                traded,
                self.orders[aggressive.key].id,
                self.orders[passive.key].id,
            ));

            self.orders[best_buy.key].fill(traded);
            self.orders[best_sell.key].fill(traded);

            for leg in [best_buy, best_sell] {
                if self.orders[leg.key].is_filled() {
                    self.remove_filled(leg);
                }
            }
        }
    }

    /// Drop a fully consumed leg from ladder, index, and arena.
    fn remove_filled(&mut self, leg: BestOrder) {
        let side = self.orders[leg.key].side;
        self.ladder_mut(side).remove(leg.price, leg.token);

        let order = self.orders.remove(leg.key);
        self.index.remove(&order.id);
    }

    fn ladder_mut(&mut self, side: Side) -> &mut SideIndex {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn px(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn book() -> OrderBook {
        OrderBook::new("MSFT", Arc::new(SequenceGenerator::new()))
    }

    #[test]
    fn test_new_book_is_empty() {
        let book = book();

        assert!(book.is_empty());
        assert_eq!(book.symbol(), "MSFT");
        assert_eq!(book.order_count(), 0);
        assert!(book.best_bid().is_none());
        assert!(book.best_ask().is_none());
        assert!(book.trades().is_empty());
        assert!(book.price_levels().is_empty());
    }

    #[test]
    fn test_with_capacity() {
        let book = OrderBook::with_capacity("MSFT", Arc::new(SequenceGenerator::new()), 1_000);
        assert!(book.is_empty());
    }

    #[test]
    fn test_insert_rests_without_cross() {
        let mut book = book();

        book.insert(1, Side::Buy, px("12.2"), 5).unwrap();
        book.insert(2, Side::Sell, px("12.3"), 8).unwrap();

        assert!(book.trades().is_empty());
        assert_eq!(book.best_bid(), Some(px("12.2")));
        assert_eq!(book.best_ask(), Some(px("12.3")));
        assert_eq!(book.spread(), Some(px("0.1")));
        assert!(book.contains_order(1));
        assert!(book.contains_order(2));
    }

    #[test]
    fn test_duplicate_insert_rejected_without_mutation() {
        let mut book = book();

        book.insert(1, Side::Buy, px("12.2"), 5).unwrap();
        let err = book.insert(1, Side::Sell, px("12.1"), 3).unwrap_err();

        assert_eq!(err, BookError::DuplicateOrder(1));
        // The failed insert left no trace: no ask side, no trades
        assert_eq!(book.order_count(), 1);
        assert!(book.best_ask().is_none());
        assert!(book.trades().is_empty());
    }

    #[test]
    fn test_amend_unknown_order_rejected() {
        let mut book = book();

        let err = book.amend(99, px("12.2"), 5).unwrap_err();
        assert_eq!(err, BookError::UnknownOrder(99));
    }

    #[test]
    fn test_pull_unknown_order_is_noop() {
        let mut book = book();

        book.insert(1, Side::Buy, px("12.2"), 5).unwrap();
        book.pull(99);

        assert_eq!(book.order_count(), 1);
    }

    #[test]
    fn test_pull_removes_order_and_level() {
        let mut book = book();

        book.insert(1, Side::Buy, px("12.2"), 5).unwrap();
        book.insert(2, Side::Buy, px("12.1"), 3).unwrap();
        book.pull(1);

        assert!(!book.contains_order(1));
        assert_eq!(book.bid_levels(), 1);
        assert_eq!(book.best_bid(), Some(px("12.1")));
    }

    #[test]
    fn test_simple_cross_executes_at_passive_price() {
        let mut book = book();

        book.insert(1, Side::Buy, px("12.2"), 5).unwrap();
        book.insert(2, Side::Sell, px("12.1"), 8).unwrap();

        let trades = book.trades();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0], Trade::new(0, px("12.2"), 5, 2, 1));

        // Buy leg fully consumed; 3 lots of the sell remain
        assert!(!book.contains_order(1));
        assert_eq!(book.best_ask(), Some(px("12.1")));
        assert_eq!(book.best_ask_quantity(), 3);
    }

    #[test]
    fn test_partial_fill_leaves_passive_remainder() {
        let mut book = book();

        book.insert(1, Side::Sell, px("12.1"), 8).unwrap();
        book.insert(2, Side::Buy, px("12.2"), 5).unwrap();

        let trades = book.trades();
        assert_eq!(trades.len(), 1);
        // Passive leg is the resting sell, so the trade prints at 12.1
        assert_eq!(trades[0], Trade::new(0, px("12.1"), 5, 2, 1));
        assert_eq!(book.best_ask_quantity(), 3);
        assert!(book.best_bid().is_none());
    }

    #[test]
    fn test_equal_quantities_consume_both_legs() {
        let mut book = book();

        book.insert(1, Side::Buy, px("10"), 4).unwrap();
        book.insert(2, Side::Sell, px("10"), 4).unwrap();

        assert_eq!(book.trades().len(), 1);
        assert!(book.is_empty());
        assert!(book.price_levels().is_empty());
    }

    #[test]
    fn test_aggressive_order_sweeps_multiple_levels() {
        let mut book = book();

        book.insert(1, Side::Sell, px("10.1"), 2).unwrap();
        book.insert(2, Side::Sell, px("10.2"), 2).unwrap();
        book.insert(3, Side::Buy, px("10.2"), 5).unwrap();

        let trades = book.trades();
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0], Trade::new(0, px("10.1"), 2, 3, 1));
        assert_eq!(trades[1], Trade::new(1, px("10.2"), 2, 3, 2));

        // One lot of the buy rests after the sweep
        assert_eq!(book.best_bid(), Some(px("10.2")));
        assert_eq!(book.best_bid_quantity(), 1);
    }

    #[test]
    fn test_quantity_decrease_keeps_priority() {
        let mut book = book();

        book.insert(1, Side::Buy, px("45.95"), 5).unwrap();
        book.insert(2, Side::Buy, px("45.95"), 6).unwrap();
        book.amend(2, px("45.95"), 3).unwrap();

        // Order 1 still matches first: its token predates order 2's
        book.insert(3, Side::Sell, px("45.95"), 5).unwrap();

        let trades = book.trades();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].passive_order_id, 1);
        assert_eq!(book.best_bid_quantity(), 3);
    }

    #[test]
    fn test_quantity_increase_forfeits_priority() {
        let mut book = book();

        book.insert(1, Side::Buy, px("45.95"), 5).unwrap();
        book.insert(2, Side::Buy, px("45.95"), 6).unwrap();
        book.amend(1, px("45.95"), 7).unwrap();

        // Order 2 is now ahead of the re-prioritized order 1
        book.insert(3, Side::Sell, px("45.95"), 6).unwrap();

        let trades = book.trades();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].passive_order_id, 2);
        assert_eq!(book.best_bid_quantity(), 7);
    }

    #[test]
    fn test_amend_price_triggers_matching() {
        let mut book = book();

        book.insert(1, Side::Buy, px("45.90"), 5).unwrap();
        book.insert(2, Side::Sell, px("46"), 8).unwrap();
        assert!(book.trades().is_empty());

        book.amend(1, px("46"), 5).unwrap();

        let trades = book.trades();
        assert_eq!(trades.len(), 1);
        // The repriced buy is aggressive: the resting sell's token is lower
        assert_eq!(trades[0], Trade::new(0, px("46"), 5, 1, 2));
    }

    #[test]
    fn test_quantity_amend_at_same_price_never_matches() {
        let mut book = book();

        // Seed a crossed-looking setup that cannot exist: a quantity-only
        // amend on an uncrossed book must not run the matching loop.
        book.insert(1, Side::Buy, px("12.2"), 5).unwrap();
        book.insert(2, Side::Sell, px("12.3"), 8).unwrap();

        book.amend(1, px("12.2"), 9).unwrap();
        book.amend(2, px("12.3"), 2).unwrap();

        assert!(book.trades().is_empty());
    }

    #[test]
    fn test_price_levels_rank_pairing() {
        let mut book = book();

        book.insert(1, Side::Buy, px("14.23"), 3).unwrap();
        book.insert(2, Side::Sell, px("14.234"), 2).unwrap();
        book.insert(3, Side::Sell, px("14.237"), 8).unwrap();
        book.insert(4, Side::Sell, px("14.24"), 9).unwrap();

        let levels = book.price_levels();
        assert_eq!(levels.len(), 3);

        assert_eq!(levels[0].buy.unwrap().price, px("14.23"));
        assert_eq!(levels[0].sell.unwrap().price, px("14.234"));
        assert!(levels[1].buy.is_none());
        assert_eq!(levels[1].sell.unwrap().price, px("14.237"));
        assert!(levels[2].buy.is_none());
        assert_eq!(levels[2].sell.unwrap().price, px("14.24"));
    }

    #[test]
    fn test_trade_ids_shared_across_books() {
        let ids = Arc::new(SequenceGenerator::new());
        let mut msft = OrderBook::new("MSFT", Arc::clone(&ids));
        let mut tsla = OrderBook::new("TSLA", Arc::clone(&ids));

        msft.insert(1, Side::Buy, px("12.2"), 5).unwrap();
        msft.insert(2, Side::Sell, px("12.2"), 5).unwrap();
        tsla.insert(1, Side::Buy, px("200"), 5).unwrap();
        tsla.insert(2, Side::Sell, px("200"), 5).unwrap();

        assert_eq!(msft.trades()[0].id, 0);
        assert_eq!(tsla.trades()[0].id, 1);
    }

    #[test]
    fn test_book_never_rests_crossed() {
        let mut book = book();

        book.insert(1, Side::Buy, px("10"), 3).unwrap();
        book.insert(2, Side::Buy, px("11"), 3).unwrap();
        book.insert(3, Side::Sell, px("9"), 10).unwrap();

        if let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) {
            assert!(bid < ask);
        }
        // Both bids swept, 4 lots of the sell rest
        assert_eq!(book.trades().len(), 2);
        assert_eq!(book.best_ask_quantity(), 4);
    }
}
