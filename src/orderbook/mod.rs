//! Order book module: the per-side ladders and the book itself.
//!
//! ## Components
//!
//! - [`SideIndex`]: one side's ordered price ladder (price → token → key)
//! - [`BestOrder`]: copyable address of a side's top-of-book order
//! - [`OrderBook`]: registry, both ladders, crossing loop, trade ledger
//!
//! ## Performance
//!
//! | Operation          | Complexity        |
//! |--------------------|-------------------|
//! | Insert             | O(log levels)     |
//! | Amend / pull by id | O(log levels)     |
//! | Best price         | O(log levels)     |
//! | Matching           | O(fills × log levels) |

pub mod book;
pub mod ladder;

pub use book::OrderBook;
pub use ladder::{BestOrder, SideIndex};
