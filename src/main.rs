//! matchbook demo binary.
//!
//! Drives two books sharing one trade-id generator and prints the
//! resulting ledger and depth snapshot.

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;

use matchbook::{BookError, OrderBook, SequenceGenerator, Side};

fn px(s: &str) -> Decimal {
    Decimal::from_str(s).expect("literal price")
}

fn main() -> Result<(), BookError> {
    let ids = Arc::new(SequenceGenerator::new());
    let mut msft = OrderBook::new("MSFT", Arc::clone(&ids));
    let mut tsla = OrderBook::new("TSLA", Arc::clone(&ids));

    msft.insert(1, Side::Buy, px("45.95"), 5)?;
    msft.insert(2, Side::Buy, px("45.95"), 6)?;
    msft.insert(3, Side::Buy, px("45.90"), 12)?;
    msft.insert(4, Side::Sell, px("46.10"), 8)?;
    msft.amend(2, px("46.10"), 4)?;
    msft.pull(3);

    tsla.insert(10, Side::Sell, px("201.20"), 121)?;
    tsla.insert(11, Side::Buy, px("209.80"), 300)?;

    for book in [&msft, &tsla] {
        println!("{} trades:", book.symbol());
        for trade in book.trades() {
            println!(
                "  #{} {} x {} (aggressive {}, passive {})",
                trade.id, trade.price, trade.quantity, trade.aggressive_order_id, trade.passive_order_id,
            );
        }

        println!("{} depth:", book.symbol());
        for level in book.price_levels() {
            let fmt = |side: Option<matchbook::LevelDepth>| match side {
                Some(level) => format!("{} x {}", level.price, level.quantity),
                None => "-".to_string(),
            };
            println!("  buy {:>16} | sell {:>16}", fmt(level.buy), fmt(level.sell));
        }
        println!();
    }

    Ok(())
}
