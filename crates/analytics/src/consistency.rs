//! Checks that the stored win/loss flag agrees with the sign of P&L.
//!
//! The flag is never recomputed from the sign. A zero P&L can be either a win
//! or a loss depending on how the trader books break-even trades, so it is
//! never reported; neither is a trade without P&L.

use core_types::Trade;
use rust_decimal::Decimal;

/// Whether the trade's flag contradicts its P&L.
pub fn flag_contradicts_pnl(trade: &Trade) -> bool {
    match (trade.is_winner, trade.pnl) {
        (Some(true), Some(pnl)) => pnl < Decimal::ZERO,
        (Some(false), Some(pnl)) => pnl > Decimal::ZERO,
        _ => false,
    }
}

/// The trades whose flag contradicts their P&L, in input order.
pub fn flagged_trades(trades: &[Trade]) -> Vec<&Trade> {
    trades.iter().filter(|t| flag_contradicts_pnl(t)).collect()
}
