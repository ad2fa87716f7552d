// In crates/analytics/src/periods.rs

use chrono::{Datelike, NaiveDate};
use core_types::Trade;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::math::percentage;
use crate::types::{DailyPnl, MonthlyPnl};

/// Running totals for one calendar bucket.
#[derive(Debug, Default, Clone, Copy)]
struct PeriodTotals {
    pnl: Decimal,
    count: u32,
    wins: u32,
}

/// Groups trades by a calendar key, oldest key first. Keys with no trades never appear.
fn aggregate_by<K, F>(trades: &[Trade], key_of: F) -> BTreeMap<K, PeriodTotals>
where
    K: Ord,
    F: Fn(&Trade) -> K,
{
    let mut buckets: BTreeMap<K, PeriodTotals> = BTreeMap::new();
    for trade in trades {
        let totals = buckets.entry(key_of(trade)).or_default();
        totals.pnl = totals.pnl.saturating_add(trade.pnl_or_zero());
        totals.count += 1;
        if trade.is_win() {
            totals.wins += 1;
        }
    }
    buckets
}

/// Sums P&L per calendar day of `entry_date`.
///
/// The day is taken in the offset the timestamp was recorded with; no timezone
/// conversion happens. The result is sparse and ascending by date.
pub fn daily_pnl(trades: &[Trade]) -> Vec<DailyPnl> {
    aggregate_by(trades, Trade::entry_day)
        .into_iter()
        .map(|(date, totals)| DailyPnl {
            date,
            total_pnl: totals.pnl,
            trade_count: totals.count,
            winning_trades: totals.wins,
            win_rate: percentage(totals.wins, totals.count),
        })
        .collect()
}

/// Same as [`daily_pnl`], bucketed by `YYYY-MM`.
pub fn monthly_pnl(trades: &[Trade]) -> Vec<MonthlyPnl> {
    aggregate_by(trades, |t| {
        let day: NaiveDate = t.entry_day();
        (day.year(), day.month())
    })
    .into_iter()
    .map(|((year, month), totals)| MonthlyPnl {
        month: format!("{year:04}-{month:02}"),
        total_pnl: totals.pnl,
        trade_count: totals.count,
        winning_trades: totals.wins,
        win_rate: percentage(totals.wins, totals.count),
    })
    .collect()
}
