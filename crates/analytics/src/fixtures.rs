//! Trade builders shared by the unit tests in this crate.

use chrono::{DateTime, Duration, FixedOffset};
use core_types::{Direction, Session, Trade};
use proptest::prelude::*;
use rust_decimal::Decimal;

pub(crate) fn at(ts: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(ts).unwrap()
}

/// A long trade with the given P&L and flag, entered at `ts`.
pub(crate) fn trade(id: &str, ts: &str, pnl: Option<Decimal>, is_winner: Option<bool>) -> Trade {
    let mut t = Trade::new(id, Direction::Long, at(ts));
    t.pnl = pnl;
    t.is_winner = is_winner;
    t
}

/// A settled trade flagged from the sign of its P&L; zero P&L stays unflagged.
pub(crate) fn settled(id: &str, ts: &str, pnl: Decimal) -> Trade {
    let flag = if pnl > Decimal::ZERO {
        Some(true)
    } else if pnl < Decimal::ZERO {
        Some(false)
    } else {
        None
    };
    trade(id, ts, Some(pnl), flag)
}

fn arb_trade(index: usize) -> impl Strategy<Value = Trade> {
    (
        0i64..45,
        0i64..24,
        proptest::option::of(-50_000i64..50_000),
        proptest::option::of(any::<bool>()),
        proptest::option::of(-500i64..500),
        proptest::option::of(1i64..10_000),
        proptest::option::of(prop::sample::select(vec!["s-a", "s-b", "s-c"])),
        proptest::option::of(prop::sample::select(Session::ALL.to_vec())),
        any::<bool>(),
    )
        .prop_map(move |(day, hour, pnl, flag, rr, risk, strategy, session, long)| {
            let entry = at("2024-01-01T00:00:00Z") + Duration::days(day) + Duration::hours(hour);
            let direction = if long { Direction::Long } else { Direction::Short };
            let mut t = Trade::new(format!("t{index}"), direction, entry);
            t.pnl = pnl.map(|cents| Decimal::new(cents, 2));
            t.is_winner = flag;
            t.risk_reward_actual = rr.map(|r| Decimal::new(r, 1));
            t.risk_amount = risk.map(|r| Decimal::new(r, 2));
            t.strategy_id = strategy.map(str::to_string);
            t.session = session;
            t
        })
}

/// Up to 40 arbitrary trades, sorted ascending by entry date.
pub(crate) fn arb_trades() -> impl Strategy<Value = Vec<Trade>> {
    (0usize..40)
        .prop_flat_map(|len| (0..len).map(arb_trade).collect::<Vec<_>>())
        .prop_map(|mut trades| {
            trades.sort_by_key(|t| t.entry_date);
            trades
        })
}
