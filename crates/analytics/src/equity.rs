use core_types::Trade;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::math::safe_div;
use crate::types::EquityPoint;

/// Builds the equity curve, one point per trade, in the order given.
///
/// The caller must pass trades sorted ascending by `entry_date`; this function
/// does not sort. Unsettled trades contribute zero P&L but still get a point.
pub fn build_equity_curve(trades: &[Trade], starting_capital: Decimal) -> Vec<EquityPoint> {
    let mut cumulative_pnl = Decimal::ZERO;

    trades
        .iter()
        .enumerate()
        .map(|(index, trade)| {
            let trade_pnl = trade.pnl_or_zero();
            cumulative_pnl = cumulative_pnl.saturating_add(trade_pnl);
            EquityPoint {
                trade_number: index as u32 + 1,
                trade_date: trade.entry_date,
                trade_pnl,
                cumulative_pnl,
                equity: starting_capital.saturating_add(cumulative_pnl),
            }
        })
        .collect()
}

/// Finds the largest fall of equity from a running peak.
///
/// The starting capital is the first peak. Returns the absolute drawdown and the
/// same drawdown as a percentage of the peak it was measured from.
pub fn max_drawdown(curve: &[EquityPoint], starting_capital: Decimal) -> (Decimal, Decimal) {
    let mut peak = starting_capital;
    let mut worst = Decimal::ZERO;
    let mut worst_pct = Decimal::ZERO;

    for point in curve {
        peak = peak.max(point.equity);
        let drawdown = peak.saturating_sub(point.equity);
        if drawdown > worst {
            worst = drawdown;
            worst_pct = if peak > Decimal::ZERO {
                safe_div(drawdown, peak).saturating_mul(dec!(100))
            } else {
                Decimal::ZERO
            };
        }
    }

    (worst, worst_pct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{arb_trades, settled, trade};
    use proptest::prelude::*;

    #[test]
    fn test_curve_accumulates_from_starting_capital() {
        let trades = vec![
            settled("1", "2024-12-20T10:00:00Z", dec!(10)),
            settled("2", "2024-12-20T11:00:00Z", dec!(-4)),
        ];
        let curve = build_equity_curve(&trades, dec!(100));

        assert_eq!(curve.len(), 2);
        assert_eq!(curve[0].trade_number, 1);
        assert_eq!(curve[0].cumulative_pnl, dec!(10));
        assert_eq!(curve[0].equity, dec!(110));
        assert_eq!(curve[1].trade_number, 2);
        assert_eq!(curve[1].trade_pnl, dec!(-4));
        assert_eq!(curve[1].cumulative_pnl, dec!(6));
        assert_eq!(curve[1].equity, dec!(106));
        assert_eq!(curve[1].trade_date, trades[1].entry_date);
    }

    #[test]
    fn test_unsettled_trade_keeps_equity_flat() {
        let trades = vec![
            settled("1", "2024-12-20T10:00:00Z", dec!(1.5)),
            trade("2", "2024-12-20T11:00:00Z", None, None),
        ];
        let curve = build_equity_curve(&trades, dec!(50));

        assert_eq!(curve[1].trade_pnl, Decimal::ZERO);
        assert_eq!(curve[1].equity, dec!(51.5));
    }

    #[test]
    fn test_builder_keeps_input_order() {
        let trades = vec![
            settled("late", "2024-12-22T10:00:00Z", dec!(1)),
            settled("early", "2024-12-20T10:00:00Z", dec!(2)),
        ];
        let curve = build_equity_curve(&trades, dec!(0));
        assert_eq!(curve[0].trade_date, trades[0].entry_date);
        assert_eq!(curve[0].equity, dec!(1));
    }

    #[test]
    fn test_max_drawdown_from_running_peak() {
        let trades = vec![
            settled("1", "2024-12-20T10:00:00Z", dec!(20)),
            settled("2", "2024-12-20T11:00:00Z", dec!(-30)),
            settled("3", "2024-12-20T12:00:00Z", dec!(5)),
            settled("4", "2024-12-20T13:00:00Z", dec!(-4)),
        ];
        let curve = build_equity_curve(&trades, dec!(100));
        // Peak 120, trough 90.
        let (drawdown, pct) = max_drawdown(&curve, dec!(100));
        assert_eq!(drawdown, dec!(30));
        assert_eq!(pct, dec!(25));
    }

    #[test]
    fn test_no_drawdown_on_empty_or_rising_curve() {
        assert_eq!(max_drawdown(&[], dec!(100)), (Decimal::ZERO, Decimal::ZERO));
        let curve = build_equity_curve(&[settled("1", "2024-12-20T10:00:00Z", dec!(3))], dec!(100));
        assert_eq!(max_drawdown(&curve, dec!(100)), (Decimal::ZERO, Decimal::ZERO));
    }

    proptest! {
        #[test]
        fn prop_equity_is_capital_plus_prefix_sum(trades in arb_trades(), capital in 0i64..1_000_000) {
            let capital = Decimal::new(capital, 2);
            let curve = build_equity_curve(&trades, capital);
            prop_assert_eq!(curve.len(), trades.len());

            let mut prefix = Decimal::ZERO;
            for (point, trade) in curve.iter().zip(&trades) {
                prefix += trade.pnl_or_zero();
                prop_assert_eq!(point.equity, capital + prefix);
            }
        }
    }
}
