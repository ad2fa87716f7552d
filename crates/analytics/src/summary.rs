use core_types::Trade;
use rust_decimal::Decimal;

use crate::math::{mean, percentage, safe_div};
use crate::types::{RiskMetrics, Summary};

/// Calculates the scalar summary for a set of trades.
///
/// Trades need not be sorted. An empty set yields an all-zero summary.
pub fn summarize(trades: &[Trade]) -> Summary {
    let mut summary = Summary::default();
    let mut win_pnl = Decimal::ZERO;
    let mut loss_pnl = Decimal::ZERO;
    let mut gross_profit = Decimal::ZERO;
    let mut gross_loss = Decimal::ZERO;
    let mut best: Option<Decimal> = None;
    let mut worst: Option<Decimal> = None;

    for trade in trades {
        summary.total_trades += 1;
        let pnl = trade.pnl_or_zero();
        summary.total_pnl = summary.total_pnl.saturating_add(pnl);
        summary.total_risk_reward = summary.total_risk_reward.saturating_add(trade.risk_reward_or_zero());

        match trade.is_winner {
            Some(true) => {
                summary.winning_trades += 1;
                win_pnl = win_pnl.saturating_add(pnl);
            }
            Some(false) => {
                summary.losing_trades += 1;
                loss_pnl = loss_pnl.saturating_add(pnl);
            }
            None => {}
        }

        if pnl > Decimal::ZERO {
            gross_profit = gross_profit.saturating_add(pnl);
        } else if pnl < Decimal::ZERO {
            gross_loss = gross_loss.saturating_add(pnl);
        }

        if let Some(value) = trade.pnl {
            best = Some(best.map_or(value, |b| b.max(value)));
            worst = Some(worst.map_or(value, |w| w.min(value)));
        }
    }

    summary.decided_trades = summary.winning_trades + summary.losing_trades;
    summary.win_rate = percentage(summary.winning_trades, summary.total_trades);
    summary.decided_win_rate = percentage(summary.winning_trades, summary.decided_trades);
    summary.avg_win = mean(win_pnl, summary.winning_trades);
    summary.avg_loss = mean(loss_pnl, summary.losing_trades);
    summary.profit_factor = safe_div(gross_profit, gross_loss.abs());
    summary.best_trade = best.unwrap_or(Decimal::ZERO);
    summary.worst_trade = worst.unwrap_or(Decimal::ZERO);
    summary
}

/// Risk figures that only need the trades themselves.
///
/// The drawdown fields depend on the equity curve and are left at zero here;
/// see [`crate::equity::max_drawdown`].
pub fn risk_metrics(trades: &[Trade]) -> RiskMetrics {
    let mut total_risk = Decimal::ZERO;
    let mut with_risk = 0u32;
    let mut total_rr = Decimal::ZERO;

    for trade in trades {
        if let Some(risk) = trade.risk_amount {
            total_risk = total_risk.saturating_add(risk);
            with_risk += 1;
        }
        total_rr = total_rr.saturating_add(trade.risk_reward_or_zero());
    }

    RiskMetrics {
        total_risk,
        avg_risk_amount: mean(total_risk, with_risk),
        avg_risk_reward: mean(total_rr, trades.len() as u32),
        ..RiskMetrics::default()
    }
}
