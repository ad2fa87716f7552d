// In app/src/printer.rs

use analytics::format::{format_currency, format_percent, format_pnl, format_risk_reward};
use analytics::{GroupPerformance, PerformanceReport};

/// How many daily entries the text report shows, newest last.
pub const DAILY_ROWS: usize = 30;

/// Renders a report the way the dashboard lays it out.
pub fn render_report(report: &PerformanceReport) -> String {
    let mut out = String::new();
    let summary = &report.summary;
    let risk = &report.risk;

    out.push_str("\n--- Performance Summary ---\n");
    out.push_str(&format!(
        "  - Trades: {} | Wins: {} | Losses: {} | Win Rate: {:.2}% ({:.2}% of decided)\n",
        summary.total_trades,
        summary.winning_trades,
        summary.losing_trades,
        summary.win_rate,
        summary.decided_win_rate,
    ));
    out.push_str(&format!(
        "  - Total P&L: {} | Avg Win: {} | Avg Loss: {} | Profit Factor: {:.2}\n",
        format_pnl(summary.total_pnl),
        format_pnl(summary.avg_win),
        format_pnl(summary.avg_loss),
        summary.profit_factor,
    ));
    out.push_str(&format!(
        "  - Best: {} | Worst: {} | Total R: {}\n",
        format_pnl(summary.best_trade),
        format_pnl(summary.worst_trade),
        format_risk_reward(summary.total_risk_reward),
    ));

    let final_equity = report
        .equity_curve
        .last()
        .map_or(report.starting_capital, |p| p.equity);
    out.push_str("\n--- Risk ---\n");
    out.push_str(&format!(
        "  - Starting Capital: {} | Final Equity: {}\n",
        format_currency(report.starting_capital),
        format_currency(final_equity),
    ));
    out.push_str(&format!(
        "  - Total Risk: {} | Avg Risk: {} | Avg R: {} | Max Drawdown: {} ({})\n",
        format_currency(risk.total_risk),
        format_currency(risk.avg_risk_amount),
        format_risk_reward(risk.avg_risk_reward),
        format_currency(risk.max_drawdown),
        format_percent(-risk.max_drawdown_pct),
    ));

    for (dimension, groups) in &report.breakdowns {
        out.push_str(&format!("\n--- By {dimension} ---\n"));
        if groups.is_empty() {
            out.push_str("  (no trades)\n");
        }
        for group in groups {
            out.push_str(&render_group(group));
        }
    }

    out.push_str(&format!("\n--- Daily P&L (last {DAILY_ROWS} days traded) ---\n"));
    let skip = report.daily_pnl.len().saturating_sub(DAILY_ROWS);
    for day in report.daily_pnl.iter().skip(skip) {
        out.push_str(&format!(
            "  {} | {:>12} | {:>3} trades | {:>6.2}% wins\n",
            day.date,
            format_pnl(day.total_pnl),
            day.trade_count,
            day.win_rate,
        ));
    }

    if !report.flagged_trades.is_empty() {
        out.push_str(&format!(
            "\nWarning: win/loss flag contradicts P&L for trades: {}\n",
            report.flagged_trades.join(", ")
        ));
    }
    out
}

fn render_group(group: &GroupPerformance) -> String {
    format!(
        "  {:<20} | {:>3} trades | {:>6.2}% wins | {:>12} | avg {:>10} | {}\n",
        group.label,
        group.total_trades,
        group.win_rate,
        format_pnl(group.total_pnl),
        format_pnl(group.avg_pnl),
        format_risk_reward(group.avg_risk_reward),
    )
}
