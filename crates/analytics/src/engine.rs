// In crates/analytics/src/engine.rs

use core_types::Trade;
use rayon::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::breakdown::breakdown_by;
use crate::consistency::flagged_trades;
use crate::equity::{build_equity_curve, max_drawdown};
use crate::periods::{daily_pnl, monthly_pnl};
use crate::summary::{risk_metrics, summarize};
use crate::types::{Dimension, PerformanceReport};

/// Account size the equity curve starts from when none is configured.
pub const DEFAULT_STARTING_CAPITAL: Decimal = dec!(100);

/// Largest starting capital accepted from callers.
pub const MAX_STARTING_CAPITAL: Decimal = dec!(1_000_000_000_000);

/// Validates a caller-supplied starting capital.
///
/// The capital must be non-negative and at most [`MAX_STARTING_CAPITAL`].
pub fn check_starting_capital(value: Decimal) -> Result<Decimal, String> {
    if value < Decimal::ZERO {
        return Err(format!("starting capital must not be negative, got {value}"));
    }
    if value > MAX_STARTING_CAPITAL {
        return Err(format!("starting capital must be at most {MAX_STARTING_CAPITAL}, got {value}"));
    }
    Ok(value)
}

/// Knobs for a report run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub starting_capital: Decimal,
    /// Which breakdowns to compute. Duplicates are ignored.
    pub dimensions: Vec<Dimension>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            starting_capital: DEFAULT_STARTING_CAPITAL,
            dimensions: Dimension::ALL.to_vec(),
        }
    }
}

/// The engine responsible for calculating performance reports from journal trades.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    config: ReportConfig,
}

impl AnalyticsEngine {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// A copy of this engine with a different starting capital.
    pub fn with_starting_capital(&self, starting_capital: Decimal) -> Self {
        Self {
            config: ReportConfig {
                starting_capital,
                ..self.config.clone()
            },
        }
    }

    /// Calculates a full performance report.
    ///
    /// Trades may arrive in any order; they are stably sorted by entry date
    /// first, so trades sharing a timestamp keep their relative order.
    /// `strategy_names` maps strategy ids to display names for the strategy
    /// breakdown.
    pub fn calculate(
        &self,
        trades: &[Trade],
        strategy_names: &HashMap<String, String>,
    ) -> PerformanceReport {
        let mut sorted = trades.to_vec();
        sorted.sort_by_key(|t| t.entry_date);
        let starting_capital = self.config.starting_capital;

        // --- Scalar statistics ---
        let summary = summarize(&sorted);
        let equity_curve = build_equity_curve(&sorted, starting_capital);
        let mut risk = risk_metrics(&sorted);
        (risk.max_drawdown, risk.max_drawdown_pct) = max_drawdown(&equity_curve, starting_capital);

        // --- Breakdowns ---
        let mut dimensions = self.config.dimensions.clone();
        dimensions.sort();
        dimensions.dedup();
        let breakdowns: BTreeMap<_, _> = dimensions
            .par_iter()
            .map(|&dimension| (dimension, breakdown_by(dimension, &sorted, strategy_names)))
            .collect();

        // --- Data quality ---
        let flagged: Vec<String> = flagged_trades(&sorted).into_iter().map(|t| t.id.clone()).collect();
        if !flagged.is_empty() {
            tracing::warn!(
                count = flagged.len(),
                trades = ?flagged,
                "Trades have a win/loss flag that contradicts their P&L."
            );
        }

        let report = PerformanceReport {
            starting_capital,
            summary,
            risk,
            daily_pnl: daily_pnl(&sorted),
            monthly_pnl: monthly_pnl(&sorted),
            equity_curve,
            breakdowns,
            flagged_trades: flagged,
        };
        tracing::debug!(
            trades = report.summary.total_trades,
            days = report.daily_pnl.len(),
            total_pnl = %report.summary.total_pnl,
            "Performance report calculated."
        );
        report
    }
}
