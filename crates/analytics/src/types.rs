// In crates/analytics/src/types.rs

use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Scalar statistics over a set of trades.
///
/// Counts of winners and losers follow the stored `is_winner` flag. Trades with
/// no flag count towards `total_trades` only, so they lower `win_rate`;
/// `decided_win_rate` is the same figure over flagged trades alone.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Summary {
    pub total_trades: u32,
    pub winning_trades: u32,
    pub losing_trades: u32,
    /// `winning_trades + losing_trades`.
    pub decided_trades: u32,
    /// Winners over all trades, in percent.
    pub win_rate: Decimal,
    /// Winners over decided trades, in percent.
    pub decided_win_rate: Decimal,
    pub total_pnl: Decimal,
    pub avg_win: Decimal,
    /// Signed; normally negative.
    pub avg_loss: Decimal,
    /// Gross profit over gross loss magnitude. Zero when there is no loss.
    pub profit_factor: Decimal,
    pub total_risk_reward: Decimal,
    pub best_trade: Decimal,
    pub worst_trade: Decimal,
}

/// Which denominator a win rate is computed over.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WinRateBasis {
    /// Every trade in the set, settled or not.
    #[default]
    Total,
    /// Only trades carrying a win/loss flag.
    Decided,
}

impl Summary {
    pub fn win_rate_for(&self, basis: WinRateBasis) -> Decimal {
        match basis {
            WinRateBasis::Total => self.win_rate,
            WinRateBasis::Decided => self.decided_win_rate,
        }
    }
}

/// Risk figures shown on the risk tab.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RiskMetrics {
    /// Sum of recorded risk amounts.
    pub total_risk: Decimal,
    /// Mean risk amount over trades that recorded one.
    pub avg_risk_amount: Decimal,
    /// Mean realized R over all trades, missing values counted as zero.
    pub avg_risk_reward: Decimal,
    /// Largest fall of equity from a running peak.
    pub max_drawdown: Decimal,
    /// That fall relative to the peak it started from, in percent.
    pub max_drawdown_pct: Decimal,
}

/// A point in the equity curve: the account after one more trade.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EquityPoint {
    pub trade_number: u32,
    pub trade_date: DateTime<FixedOffset>,
    pub trade_pnl: Decimal,
    pub cumulative_pnl: Decimal,
    pub equity: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyPnl {
    pub date: NaiveDate,
    pub total_pnl: Decimal,
    pub trade_count: u32,
    pub winning_trades: u32,
    pub win_rate: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyPnl {
    /// `YYYY-MM`.
    pub month: String,
    pub total_pnl: Decimal,
    pub trade_count: u32,
    pub winning_trades: u32,
    pub win_rate: Decimal,
}

/// Statistics for one group of a breakdown (one strategy, one session, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupPerformance {
    pub key: String,
    pub label: String,
    pub total_trades: u32,
    pub winning_trades: u32,
    pub win_rate: Decimal,
    pub total_pnl: Decimal,
    pub avg_pnl: Decimal,
    pub avg_risk_reward: Decimal,
}

/// A categorical field trades can be broken down by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Strategy,
    Session,
    Direction,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Strategy, Dimension::Session, Dimension::Direction];

    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Strategy => "strategy",
            Dimension::Session => "session",
            Dimension::Direction => "direction",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strategy" => Ok(Dimension::Strategy),
            "session" => Ok(Dimension::Session),
            "direction" => Ok(Dimension::Direction),
            other => Err(format!("unknown breakdown dimension `{other}`")),
        }
    }
}

/// Everything the dashboard needs, computed in one call.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PerformanceReport {
    pub starting_capital: Decimal,
    pub summary: Summary,
    pub risk: RiskMetrics,
    pub equity_curve: Vec<EquityPoint>,
    /// Oldest day first; days without trades are absent.
    pub daily_pnl: Vec<DailyPnl>,
    pub monthly_pnl: Vec<MonthlyPnl>,
    pub breakdowns: BTreeMap<Dimension, Vec<GroupPerformance>>,
    /// Ids of trades whose win/loss flag contradicts the sign of their P&L.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flagged_trades: Vec<String>,
}

impl PerformanceReport {
    /// Creates a new, empty report.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn breakdown(&self, dimension: Dimension) -> &[GroupPerformance] {
        self.breakdowns.get(&dimension).map(Vec::as_slice).unwrap_or(&[])
    }
}
