// In crates/analytics/src/lib.rs

//! The trade analytics engine.
//!
//! Turns a collection of journal trades into the statistics shown on the
//! dashboard: summary figures, the equity curve, daily and monthly P&L, and
//! per-strategy / per-session / per-direction breakdowns. Every function here
//! is a pure fold over its input; nothing performs I/O and nothing can fail.

pub mod breakdown;
pub mod consistency;
pub mod engine;
pub mod equity;
pub mod filter;
pub mod format;
pub mod periods;
pub mod summary;
pub mod time_range;
pub mod types;

mod math;

#[cfg(test)]
mod fixtures;

// Re-export the most important types for easy access.
pub use engine::{AnalyticsEngine, MAX_STARTING_CAPITAL, ReportConfig, check_starting_capital};
pub use filter::TradeFilter;
pub use time_range::{RangeToken, TimeRange};
pub use types::{
    DailyPnl, Dimension, EquityPoint, GroupPerformance, MonthlyPnl, PerformanceReport, RiskMetrics,
    Summary, WinRateBasis,
};
