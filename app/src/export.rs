// In app/src/export.rs

use anyhow::{Context, Result};
use core_types::{Session, StrategyRef, Trade};
use serde::Deserialize;
use std::path::Path;

/// A journal exported to JSON: `{ "trades": [...], "strategies": [{ "id", "name" }] }`.
#[derive(Debug, Deserialize)]
pub struct JournalExport {
    pub trades: Vec<Trade>,
    #[serde(default)]
    pub strategies: Vec<StrategyRef>,
}

impl JournalExport {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read export file {}", path.display()))?;
        let export: JournalExport = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse export file {}", path.display()))?;
        tracing::info!(
            trades = export.trades.len(),
            strategies = export.strategies.len(),
            "Journal export loaded."
        );
        Ok(export)
    }

    /// Fills in the session of trades that never recorded one, from their entry time.
    /// Returns how many trades were changed. Recorded sessions are left alone.
    pub fn infer_missing_sessions(&mut self) -> usize {
        let mut filled = 0;
        for trade in self.trades.iter_mut().filter(|t| t.session.is_none()) {
            trade.session = Some(Session::from_entry_time(&trade.entry_date));
            filled += 1;
        }
        filled
    }
}
