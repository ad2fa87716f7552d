// In crates/database/src/memory.rs

use analytics::TradeFilter;
use async_trait::async_trait;
use core_types::{StrategyRef, Trade};
use std::collections::HashMap;

use crate::error::Result;
use crate::store::TradeStore;

/// A `TradeStore` over trades already held in memory, such as a JSON export.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    trades: Vec<Trade>,
    strategies: Vec<StrategyRef>,
}

impl MemoryStore {
    pub fn new(trades: Vec<Trade>, strategies: Vec<StrategyRef>) -> Self {
        Self { trades, strategies }
    }

    /// Builds a store where every trade belongs to `user_id`, whatever it recorded.
    pub fn for_user(user_id: &str, mut trades: Vec<Trade>, strategies: Vec<StrategyRef>) -> Self {
        for trade in &mut trades {
            trade.user_id = user_id.to_string();
        }
        Self::new(trades, strategies)
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

#[async_trait]
impl TradeStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn fetch_trades(&self, user_id: &str, filter: &TradeFilter) -> Result<Vec<Trade>> {
        let mut trades: Vec<Trade> = self
            .trades
            .iter()
            .filter(|t| t.user_id == user_id && filter.matches(t))
            .cloned()
            .collect();
        trades.sort_by_key(|t| t.entry_date);
        Ok(trades)
    }

    async fn strategy_names(&self, _user_id: &str, ids: &[String]) -> Result<HashMap<String, String>> {
        Ok(self
            .strategies
            .iter()
            .filter(|s| ids.contains(&s.id))
            .map(|s| (s.id.clone(), s.name.clone()))
            .collect())
    }
}
