// In crates/database/src/store.rs

use analytics::TradeFilter;
use async_trait::async_trait;
use core_types::Trade;
use std::collections::HashMap;

use crate::error::Result;

/// Where journal trades come from.
///
/// Implementations apply the filter themselves and return trades ascending by
/// `entry_date`. They never aggregate; all arithmetic happens in the analytics engine.
#[async_trait]
pub trait TradeStore: Send + Sync {
    /// The name of the store (e.g., "postgres", "memory").
    fn name(&self) -> &'static str;

    /// Fetches a user's trades matching `filter`, oldest first.
    async fn fetch_trades(&self, user_id: &str, filter: &TradeFilter) -> Result<Vec<Trade>>;

    /// Looks up display names for the given strategy ids.
    ///
    /// Ids with no matching strategy are simply absent from the result.
    async fn strategy_names(&self, user_id: &str, ids: &[String]) -> Result<HashMap<String, String>>;
}
