// In crates/database/src/report.rs

use analytics::{AnalyticsEngine, PerformanceReport, TradeFilter};
use std::collections::BTreeSet;

use crate::error::Result;
use crate::store::TradeStore;

/// Fetches a user's trades and turns them into a performance report.
///
/// Strategy names are looked up only for the strategy ids present in the fetched trades.
pub async fn build_report(
    store: &dyn TradeStore,
    engine: &AnalyticsEngine,
    user_id: &str,
    filter: &TradeFilter,
) -> Result<PerformanceReport> {
    let trades = store.fetch_trades(user_id, filter).await?;

    let strategy_ids: Vec<String> = trades
        .iter()
        .filter_map(|t| t.strategy_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let strategy_names = store.strategy_names(user_id, &strategy_ids).await?;

    tracing::info!(
        store = store.name(),
        user_id,
        trades = trades.len(),
        strategies = strategy_ids.len(),
        "Building performance report."
    );

    Ok(engine.calculate(&trades, &strategy_names))
}
