// In crates/analytics/src/breakdown.rs

use core_types::{Direction, Session, Trade};
use rust_decimal::Decimal;
use std::collections::{HashMap, hash_map::Entry};
use std::fmt::Display;
use std::hash::Hash;

use crate::math::{mean, percentage};
use crate::types::{Dimension, GroupPerformance};

/// Label used when a strategy id has no entry in the name lookup.
pub const UNKNOWN_STRATEGY: &str = "Unknown";

/// What to do with a trade whose grouping key is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingKey<K> {
    /// Leave the trade out of the breakdown.
    Exclude,
    /// Count the trade under this key.
    BucketAs(K),
}

#[derive(Debug, Default)]
struct GroupTotals {
    trades: u32,
    wins: u32,
    pnl: Decimal,
    risk_reward: Decimal,
}

/// Groups trades by an arbitrary key and summarises each group.
///
/// Groups come out in the order their key first appears in `trades`.
///
/// # Arguments
///
/// * `key_of`: Extracts the grouping key; `None` means the trade has no key.
/// * `missing`: Policy for trades without a key.
/// * `label_of`: Resolves the display label for a key.
pub fn breakdown<K, FK, FL>(
    trades: &[Trade],
    key_of: FK,
    missing: MissingKey<K>,
    label_of: FL,
) -> Vec<GroupPerformance>
where
    K: Eq + Hash + Clone + Display,
    FK: Fn(&Trade) -> Option<K>,
    FL: Fn(&K) -> String,
{
    let mut order: Vec<K> = Vec::new();
    let mut groups: HashMap<K, GroupTotals> = HashMap::new();

    for trade in trades {
        let key = match (key_of(trade), &missing) {
            (Some(key), _) => key,
            (None, MissingKey::BucketAs(fallback)) => fallback.clone(),
            (None, MissingKey::Exclude) => continue,
        };

        let totals = match groups.entry(key) {
            Entry::Occupied(slot) => slot.into_mut(),
            Entry::Vacant(slot) => {
                order.push(slot.key().clone());
                slot.insert(GroupTotals::default())
            }
        };
        totals.trades += 1;
        totals.pnl = totals.pnl.saturating_add(trade.pnl_or_zero());
        totals.risk_reward = totals.risk_reward.saturating_add(trade.risk_reward_or_zero());
        if trade.is_win() {
            totals.wins += 1;
        }
    }

    order
        .into_iter()
        .filter_map(|key| {
            let totals = groups.remove(&key)?;
            Some(GroupPerformance {
                key: key.to_string(),
                label: label_of(&key),
                total_trades: totals.trades,
                winning_trades: totals.wins,
                win_rate: percentage(totals.wins, totals.trades),
                total_pnl: totals.pnl,
                avg_pnl: mean(totals.pnl, totals.trades),
                avg_risk_reward: mean(totals.risk_reward, totals.trades),
            })
        })
        .collect()
}

/// Breaks trades down along one of the journal's dimensions.
///
/// * Strategy: trades without a strategy are left out; labels come from
///   `strategy_names`, falling back to [`UNKNOWN_STRATEGY`].
/// * Session: trades without a session are counted under `OTHER`.
/// * Direction: always present; labelled with the stored code.
pub fn breakdown_by(
    dimension: Dimension,
    trades: &[Trade],
    strategy_names: &HashMap<String, String>,
) -> Vec<GroupPerformance> {
    match dimension {
        Dimension::Strategy => breakdown(
            trades,
            |t| t.strategy_id.clone(),
            MissingKey::Exclude,
            |id: &String| {
                strategy_names
                    .get(id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_STRATEGY.to_string())
            },
        ),
        Dimension::Session => breakdown(
            trades,
            |t| t.session,
            MissingKey::BucketAs(Session::Other),
            |s: &Session| s.label().to_string(),
        ),
        Dimension::Direction => breakdown(
            trades,
            |t| Some(t.direction),
            MissingKey::Exclude,
            |d: &Direction| d.code().to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{arb_trades, settled};
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn with_strategy(id: &str, ts: &str, pnl: Decimal, strategy: Option<&str>) -> Trade {
        let mut t = settled(id, ts, pnl);
        t.strategy_id = strategy.map(str::to_string);
        t
    }

    #[test]
    fn test_strategy_breakdown() {
        let trades = vec![
            with_strategy("1", "2024-12-20T09:00:00Z", dec!(10), Some("A")),
            with_strategy("2", "2024-12-20T10:00:00Z", dec!(-2), Some("A")),
            with_strategy("3", "2024-12-20T11:00:00Z", dec!(4), Some("B")),
        ];
        let names = HashMap::from([("A".to_string(), "CCM + Trix".to_string())]);
        let groups = breakdown_by(Dimension::Strategy, &trades, &names);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "A");
        assert_eq!(groups[0].label, "CCM + Trix");
        assert_eq!(groups[0].total_trades, 2);
        assert_eq!(groups[0].total_pnl, dec!(8));
        assert_eq!(groups[0].avg_pnl, dec!(4));
        assert_eq!(groups[0].win_rate, dec!(50));
        assert_eq!(groups[1].key, "B");
        assert_eq!(groups[1].label, UNKNOWN_STRATEGY);
        assert_eq!(groups[1].total_trades, 1);
        assert_eq!(groups[1].total_pnl, dec!(4));
        assert_eq!(groups[1].avg_pnl, dec!(4));
    }

    #[test]
    fn test_strategy_breakdown_excludes_missing_ids() {
        let trades = vec![
            with_strategy("1", "2024-12-20T09:00:00Z", dec!(10), None),
            with_strategy("2", "2024-12-20T10:00:00Z", dec!(1), Some("A")),
        ];
        let groups = breakdown_by(Dimension::Strategy, &trades, &HashMap::new());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].total_pnl, dec!(1));
    }

    #[test]
    fn test_session_breakdown_buckets_missing_as_other() {
        let mut ny = settled("1", "2024-12-20T14:00:00Z", dec!(3));
        ny.session = Some(Session::NewYork);
        let mut other = settled("2", "2024-12-20T23:00:00Z", dec!(-1));
        other.session = Some(Session::Other);
        let unknown = settled("3", "2024-12-21T01:00:00Z", dec!(2));

        let groups = breakdown_by(Dimension::Session, &[ny, other, unknown], &HashMap::new());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "NY");
        assert_eq!(groups[0].label, "New York");
        assert_eq!(groups[1].key, "OTHER");
        assert_eq!(groups[1].label, "Other");
        assert_eq!(groups[1].total_trades, 2);
        assert_eq!(groups[1].total_pnl, dec!(1));
    }

    #[test]
    fn test_direction_breakdown_uses_raw_code() {
        let long = settled("1", "2024-12-20T14:00:00Z", dec!(3));
        let mut short = settled("2", "2024-12-20T15:00:00Z", dec!(-1));
        short.direction = Direction::Short;
        short.risk_reward_actual = Some(dec!(-1));

        let groups = breakdown_by(Dimension::Direction, &[long, short], &HashMap::new());
        assert_eq!(groups[0].label, "LONG");
        assert_eq!(groups[1].label, "SHORT");
        assert_eq!(groups[1].avg_risk_reward, dec!(-1));
        assert_eq!(groups[1].win_rate, Decimal::ZERO);
    }

    #[test]
    fn test_custom_key_extractor() {
        let trades = vec![
            settled("1", "2024-12-20T09:00:00Z", dec!(1)),
            settled("2", "2024-12-21T09:00:00Z", dec!(2)),
            settled("3", "2024-12-20T19:00:00Z", dec!(3)),
        ];
        let groups = breakdown(
            &trades,
            |t| Some(t.entry_day()),
            MissingKey::Exclude,
            |d: &NaiveDate| d.format("%b %-d").to_string(),
        );
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "Dec 20");
        assert_eq!(groups[0].total_pnl, dec!(4));
    }

    proptest! {
        #[test]
        fn prop_group_counts_cover_keyed_trades(trades in arb_trades()) {
            let names = HashMap::new();

            let strategy: u32 = breakdown_by(Dimension::Strategy, &trades, &names)
                .iter().map(|g| g.total_trades).sum();
            let keyed = trades.iter().filter(|t| t.strategy_id.is_some()).count();
            prop_assert_eq!(strategy as usize, keyed);

            let session: u32 = breakdown_by(Dimension::Session, &trades, &names)
                .iter().map(|g| g.total_trades).sum();
            prop_assert_eq!(session as usize, trades.len());

            let direction: u32 = breakdown_by(Dimension::Direction, &trades, &names)
                .iter().map(|g| g.total_trades).sum();
            prop_assert_eq!(direction as usize, trades.len());
        }
    }
}
