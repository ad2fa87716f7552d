use core_types::{Direction, Outcome, Session, Trade};
use serde::{Deserialize, Serialize};

use crate::time_range::TimeRange;

/// The dashboard filters applied to a user's trades before analysis.
///
/// Every field is optional; an empty filter keeps everything. A session filter
/// only matches trades that recorded that session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeFilter {
    pub account_id: Option<String>,
    pub strategy_id: Option<String>,
    pub session: Option<Session>,
    pub direction: Option<Direction>,
    pub outcome: Option<Outcome>,
    pub range: Option<TimeRange>,
}

impl TradeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matches(&self, trade: &Trade) -> bool {
        if let Some(account_id) = &self.account_id {
            if trade.account_id.as_ref() != Some(account_id) {
                return false;
            }
        }
        if let Some(strategy_id) = &self.strategy_id {
            if trade.strategy_id.as_ref() != Some(strategy_id) {
                return false;
            }
        }
        if self.session.is_some() && trade.session != self.session {
            return false;
        }
        if let Some(direction) = self.direction {
            if trade.direction != direction {
                return false;
            }
        }
        if let Some(outcome) = self.outcome {
            if trade.is_winner != Some(outcome.is_winner()) {
                return false;
            }
        }
        if let Some(range) = &self.range {
            if !range.contains(&trade.entry_date) {
                return false;
            }
        }
        true
    }

    /// Returns the matching trades, keeping their order.
    pub fn apply(&self, trades: &[Trade]) -> Vec<Trade> {
        trades.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{settled, trade};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn journal() -> Vec<Trade> {
        let mut a = settled("a", "2024-12-18T09:00:00Z", dec!(2));
        a.account_id = Some("acc-1".into());
        a.strategy_id = Some("s-1".into());
        a.session = Some(Session::London);

        let mut b = settled("b", "2024-12-19T14:00:00Z", dec!(-1));
        b.account_id = Some("acc-2".into());
        b.direction = Direction::Short;
        b.session = Some(Session::NewYork);

        let c = trade("c", "2024-12-20T02:00:00Z", None, None);
        vec![a, b, c]
    }

    fn ids(trades: &[Trade]) -> Vec<&str> {
        trades.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let trades = journal();
        assert_eq!(ids(&TradeFilter::new().apply(&trades)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_field_filters() {
        let trades = journal();

        let by_account = TradeFilter { account_id: Some("acc-2".into()), ..Default::default() };
        assert_eq!(ids(&by_account.apply(&trades)), vec!["b"]);

        let by_strategy = TradeFilter { strategy_id: Some("s-1".into()), ..Default::default() };
        assert_eq!(ids(&by_strategy.apply(&trades)), vec!["a"]);

        let by_direction = TradeFilter { direction: Some(Direction::Long), ..Default::default() };
        assert_eq!(ids(&by_direction.apply(&trades)), vec!["a", "c"]);

        // A trade with no recorded session is not in the OTHER session for filtering.
        let by_session = TradeFilter { session: Some(Session::Other), ..Default::default() };
        assert!(by_session.apply(&trades).is_empty());
    }

    #[test]
    fn test_outcome_filter_skips_unflagged() {
        let trades = journal();
        let winners = TradeFilter { outcome: Some(Outcome::Win), ..Default::default() };
        assert_eq!(ids(&winners.apply(&trades)), vec!["a"]);
        let losers = TradeFilter { outcome: Some(Outcome::Loss), ..Default::default() };
        assert_eq!(ids(&losers.apply(&trades)), vec!["b"]);
    }

    #[test]
    fn test_range_filter() {
        let trades = journal();
        let range = TimeRange {
            start: NaiveDate::from_ymd_opt(2024, 12, 19).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 12, 20).unwrap(),
        };
        let filter = TradeFilter { range: Some(range), ..Default::default() };
        assert_eq!(ids(&filter.apply(&trades)), vec!["b", "c"]);
    }
}
