// In crates/database/src/postgres.rs

use analytics::TradeFilter;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use core_types::{Direction, Session, Trade, TradeStatus};
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, QueryBuilder};
use std::collections::HashMap;

use crate::Db;
use crate::error::{Error, Result};
use crate::store::TradeStore;

const TRADE_COLUMNS: &str = "SELECT id::text AS id, user_id, account_id::text AS account_id, \
     strategy_id::text AS strategy_id, security, direction, entry_date, exit_date, session, \
     risk_amount, risk_reward_actual, pnl, is_winner, status FROM trades WHERE user_id = ";

/// A `trades` row as stored. Codes are parsed into domain enums afterwards.
#[derive(Debug, FromRow)]
struct TradeRow {
    id: String,
    user_id: String,
    account_id: Option<String>,
    strategy_id: Option<String>,
    security: String,
    direction: String,
    entry_date: DateTime<Utc>,
    exit_date: Option<DateTime<Utc>>,
    session: Option<String>,
    risk_amount: Option<Decimal>,
    risk_reward_actual: Option<Decimal>,
    pnl: Option<Decimal>,
    is_winner: Option<bool>,
    status: String,
}

impl TradeRow {
    fn into_trade(self) -> Result<Trade> {
        let invalid = |id: &str, source: core_types::Error| Error::InvalidRow { id: id.to_string(), source };

        let direction: Direction = self.direction.parse().map_err(|e| invalid(&self.id, e))?;
        let session: Option<Session> = self
            .session
            .as_deref()
            .map(str::parse::<Session>)
            .transpose()
            .map_err(|e| invalid(&self.id, e))?;
        let status: TradeStatus = self.status.parse().map_err(|e| invalid(&self.id, e))?;

        Ok(Trade {
            id: self.id,
            user_id: self.user_id,
            account_id: self.account_id,
            strategy_id: self.strategy_id,
            security: self.security,
            direction,
            entry_date: self.entry_date.fixed_offset(),
            exit_date: self.exit_date.map(|d| d.fixed_offset()),
            session,
            risk_amount: self.risk_amount,
            risk_reward_actual: self.risk_reward_actual,
            pnl: self.pnl,
            is_winner: self.is_winner,
            status,
        })
    }
}

/// Builds the trade query with every filter pushed into SQL.
fn trade_query<'a>(user_id: &str, filter: &TradeFilter) -> QueryBuilder<'a, Postgres> {
    let mut query = QueryBuilder::new(TRADE_COLUMNS);
    query.push_bind(user_id.to_string());

    if let Some(account_id) = &filter.account_id {
        query.push(" AND account_id::text = ").push_bind(account_id.clone());
    }
    if let Some(strategy_id) = &filter.strategy_id {
        query.push(" AND strategy_id::text = ").push_bind(strategy_id.clone());
    }
    if let Some(session) = filter.session {
        query.push(" AND session = ").push_bind(session.code());
    }
    if let Some(direction) = filter.direction {
        query.push(" AND direction = ").push_bind(direction.code());
    }
    if let Some(outcome) = filter.outcome {
        query.push(" AND is_winner = ").push_bind(outcome.is_winner());
    }
    if let Some(range) = filter.range {
        // Rows come back in UTC, so the wall clock compared here is the one
        // `TimeRange::contains` sees on the decoded trade.
        query
            .push(" AND (entry_date AT TIME ZONE 'UTC') >= ")
            .push_bind(range.starts_at())
            .push(" AND (entry_date AT TIME ZONE 'UTC') < ")
            .push_bind(range.ends_before());
    }

    query.push(" ORDER BY entry_date ASC, created_at ASC, id ASC");
    query
}

#[async_trait]
impl TradeStore for Db {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn fetch_trades(&self, user_id: &str, filter: &TradeFilter) -> Result<Vec<Trade>> {
        let rows: Vec<TradeRow> = trade_query(user_id, filter)
            .build_query_as()
            .fetch_all(self.pool())
            .await
            .map_err(Error::OperationFailed)?;

        tracing::debug!(user_id, rows = rows.len(), "Fetched trades.");
        rows.into_iter().map(TradeRow::into_trade).collect()
    }

    async fn strategy_names(&self, user_id: &str, ids: &[String]) -> Result<HashMap<String, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(String, String)> = sqlx::query_as(
            r#"
            SELECT id::text, name
            FROM strategies
            WHERE user_id = $1 AND id::text = ANY($2)
            "#,
        )
        .bind(user_id)
        .bind(ids)
        .fetch_all(self.pool())
        .await
        .map_err(Error::OperationFailed)?;

        Ok(rows.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::TimeRange;
    use chrono::NaiveDate;
    use core_types::Outcome;
    use sqlx::Execute;

    fn row(direction: &str, session: Option<&str>) -> TradeRow {
        TradeRow {
            id: "t-1".into(),
            user_id: "u-1".into(),
            account_id: None,
            strategy_id: Some("s-1".into()),
            security: "EURUSD".into(),
            direction: direction.into(),
            entry_date: "2024-12-20T09:30:00Z".parse().unwrap(),
            exit_date: None,
            session: session.map(str::to_string),
            risk_amount: None,
            risk_reward_actual: None,
            pnl: Some(Decimal::new(125, 2)),
            is_winner: Some(true),
            status: "closed".into(),
        }
    }

    #[test]
    fn test_row_converts_to_trade() {
        let trade = row("LONG", Some("LO")).into_trade().unwrap();
        assert_eq!(trade.direction, Direction::Long);
        assert_eq!(trade.session, Some(Session::London));
        assert_eq!(trade.entry_date.offset().local_minus_utc(), 0);
        assert_eq!(trade.strategy_id.as_deref(), Some("s-1"));
    }

    #[test]
    fn test_unknown_codes_are_invalid_rows() {
        let err = row("SIDEWAYS", None).into_trade().unwrap_err();
        assert!(matches!(err, Error::InvalidRow { ref id, .. } if id == "t-1"));

        let err = row("SHORT", Some("TOKYO")).into_trade().unwrap_err();
        assert!(matches!(err, Error::InvalidRow { .. }));
    }

    #[test]
    fn test_query_pushes_filters() {
        let filter = TradeFilter {
            account_id: Some("acc".into()),
            session: Some(Session::NewYork),
            direction: Some(Direction::Short),
            outcome: Some(Outcome::Loss),
            range: Some(TimeRange {
                start: NaiveDate::from_ymd_opt(2024, 12, 19).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 12, 20).unwrap(),
            }),
            ..Default::default()
        };
        let mut builder = trade_query("u-1", &filter);
        let sql = builder.build().sql().to_string();

        assert!(sql.contains("WHERE user_id = $1"));
        assert!(sql.contains("account_id::text = $2"));
        assert!(sql.contains("session = $3"));
        assert!(sql.contains("direction = $4"));
        assert!(sql.contains("is_winner = $5"));
        assert!(sql.contains("(entry_date AT TIME ZONE 'UTC') >= $6"));
        assert!(sql.contains("(entry_date AT TIME ZONE 'UTC') < $7"));
        assert!(!sql.contains("strategy_id::text ="));
        assert!(sql.ends_with("ORDER BY entry_date ASC, created_at ASC, id ASC"));
    }

    #[test]
    fn test_empty_filter_only_scopes_user() {
        let mut builder = trade_query("u-1", &TradeFilter::new());
        let sql = builder.build().sql().to_string();
        assert!(!sql.contains(" AND "));
    }
}
