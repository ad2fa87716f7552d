// In crates/core-types/src/types.rs

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Timelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// The side a trade was taken on.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// The code stored in the journal (`LONG` / `SHORT`).
    pub fn code(&self) -> &'static str {
        match self {
            Direction::Long => "LONG",
            Direction::Short => "SHORT",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Long => "Long",
            Direction::Short => "Short",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LONG" => Ok(Direction::Long),
            "SHORT" => Ok(Direction::Short),
            _ => Err(Error::InvalidDirection(s.to_string())),
        }
    }
}

/// A coarse time-of-day bucket a trade was opened in.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Session {
    #[serde(rename = "AS")]
    Asian,
    #[serde(rename = "LO")]
    London,
    #[serde(rename = "NY")]
    NewYork,
    #[serde(rename = "OTHER")]
    Other,
}

impl Session {
    pub const ALL: [Session; 4] = [Session::Asian, Session::London, Session::NewYork, Session::Other];

    /// The short code stored in the journal (`AS`, `LO`, `NY`, `OTHER`).
    pub fn code(&self) -> &'static str {
        match self {
            Session::Asian => "AS",
            Session::London => "LO",
            Session::NewYork => "NY",
            Session::Other => "OTHER",
        }
    }

    /// The human-readable name shown next to session statistics.
    pub fn label(&self) -> &'static str {
        match self {
            Session::Asian => "Asian",
            Session::London => "London",
            Session::NewYork => "New York",
            Session::Other => "Other",
        }
    }

    /// Derives the session from the UTC hour a trade was opened at.
    ///
    /// Asian covers 00:00-08:00 UTC, London 08:00-13:00 and New York 13:00-22:00.
    /// Anything later falls into `Other`.
    pub fn from_entry_time<Tz: TimeZone>(entry: &DateTime<Tz>) -> Self {
        match entry.with_timezone(&Utc).hour() {
            0..8 => Session::Asian,
            8..13 => Session::London,
            13..22 => Session::NewYork,
            _ => Session::Other,
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Session {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AS" => Ok(Session::Asian),
            "LO" => Ok(Session::London),
            "NY" => Ok(Session::NewYork),
            "OTHER" => Ok(Session::Other),
            _ => Err(Error::InvalidSession(s.to_string())),
        }
    }
}

/// Lifecycle state of a journal entry.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Open,
    #[default]
    Closed,
    Cancelled,
}

impl TradeStatus {
    pub fn code(&self) -> &'static str {
        match self {
            TradeStatus::Open => "open",
            TradeStatus::Closed => "closed",
            TradeStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for TradeStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(TradeStatus::Open),
            "closed" => Ok(TradeStatus::Closed),
            "cancelled" => Ok(TradeStatus::Cancelled),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// Which side of the recorded win/loss flag a filter keeps.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    /// The `is_winner` value this outcome selects.
    pub fn is_winner(&self) -> bool {
        matches!(self, Outcome::Win)
    }
}

impl FromStr for Outcome {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "win" | "winners" => Ok(Outcome::Win),
            "loss" | "losers" => Ok(Outcome::Loss),
            _ => Err(Error::InvalidOutcome(s.to_string())),
        }
    }
}

/// A single journal entry as read from the record store.
///
/// `entry_date` keeps the UTC offset it was recorded with; calendar grouping
/// uses the date in that offset and never converts it.
///
/// `is_winner` is stored independently of `pnl` and is trusted as-is. A trade
/// with no `pnl` yet (still open, or not settled) usually has no flag either.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Trade {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub strategy_id: Option<String>,
    #[serde(default)]
    pub security: String,
    pub direction: Direction,
    pub entry_date: DateTime<FixedOffset>,
    #[serde(default)]
    pub exit_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub risk_amount: Option<Decimal>,
    #[serde(default)]
    pub risk_reward_actual: Option<Decimal>,
    #[serde(default)]
    pub pnl: Option<Decimal>,
    #[serde(default)]
    pub is_winner: Option<bool>,
    #[serde(default)]
    pub status: TradeStatus,
}

impl Trade {
    /// Creates a closed trade with only the required fields set.
    pub fn new(id: impl Into<String>, direction: Direction, entry_date: DateTime<FixedOffset>) -> Self {
        Self {
            id: id.into(),
            user_id: String::new(),
            account_id: None,
            strategy_id: None,
            security: String::new(),
            direction,
            entry_date,
            exit_date: None,
            session: None,
            risk_amount: None,
            risk_reward_actual: None,
            pnl: None,
            is_winner: None,
            status: TradeStatus::Closed,
        }
    }

    /// P&L with an unsettled trade counted as zero.
    pub fn pnl_or_zero(&self) -> Decimal {
        self.pnl.unwrap_or(Decimal::ZERO)
    }

    /// Realized R multiple with a missing value counted as zero.
    pub fn risk_reward_or_zero(&self) -> Decimal {
        self.risk_reward_actual.unwrap_or(Decimal::ZERO)
    }

    /// The calendar date of entry, in the offset the timestamp was recorded with.
    pub fn entry_day(&self) -> NaiveDate {
        self.entry_date.date_naive()
    }

    pub fn is_win(&self) -> bool {
        self.is_winner == Some(true)
    }

    pub fn is_loss(&self) -> bool {
        self.is_winner == Some(false)
    }
}
