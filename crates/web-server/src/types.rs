// In crates/web-server/src/types.rs

use analytics::{AnalyticsEngine, TradeFilter, check_starting_capital, time_range};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Represents a paginated list of items.
/// This is a generic struct that can be used for any paginated API response.
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total_items: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T: Clone> PaginatedResponse<T> {
    /// Cuts one page out of `all`. Pages are 1-based; a page past the end is empty.
    pub fn from_slice(all: &[T], page: u32, page_size: u32) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let start = (page as usize - 1).saturating_mul(page_size as usize);
        let items = all.iter().skip(start).take(page_size as usize).cloned().collect();
        Self {
            items,
            total_items: all.len() as u64,
            page,
            page_size,
        }
    }
}

/// The dashboard query string (e.g., `?session=NY&range=30days&page=2`).
///
/// Every value arrives as text and is validated in [`ReportQuery::to_filter`].
/// `page` and `page_size` only apply to the trade listing.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub account_id: Option<String>,
    pub strategy_id: Option<String>,
    pub session: Option<String>,
    pub direction: Option<String>,
    pub outcome: Option<String>,
    /// Range token; an empty value means all time.
    pub range: Option<String>,
    pub starting_capital: Option<Decimal>,
    // `serde(default = ...)` provides a default value if the param is missing.
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

/// Empty query values are treated as absent.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ReportQuery {
    /// Validates the query into a trade filter. A missing `range` falls back to
    /// `default_range`; unrecognised range tokens mean all time.
    pub fn to_filter(&self, default_range: &str) -> Result<TradeFilter> {
        let range = self.range.as_deref().unwrap_or(default_range);
        Ok(TradeFilter {
            account_id: non_empty(&self.account_id).map(str::to_string),
            strategy_id: non_empty(&self.strategy_id).map(str::to_string),
            session: non_empty(&self.session).map(str::parse).transpose()?,
            direction: non_empty(&self.direction).map(str::parse).transpose()?,
            outcome: non_empty(&self.outcome).map(str::parse).transpose()?,
            range: time_range::resolve(range),
        })
    }

    /// The engine to report with: `base`, or a copy with the requested starting capital.
    pub fn engine(&self, base: &AnalyticsEngine) -> Result<AnalyticsEngine> {
        match self.starting_capital {
            Some(capital) => {
                let capital = check_starting_capital(capital).map_err(Error::BadRequest)?;
                Ok(base.with_starting_capital(capital))
            }
            None => Ok(base.clone()),
        }
    }
}

// Helper functions for serde defaults.
fn default_page() -> u32 { 1 }
fn default_page_size() -> u32 { 50 }
