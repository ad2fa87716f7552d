// In crates/analytics/src/format.rs

//! Display helpers for report figures. Amounts round half away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Inserts thousands separators into a string of ASCII digits.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn unsigned_currency(value: Decimal) -> String {
    let text = format!("{:.2}", round(value.abs(), 2));
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("${}.{}", group_thousands(whole), cents)
}

/// `$1,234.50`, or `-$1,234.50` for negative amounts.
pub fn format_currency(value: Decimal) -> String {
    let rounded = round(value, 2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}", unsigned_currency(rounded))
    } else {
        unsigned_currency(rounded)
    }
}

/// Like [`format_currency`] but always signed: `+$1.25`, `-$0.45`. Zero has no sign.
pub fn format_pnl(value: Decimal) -> String {
    let rounded = round(value, 2);
    if rounded > Decimal::ZERO {
        format!("+{}", unsigned_currency(rounded))
    } else {
        format_currency(rounded)
    }
}

/// `+12.50%`, `-3.00%`, `0.00%`.
pub fn format_percent(value: Decimal) -> String {
    let rounded = round(value, 2);
    if rounded > Decimal::ZERO {
        format!("+{rounded:.2}%")
    } else if rounded.is_zero() {
        "0.00%".to_string()
    } else {
        format!("{rounded:.2}%")
    }
}

/// Realized R with one decimal: `2.1R`.
pub fn format_risk_reward(value: Decimal) -> String {
    let rounded = round(value, 1);
    if rounded.is_zero() {
        "0.0R".to_string()
    } else {
        format!("{rounded:.1}R")
    }
}
