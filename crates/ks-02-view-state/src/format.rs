//! Display formatting for amounts and times.

use crate::errors::FormError;
use ks_01_chain_gateway::{Mist, MIST_PER_SUI};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// MIST as SUI with four decimals.
pub fn format_sui(mist: Mist) -> String {
    format!("{:.4}", mist as f64 / MIST_PER_SUI as f64)
}

/// Larger balances (u128) as SUI with four decimals.
pub fn format_sui_balance(mist: u128) -> String {
    format!("{:.4}", mist as f64 / MIST_PER_SUI as f64)
}

/// Parse a decimal SUI amount into MIST, rounding down.
pub fn sui_to_mist(input: &str) -> Result<Mist, FormError> {
    let trimmed = input.trim();
    let sui: f64 = trimmed
        .parse()
        .map_err(|_| FormError::InvalidPrice(trimmed.to_string()))?;
    if !sui.is_finite() || sui < 0.0 {
        return Err(FormError::InvalidPrice(trimmed.to_string()));
    }
    let mist = (sui * MIST_PER_SUI as f64).floor();
    if mist > u64::MAX as f64 {
        return Err(FormError::InvalidPrice(trimmed.to_string()));
    }
    Ok(mist as Mist)
}

/// Age of a millisecond timestamp: `Nd ago`, `Nh ago` or `Nm ago`.
///
/// Timestamps ahead of `now_ms` (fullnode clock skew) read as `0m ago`.
pub fn time_ago(timestamp_ms: u64, now_ms: u64) -> String {
    if timestamp_ms >= now_ms {
        return "0m ago".to_string();
    }
    let secs = (now_ms - timestamp_ms) / 1000;
    let days = secs / DAY;
    let hours = secs / HOUR;
    if days > 0 {
        format!("{days}d ago")
    } else if hours > 0 {
        format!("{hours}h ago")
    } else {
        format!("{}m ago", secs / MINUTE)
    }
}

/// Time left until `end_secs`: `Nd Nh left`, `Nh Nm left`, `Nm left` or `Ended`.
pub fn time_remaining(end_secs: u64, now_secs: u64) -> String {
    if end_secs <= now_secs {
        return "Ended".to_string();
    }
    let left = end_secs - now_secs;
    let days = left / DAY;
    let hours = (left % DAY) / HOUR;
    let minutes = (left % HOUR) / MINUTE;
    if days > 0 {
        format!("{days}d {hours}h left")
    } else if hours > 0 {
        format!("{hours}h {minutes}m left")
    } else {
        format!("{minutes}m left")
    }
}

/// Minimum voting window in words: `N hours` below a day, else `N day(s)`.
pub fn format_min_voting_period(secs: u64) -> String {
    let hours = secs / HOUR;
    if hours < 24 {
        return format!("{hours} hours");
    }
    let days = hours / 24;
    format!("{} day{}", days, if days == 1 { "" } else { "s" })
}
