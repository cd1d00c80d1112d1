//! Display formatting for raw indexer values.
//!
//! Everything here is pure; callers pass `now` where time matters.

use alloy::primitives::U256;
use chrono::{DateTime, Utc};

// ============================================================================
// Hashes and addresses
// ============================================================================

/// `0x1234...abcd` style shortening. Short inputs are returned unchanged.
pub fn truncate_hash(hash: &str, start: usize, end: usize) -> String {
    let len = hash.chars().count();
    if len <= start + end {
        return hash.to_string();
    }
    let head: String = hash.chars().take(start).collect();
    let tail: String = hash.chars().skip(len - end).collect();
    format!("{head}...{tail}")
}

pub fn shorten_address(address: &str) -> String {
    truncate_hash(address, 6, 4)
}

fn is_hex_with_prefix(s: &str, digits: usize) -> bool {
    s.strip_prefix("0x")
        .is_some_and(|hex| hex.len() == digits && hex.bytes().all(|b| b.is_ascii_hexdigit()))
}

pub fn is_valid_address(s: &str) -> bool {
    is_hex_with_prefix(s, 40)
}

pub fn is_valid_transaction_hash(s: &str) -> bool {
    is_hex_with_prefix(s, 64)
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

pub fn is_valid_block_number(s: &str) -> bool {
    is_decimal(s)
}

// ============================================================================
// Time
// ============================================================================

pub fn now_unix() -> i64 {
    Utc::now().timestamp()
}

/// Relative time such as `5 minutes ago`, measured against the clock.
pub fn format_timestamp(ts: i64) -> String {
    format_timestamp_at(ts, now_unix())
}

pub fn format_timestamp_at(ts: i64, now: i64) -> String {
    let delta = now - ts;
    let distance = distance_words(delta.unsigned_abs());
    if delta >= 0 {
        format!("{distance} ago")
    } else {
        format!("in {distance}")
    }
}

fn distance_words(secs: u64) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;
    const MONTH: u64 = 30 * DAY;
    const YEAR: u64 = 365 * DAY;

    let rounded = |unit: u64| (secs + unit / 2) / unit;

    match secs {
        s if s < 45 => "less than a minute".to_string(),
        s if s < 90 => "1 minute".to_string(),
        s if s < 45 * MINUTE => format!("{} minutes", rounded(MINUTE)),
        s if s < 90 * MINUTE => "about 1 hour".to_string(),
        s if s < DAY => format!("about {} hours", rounded(HOUR)),
        s if s < 42 * HOUR => "1 day".to_string(),
        s if s < MONTH => format!("{} days", rounded(DAY)),
        s if s < 45 * DAY => "about 1 month".to_string(),
        s if s < YEAR => format!("{} months", rounded(MONTH)),
        s if s < 2 * YEAR => "about 1 year".to_string(),
        _ => format!("about {} years", secs / YEAR),
    }
}

/// Absolute UTC date for a unix timestamp in seconds.
pub fn format_full_date(ts: i64) -> String {
    match DateTime::from_timestamp(ts, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => ts.to_string(),
    }
}

/// Absolute UTC date for an RFC 3339 string; unparseable input is kept.
pub fn format_created_at(iso: &str) -> String {
    match DateTime::parse_from_rfc3339(iso) {
        Ok(dt) => format_full_date(dt.timestamp()),
        Err(_) => iso.to_string(),
    }
}

// ============================================================================
// Amounts
// ============================================================================

/// Scales a decimal integer string down by `decimals` and rounds half-up to
/// `places` fractional digits.
fn format_units_fixed(raw: &str, decimals: u32, places: u32) -> Option<String> {
    let raw = raw.trim();
    if !is_decimal(raw) {
        return None;
    }
    let value: U256 = raw.parse().ok()?;
    let ten = U256::from(10u8);
    let drop = ten.pow(U256::from(decimals - places));
    let half = drop / U256::from(2u8);
    let scaled = value.saturating_add(half) / drop;

    let unit = ten.pow(U256::from(places));
    let whole = scaled / unit;
    let frac = (scaled % unit).to_string();
    Some(format!("{whole}.{frac:0>width$}", width = places as usize))
}

/// Wei to ETH with four decimals. Unparseable input is returned as-is.
pub fn format_wei_to_eth(wei: &str) -> String {
    format_units_fixed(wei, 18, 4).unwrap_or_else(|| wei.to_string())
}

/// Wei to gwei with two decimals. Unparseable input is returned as-is.
pub fn format_gwei(wei: &str) -> String {
    format_units_fixed(wei, 9, 2).unwrap_or_else(|| wei.to_string())
}

// ============================================================================
// Numbers
// ============================================================================

/// Thousands separators: `1234567` becomes `1,234,567`.
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn format_gas(gas: u64) -> String {
    format_number(gas)
}

pub fn format_percentage(value: f64, total: f64) -> String {
    if total == 0.0 {
        return "0%".to_string();
    }
    format!("{:.2}%", value / total * 100.0)
}

// ============================================================================
// Pagination
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// Page buttons around `current`: first, last, `delta` neighbours on each
/// side, with ellipses over the gaps.
pub fn pagination_range(current: u32, total: u32, delta: u32) -> Vec<PageItem> {
    let mut items = vec![PageItem::Page(1)];

    if current.saturating_sub(delta) > 2 {
        items.push(PageItem::Ellipsis);
    }

    let low = current.saturating_sub(delta).max(2);
    let high = current.saturating_add(delta).min(total.saturating_sub(1));
    items.extend((low..=high).map(PageItem::Page));

    if current.saturating_add(delta) < total.saturating_sub(1) {
        items.push(PageItem::Ellipsis);
        items.push(PageItem::Page(total));
    } else if total > 1 {
        items.push(PageItem::Page(total));
    }

    items
}

/// Number of pages needed for `total` items, never less than one.
pub fn page_count(total: u64, page_size: u32) -> u32 {
    let pages = total.div_ceil(u64::from(page_size.max(1)));
    u32::try_from(pages).unwrap_or(u32::MAX).max(1)
}
