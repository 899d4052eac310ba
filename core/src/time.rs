use chrono::{Duration, Local, NaiveDate};
use anyhow::{anyhow, Result};

use crate::model::day::HOURS_PER_DAY;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Canonical storage key for a day.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

pub fn parse_date_key(key: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), DATE_KEY_FORMAT)
        .map_err(|_| anyhow!("Invalid date key: '{}' (expected YYYY-MM-DD)", key))
}

/// Period covered by hour slot `hour`, e.g. `9 -> "0900 - 1000"`.
/// The last slot wraps to midnight: `23 -> "2300 - 0000"`.
pub fn hour_label(hour: usize) -> String {
    let next = (hour + 1) % HOURS_PER_DAY;
    format!("{:02}00 - {:02}00", hour, next)
}

pub fn parse_human_date(input: &str) -> Result<NaiveDate> {
    let today = Local::now().date_naive();
    parse_human_date_from(input, today)
}

/// Same as [`parse_human_date`] but relative to `today`.
pub fn parse_human_date_from(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();

    // 1. Reserved keywords
    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "yesterday" | "yes" => return Ok(today - Duration::days(1)),
        _ => {}
    }

    // 2. Relative format (-Nd)
    if let Some(rest) = input.strip_prefix('-') {
        if let Some(num_str) = rest.strip_suffix('d') {
            let count: i64 = num_str.parse().map_err(|_| anyhow!("Invalid relative format: {}", input))?;
            return Duration::try_days(count)
                .and_then(|d| today.checked_sub_signed(d))
                .ok_or_else(|| anyhow!("Date out of range: {}", input));
        }
        return Err(anyhow!("Unknown unit in relative date: {}", input));
    }

    // 3. Fallback to the key format
    parse_date_key(input).map_err(|_| anyhow!("Could not parse date: {}", input))
}
