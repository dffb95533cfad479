//! Fare composition: the rules for building a route's total price from its
//! named fee line items and discount, and for deriving the displayed
//! duration from the two times of day.
//!
//! Money is whole Rupiah held in `i64`; all arithmetic is integer so
//! repeated edits never accumulate floating-point drift.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer};

use crate::route::FeeItem;

/// Parse-or-default coercion applied to every money value entering the
/// core. Admin forms submit amounts as numbers, numeric strings, blank, or
/// a pasted display string ("Rp 1.500.000"); anything that does not parse
/// is a 0, never an error.
pub fn amount_or_zero(value: &serde_json::Value) -> i64 {
    match value {
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else {
                n.as_f64().map(|f| f.trunc() as i64).unwrap_or(0)
            }
        }
        serde_json::Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
                .unwrap_or_else(|| layang_shared::parse_rupiah(s))
        }
        _ => 0,
    }
}

/// serde adapter so fee/discount/price fields share the same coercion.
pub fn lenient_amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(amount_or_zero(&value))
}

/// Authoritative total for a route: sum of fee amounts minus the discount.
/// No floor at zero: a discount exceeding the fee subtotal yields a
/// negative total, preserved as-is pending a product decision.
pub fn compute_total_price(fees: &[FeeItem], discount: i64) -> i64 {
    let subtotal: i64 = fees.iter().map(|fee| fee.amount).sum();
    subtotal - discount
}

/// Accepts "HH:MM", "HH:MM:SS", or a datetime string carrying a time part
/// after 'T' (the store historically held times as 1970-01-01 datetimes).
pub fn parse_time_of_day(input: &str) -> Option<NaiveTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let time_part = match input.split_once('T') {
        Some((_, rest)) => rest.trim_end_matches('Z'),
        None => input,
    };

    NaiveTime::parse_from_str(time_part, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time_part, "%H:%M:%S"))
        .or_else(|_| NaiveTime::parse_from_str(time_part, "%H:%M:%S%.f"))
        .ok()
}

/// Time of day as fractional hours (e.g. "08:30" -> 8.5), the unit the
/// departure-time filter window is expressed in.
pub fn fractional_hours(input: &str) -> Option<f64> {
    let t = parse_time_of_day(input)?;
    Some(t.hour() as f64 + t.minute() as f64 / 60.0)
}

/// Derive the "{h}h {m}m" elapsed time between two times of day. An arrival
/// earlier than the departure means a next-day landing, so 24h is added
/// before subtracting. Returns an empty string when either side fails to
/// parse, matching the admin form's blank handling.
pub fn compute_duration(departure_time: &str, arrival_time: &str) -> String {
    let (Some(dep), Some(arr)) = (
        parse_time_of_day(departure_time),
        parse_time_of_day(arrival_time),
    ) else {
        return String::new();
    };

    let dep_minutes = (dep.hour() * 60 + dep.minute()) as i64;
    let arr_minutes = (arr.hour() * 60 + arr.minute()) as i64;

    let mut delta = arr_minutes - dep_minutes;
    if delta < 0 {
        delta += 24 * 60;
    }

    format!("{}h {}m", delta / 60, delta % 60)
}

/// Parse a stored "{h}h {m}m" duration back into minutes for the fastest
/// sort. Malformed or empty input parses to 0, which sorts such routes
/// first; accepted as a documented quirk rather than an error.
pub fn duration_minutes(duration: &str) -> i64 {
    let Some((hours_part, rest)) = duration.split_once('h') else {
        return 0;
    };
    let hours = hours_part.trim().parse::<i64>().unwrap_or(0);
    let minutes = rest
        .trim()
        .trim_end_matches('m')
        .trim()
        .parse::<i64>()
        .unwrap_or(0);
    hours * 60 + minutes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fees(amounts: &[i64]) -> Vec<FeeItem> {
        amounts
            .iter()
            .enumerate()
            .map(|(i, &a)| FeeItem::new(format!("Fee {}", i + 1), a))
            .collect()
    }

    #[test]
    fn total_is_fee_sum_minus_discount() {
        assert_eq!(
            compute_total_price(&fees(&[100_000, 50_000]), 20_000),
            130_000
        );
    }

    #[test]
    fn empty_fee_list_with_zero_discount_is_zero() {
        assert_eq!(compute_total_price(&[], 0), 0);
    }

    #[test]
    fn discount_larger_than_subtotal_goes_negative() {
        assert_eq!(compute_total_price(&fees(&[10_000]), 50_000), -40_000);
    }

    #[test]
    fn coercion_defaults_malformed_amounts_to_zero() {
        assert_eq!(amount_or_zero(&serde_json::json!(125_000)), 125_000);
        assert_eq!(amount_or_zero(&serde_json::json!("125000")), 125_000);
        assert_eq!(amount_or_zero(&serde_json::json!("125000.75")), 125_000);
        assert_eq!(amount_or_zero(&serde_json::json!("")), 0);
        assert_eq!(amount_or_zero(&serde_json::json!("abc")), 0);
        assert_eq!(amount_or_zero(&serde_json::Value::Null), 0);
    }

    #[test]
    fn coercion_accepts_pasted_display_strings() {
        assert_eq!(amount_or_zero(&serde_json::json!("Rp 1.500.000")), 1_500_000);
        assert_eq!(amount_or_zero(&serde_json::json!("Rp 950")), 950);
        assert_eq!(amount_or_zero(&serde_json::json!("Rp ")), 0);
    }

    #[test]
    fn same_day_duration() {
        assert_eq!(compute_duration("08:00", "10:30"), "2h 30m");
    }

    #[test]
    fn overnight_duration_wraps_around() {
        assert_eq!(compute_duration("23:00", "01:00"), "2h 0m");
    }

    #[test]
    fn zero_delta_duration() {
        assert_eq!(compute_duration("09:15", "09:15"), "0h 0m");
    }

    #[test]
    fn unparseable_time_yields_empty_duration() {
        assert_eq!(compute_duration("", "10:30"), "");
        assert_eq!(compute_duration("08:00", "later"), "");
    }

    #[test]
    fn parses_datetime_carried_times() {
        assert_eq!(
            parse_time_of_day("1970-01-01T08:45:00.000Z"),
            NaiveTime::from_hms_opt(8, 45, 0)
        );
        assert_eq!(fractional_hours("08:30"), Some(8.5));
        assert_eq!(fractional_hours("not a time"), None);
    }

    #[test]
    fn duration_round_trips_to_minutes() {
        assert_eq!(duration_minutes("2h 30m"), 150);
        assert_eq!(duration_minutes("0h 0m"), 0);
        assert_eq!(duration_minutes(""), 0);
        assert_eq!(duration_minutes("garbage"), 0);
    }
}
