use std::str::FromStr;

use log::debug;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

/// Currency precision in decimal places.
pub const CENTS: u32 = 2;

/// Round to whole cents, half away from zero.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENTS, RoundingStrategy::MidpointAwayFromZero)
}

/// Largest amount accepted as input, in dollars. Anything above is treated
/// as malformed.
pub const MAX_AMOUNT_DOLLARS: i64 = 1_000_000_000_000;

pub fn max_amount() -> Decimal {
    Decimal::from(MAX_AMOUNT_DOLLARS)
}

/// Clamp a base amount to the non-negative cent grid.
pub fn normalize_amount(amount: Decimal) -> Decimal {
    if amount.is_sign_negative() || amount > max_amount() {
        debug!("Out of range amount {} normalized to 0", amount);
        return Decimal::ZERO;
    }
    round_cents(amount)
}

/// NaN, infinities, negatives and absurdly large values become 0.
pub fn normalize_f64(raw: f64) -> Decimal {
    if !raw.is_finite() || raw < 0.0 || raw > MAX_AMOUNT_DOLLARS as f64 {
        debug!("Invalid amount {} normalized to 0", raw);
        return Decimal::ZERO;
    }
    Decimal::from_f64(raw)
        .map(round_cents)
        .unwrap_or(Decimal::ZERO)
}

/// Parses user-typed amounts such as `"1250"`, `"$1,250.50"` or `" 12.5 "`.
/// Anything that is not a non-negative number becomes 0.
pub fn normalize_str(raw: &str) -> Decimal {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    match Decimal::from_str(&cleaned) {
        Ok(amount) => normalize_amount(amount),
        // Scientific notation and the like
        Err(_) => match cleaned.parse::<f64>() {
            Ok(value) => normalize_f64(value),
            Err(_) => {
                debug!("Non-numeric amount {:?} normalized to 0", raw);
                Decimal::ZERO
            }
        },
    }
}

/// An amount as it arrives from a form or JSON body: a number, a string,
/// or anything else (which counts as 0).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawAmount {
    pub fn normalize(&self) -> Decimal {
        match self {
            RawAmount::Number(value) => normalize_f64(*value),
            RawAmount::Text(text) => normalize_str(text),
            RawAmount::Other(value) => {
                debug!("Unsupported amount {} normalized to 0", value);
                Decimal::ZERO
            }
        }
    }
}

/// Normalize an optional raw amount; a missing field is 0.
pub fn normalize_raw(raw: Option<&RawAmount>) -> Decimal {
    raw.map(RawAmount::normalize).unwrap_or(Decimal::ZERO)
}

/// A value compared against a limit rather than charged. Unlike
/// [`normalize_raw`] there is no upper bound: values beyond the decimal
/// range saturate to `Decimal::MAX`. Missing, negative or non-numeric
/// input is still 0.
pub fn limit_value(raw: Option<&RawAmount>) -> Decimal {
    match raw {
        Some(RawAmount::Number(value)) => limit_value_f64(*value),
        Some(RawAmount::Text(text)) => {
            let cleaned: String = text
                .trim()
                .trim_start_matches('$')
                .chars()
                .filter(|c| *c != ',')
                .collect();
            match Decimal::from_str(&cleaned) {
                Ok(amount) if amount.is_sign_negative() => Decimal::ZERO,
                Ok(amount) => amount,
                Err(_) => cleaned.parse::<f64>().map(limit_value_f64).unwrap_or(Decimal::ZERO),
            }
        }
        Some(RawAmount::Other(_)) | None => Decimal::ZERO,
    }
}

fn limit_value_f64(raw: f64) -> Decimal {
    if raw.is_nan() || raw < 0.0 {
        return Decimal::ZERO;
    }
    Decimal::from_f64(raw).unwrap_or(Decimal::MAX)
}

/// Render dollars as `$1,234.56`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_cents(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{}", sign, grouped, cents)
}

/// Render a rate as a percentage: 0.025 -> `2.5%`.
pub fn format_percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}
