use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

/// Parses a textual price through `Decimal`, so `"157.92"` lands on the f64
/// nearest to its decimal value. Scientific notation (`"1.5e2"`) is accepted.
pub fn parse_decimal_price(text: &str, field_name: &str) -> ChartResult<f64> {
    let trimmed = text.trim();
    let decimal = trimmed
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| ChartError::InvalidData(format!("{field_name} `{text}` is not numeric: {e}")))?;
    let value = decimal.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} `{text}` does not fit in f64"))
    })?;
    ensure_finite(value, field_name)
}

/// Parses a calendar date in ISO form (`YYYY-MM-DD`).
///
/// Timestamps such as `2019-03-14T00:00:00Z` are accepted and truncated to
/// their date part, matching payloads that carry full ISO datetimes.
pub fn parse_iso_date(input: &str) -> ChartResult<NaiveDate> {
    let trimmed = input.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| ChartError::InvalidData(format!("invalid ISO date `{input}`: {e}")))
}

pub fn ensure_finite(value: f64, field_name: &str) -> ChartResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ChartError::InvalidData(format!("{field_name} must be finite")))
    }
}
