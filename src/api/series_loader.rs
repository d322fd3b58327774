use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::Bar;
use crate::core::primitives::{ensure_finite, parse_decimal_price, parse_iso_date};
use crate::error::{ChartError, ChartResult};

/// Handle for one in-flight series load.
///
/// Only the most recently issued ticket is applied; results for older
/// tickets are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadTicket {
    pub(super) generation: u64,
    pub(super) symbol: String,
}

impl LoadTicket {
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadOutcome {
    Applied { bar_count: usize },
    /// A newer load was started; the result was dropped.
    Stale,
    /// The source failed; the previous state is kept.
    Failed { reason: String },
}

/// Normalizes a user-entered symbol the way the history route does.
#[must_use]
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

/// Parses a history payload into bars.
///
/// Two shapes are accepted:
/// - an array of records: `[{"Date": "2019-01-02", "Close": 157.9, ...}]`
/// - a keyed document: `{"history": {"2019-01-02": {"close": "157.92"}}}`
///
/// Numeric fields may be JSON numbers or numeric strings. Keys are accepted
/// in either capitalized or lowercase form.
pub fn parse_history_json(input: &str) -> ChartResult<Vec<Bar>> {
    let payload: HistoryPayload = serde_json::from_str(input)
        .map_err(|e| ChartError::InvalidData(format!("failed to parse history payload: {e}")))?;

    match payload {
        HistoryPayload::Records(records) => records
            .into_iter()
            .map(|record| {
                let date = parse_iso_date(&record.date)?;
                record.fields.into_bar(date)
            })
            .collect(),
        HistoryPayload::Keyed { history } => history
            .into_iter()
            .map(|(date, fields)| fields.into_bar(parse_iso_date(&date)?))
            .collect(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HistoryPayload {
    Records(Vec<HistoryRecord>),
    Keyed {
        history: BTreeMap<String, PriceFields>,
    },
}

#[derive(Debug, Deserialize)]
struct HistoryRecord {
    #[serde(alias = "Date")]
    date: String,
    #[serde(flatten)]
    fields: PriceFields,
}

#[derive(Debug, Deserialize)]
struct PriceFields {
    #[serde(alias = "Close")]
    close: NumberOrText,
    #[serde(default, alias = "Open")]
    open: Option<NumberOrText>,
    #[serde(default, alias = "High")]
    high: Option<NumberOrText>,
    #[serde(default, alias = "Low")]
    low: Option<NumberOrText>,
}

impl PriceFields {
    fn into_bar(self, date: chrono::NaiveDate) -> ChartResult<Bar> {
        let bar = Bar::new(date, self.close.to_f64("close")?)?;
        let open = self.open.map(|value| value.to_f64("open")).transpose()?;
        let high = self.high.map(|value| value.to_f64("high")).transpose()?;
        let low = self.low.map(|value| value.to_f64("low")).transpose()?;

        match (open, high, low) {
            (Some(open), Some(high), Some(low)) => bar.with_ohlc(open, high, low),
            // Partial OHLC is kept as-is.
            (open, high, low) => Ok(Bar {
                open,
                high,
                low,
                ..bar
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn to_f64(&self, field_name: &str) -> ChartResult<f64> {
        match self {
            Self::Number(value) => ensure_finite(*value, field_name),
            Self::Text(text) => parse_decimal_price(text, field_name),
        }
    }
}
