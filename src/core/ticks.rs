use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::{ValueRange, ValueScale};
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_VALUE_TICK_STEP: f64 = 2.5;

/// First day-of-month (inclusive) eligible for the mid-month tick.
const MID_MONTH_FIRST_DAY: u32 = 14;
/// End (exclusive) of the mid-month tick window.
const MID_MONTH_END_DAY: u32 = 18;
/// Closest two value ticks may sit on the axis.
pub const MIN_VALUE_TICK_SPACING_PX: f64 = 10.0;

/// Labelled mark on the value axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueTick {
    pub pixel_y: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeTickKind {
    Month,
    Day,
}

/// Labelled mark on the time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeTick {
    pub pixel_x: f64,
    pub label: String,
    pub kind: TimeTickKind,
}

/// Value-axis ticks at every multiple of `step` inside `(range.min, range.max]`.
///
/// A degenerate range has no such multiple, so it yields a single tick at the
/// range value instead. When the multiples would sit closer than
/// [`MIN_VALUE_TICK_SPACING_PX`], only every n-th multiple of `step` is kept.
pub fn value_ticks(range: ValueRange, step: f64, scale: ValueScale) -> ChartResult<Vec<ValueTick>> {
    if !step.is_finite() || step <= 0.0 {
        return Err(ChartError::InvalidArgument(
            "value tick step must be finite and > 0".to_owned(),
        ));
    }

    if range.is_degenerate() {
        return Ok(vec![ValueTick {
            pixel_y: scale.value_to_pixel(range.min),
            value: range.min,
        }]);
    }

    // Smallest multiple above min, and the smallest multiple above max that
    // bounds the scan.
    let first = (range.min / step).floor() + 1.0;
    let stop = (range.max / step).floor() + 1.0;

    let (pixel_top, pixel_bottom) = scale.pixel_bounds();
    let max_ticks = ((pixel_bottom - pixel_top).abs() / MIN_VALUE_TICK_SPACING_PX)
        .floor()
        .max(1.0);
    let count = stop - first;
    let stride = if count > max_ticks {
        (count / max_ticks).ceil()
    } else {
        1.0
    };

    let mut ticks = Vec::new();
    let mut multiple = (first / stride).ceil() * stride;
    while multiple < stop {
        let value = multiple * step;
        ticks.push(ValueTick {
            pixel_y: scale.value_to_pixel(value),
            value,
        });
        let next = multiple + stride;
        // Past 2^53 adding the stride may not move the float.
        if next <= multiple {
            break;
        }
        multiple = next;
    }

    Ok(ticks)
}

/// Time-axis ticks for the visible dates, scanned in ascending order.
///
/// A month tick (`"Mon"`, or `"Jan, YYYY"`) is placed where the month differs
/// from the previous date's month; the first visible date only primes the
/// scan. After each month change, the first date with a day in `[14, 18)`
/// gets a two-digit day tick.
#[must_use]
pub fn time_ticks(points: &[(f64, NaiveDate)]) -> Vec<TimeTick> {
    let mut ticks = Vec::new();
    let mut prev_month: Option<u32> = None;
    let mut marked_for_month = true;

    for &(pixel_x, date) in points {
        let month = date.month();
        if prev_month != Some(month) {
            if prev_month.is_some() {
                ticks.push(TimeTick {
                    pixel_x,
                    label: month_label(date),
                    kind: TimeTickKind::Month,
                });
            }
            marked_for_month = false;
            prev_month = Some(month);
        }

        let day = date.day();
        if (MID_MONTH_FIRST_DAY..MID_MONTH_END_DAY).contains(&day) && !marked_for_month {
            ticks.push(TimeTick {
                pixel_x,
                label: format!("{day:02}"),
                kind: TimeTickKind::Day,
            });
            marked_for_month = true;
        }
    }

    ticks
}

fn month_label(date: NaiveDate) -> String {
    let abbr = date.format("%b");
    if date.month() == 1 {
        format!("{abbr}, {}", date.year())
    } else {
        abbr.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{MIN_VALUE_TICK_SPACING_PX, TimeTickKind, time_ticks, value_ticks};
    use crate::core::{ValueRange, ValueScale};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn value_ticks_cover_multiples_inside_range() {
        let range = ValueRange { min: 101.2, max: 108.9 };
        let scale = ValueScale::new(range, 0.0, 100.0).expect("scale");
        let values: Vec<f64> = value_ticks(range, 2.5, scale)
            .expect("ticks")
            .iter()
            .map(|tick| tick.value)
            .collect();
        assert_eq!(values, vec![102.5, 105.0, 107.5]);
    }

    #[test]
    fn value_ticks_exclude_min_multiple_and_include_max_multiple() {
        let range = ValueRange { min: 100.0, max: 105.0 };
        let scale = ValueScale::new(range, 0.0, 100.0).expect("scale");
        let values: Vec<f64> = value_ticks(range, 2.5, scale)
            .expect("ticks")
            .iter()
            .map(|tick| tick.value)
            .collect();
        assert_eq!(values, vec![102.5, 105.0]);
    }

    #[test]
    fn degenerate_range_emits_boundary_tick() {
        let range = ValueRange { min: 11.0, max: 11.0 };
        let scale = ValueScale::new(range, 0.0, 100.0).expect("scale");
        let ticks = value_ticks(range, 2.5, scale).expect("ticks");
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].value, 11.0);
        assert_eq!(ticks[0].pixel_y, 50.0);
    }

    #[test]
    fn dense_multiples_are_thinned_to_pixel_spacing() {
        let range = ValueRange { min: 0.0, max: 1e8 };
        let scale = ValueScale::new(range, 40.0, 560.0).expect("scale");
        let ticks = value_ticks(range, 2.5, scale).expect("ticks");

        assert!(!ticks.is_empty());
        assert!(ticks.len() <= 52, "{} ticks", ticks.len());
        for tick in &ticks {
            assert!(tick.value > 0.0 && tick.value <= 1e8);
            assert_eq!((tick.value / 2.5).fract(), 0.0);
        }
        for pair in ticks.windows(2) {
            assert!(pair[0].pixel_y - pair[1].pixel_y >= MIN_VALUE_TICK_SPACING_PX);
        }
    }

    #[test]
    fn huge_magnitudes_terminate() {
        let range = ValueRange { min: 1e17, max: 1e17 + 64.0 };
        let scale = ValueScale::new(range, 0.0, 100.0).expect("scale");
        let ticks = value_ticks(range, 1.0, scale).expect("ticks");
        assert!(ticks.len() <= 10);
    }

    #[test]
    fn invalid_step_is_rejected() {
        let range = ValueRange { min: 0.0, max: 1.0 };
        let scale = ValueScale::new(range, 0.0, 100.0).expect("scale");
        assert!(value_ticks(range, 0.0, scale).is_err());
        assert!(value_ticks(range, f64::NAN, scale).is_err());
    }

    #[test]
    fn first_visible_month_is_not_labelled() {
        let points = [(0.0, date(2019, 3, 12)), (8.0, date(2019, 3, 13))];
        assert!(time_ticks(&points).is_empty());
    }

    #[test]
    fn january_label_carries_year() {
        let points = [(0.0, date(2019, 12, 31)), (8.0, date(2020, 1, 2))];
        let ticks = time_ticks(&points);
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].label, "Jan, 2020");
        assert_eq!(ticks[0].kind, TimeTickKind::Month);
        assert_eq!(ticks[0].pixel_x, 8.0);
    }

    #[test]
    fn one_day_tick_per_month_in_mid_month_window() {
        let points = [
            (0.0, date(2019, 2, 28)),
            (1.0, date(2019, 3, 1)),
            (2.0, date(2019, 3, 14)),
            (3.0, date(2019, 3, 15)),
            (4.0, date(2019, 3, 18)),
        ];
        let labels: Vec<(String, TimeTickKind)> = time_ticks(&points)
            .into_iter()
            .map(|tick| (tick.label, tick.kind))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("Mar".to_owned(), TimeTickKind::Month),
                ("14".to_owned(), TimeTickKind::Day),
            ]
        );
    }
}
