use chrono::{Duration, NaiveDate};
use sma_chart::core::{
    DEFAULT_VALUE_TICK_STEP, TimeTickKind, ValueRange, ValueScale, time_ticks, value_ticks,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn daily(start: NaiveDate, days: i64) -> Vec<(f64, NaiveDate)> {
    (0..days)
        .map(|i| (10.0 + i as f64 * 8.0, start + Duration::days(i)))
        .collect()
}

#[test]
fn value_ticks_are_positioned_by_scale() {
    let range = ValueRange { min: 98.7, max: 106.1 };
    let scale = ValueScale::new(range, 40.0, 560.0).expect("scale");
    let ticks = value_ticks(range, DEFAULT_VALUE_TICK_STEP, scale).expect("ticks");

    let values: Vec<f64> = ticks.iter().map(|tick| tick.value).collect();
    assert_eq!(values, vec![100.0, 102.5, 105.0]);
    for tick in &ticks {
        assert_eq!(tick.pixel_y, scale.value_to_pixel(tick.value));
        assert!((40.0..=560.0).contains(&tick.pixel_y));
    }
}

#[test]
fn value_ticks_respect_custom_step() {
    let range = ValueRange { min: 0.5, max: 3.0 };
    let scale = ValueScale::new(range, 0.0, 100.0).expect("scale");
    let values: Vec<f64> = value_ticks(range, 1.0, scale)
        .expect("ticks")
        .iter()
        .map(|tick| tick.value)
        .collect();
    assert_eq!(values, vec![1.0, 2.0, 3.0]);
}

#[test]
fn narrow_non_degenerate_range_may_have_no_ticks() {
    let range = ValueRange { min: 101.0, max: 102.0 };
    let scale = ValueScale::new(range, 0.0, 100.0).expect("scale");
    assert!(value_ticks(range, 2.5, scale).expect("ticks").is_empty());
}

#[test]
fn degenerate_range_still_has_one_tick() {
    let range = ValueRange { min: 64.0, max: 64.0 };
    let scale = ValueScale::new(range, 40.0, 560.0).expect("scale");
    let ticks = value_ticks(range, 2.5, scale).expect("ticks");
    assert_eq!(ticks.len(), 1);
    assert_eq!(ticks[0].value, 64.0);
}

#[test]
fn three_months_of_daily_dates_get_month_and_mid_month_ticks() {
    let points = daily(date(2019, 1, 20), 80);
    let ticks = time_ticks(&points);
    let labels: Vec<&str> = ticks.iter().map(|tick| tick.label.as_str()).collect();

    // Jan 20 primes the scan; Feb 1 / Mar 1 / Apr 1 get month ticks and the
    // 14th of each following month gets a day tick.
    assert_eq!(labels, vec!["Feb", "14", "Mar", "14", "Apr"]);
    assert_eq!(ticks[0].kind, TimeTickKind::Month);
    assert_eq!(ticks[1].kind, TimeTickKind::Day);
}

#[test]
fn first_partial_month_can_receive_a_day_tick() {
    let points = daily(date(2019, 3, 10), 10);
    let ticks = time_ticks(&points);
    assert_eq!(ticks.len(), 1);
    assert_eq!(ticks[0].label, "14");
    assert_eq!(ticks[0].pixel_x, 10.0 + 4.0 * 8.0);
}

#[test]
fn day_tick_uses_first_date_in_window_when_14th_is_missing() {
    // Weekend gap: 13th then 16th.
    let points = [
        (0.0, date(2019, 6, 28)),
        (8.0, date(2019, 7, 1)),
        (16.0, date(2019, 7, 13)),
        (24.0, date(2019, 7, 16)),
        (32.0, date(2019, 7, 17)),
    ];
    let labels: Vec<String> = time_ticks(&points)
        .into_iter()
        .map(|tick| tick.label)
        .collect();
    assert_eq!(labels, vec!["Jul".to_owned(), "16".to_owned()]);
}

#[test]
fn month_skipping_window_is_not_labelled() {
    // 12th then 18th: no date inside [14, 18).
    let points = [(0.0, date(2019, 8, 12)), (8.0, date(2019, 8, 18))];
    assert!(time_ticks(&points).is_empty());
}

#[test]
fn year_boundary_uses_january_label_with_year() {
    let points = daily(date(2019, 12, 28), 6);
    let ticks = time_ticks(&points);
    assert_eq!(ticks.len(), 1);
    assert_eq!(ticks[0].label, "Jan, 2020");
}

#[test]
fn empty_input_yields_no_time_ticks() {
    assert!(time_ticks(&[]).is_empty());
}
