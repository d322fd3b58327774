use approx::assert_relative_eq;
use sma_chart::ChartError;
use sma_chart::core::{simple_moving_average, simple_moving_average_by};

#[test]
fn twenty_day_average_over_twenty_five_closes() {
    let closes: Vec<f64> = (0..25).map(|i| 100.0 + f64::from(i)).collect();
    let averages = simple_moving_average(20, &closes).expect("sma");

    assert_eq!(averages.len(), 25);
    assert!(averages[..19].iter().all(Option::is_none));

    let expected_first = closes[..20].iter().sum::<f64>() / 20.0;
    assert_relative_eq!(averages[19].expect("filled"), expected_first, epsilon = 1e-9);
    assert_relative_eq!(averages[24].expect("filled"), 114.5, epsilon = 1e-9);
}

#[test]
fn window_longer_than_series_is_all_null() {
    let averages = simple_moving_average(10, &[1.0, 2.0, 3.0]).expect("sma");
    assert_eq!(averages, vec![None, None, None]);
}

#[test]
fn window_equal_to_series_fills_only_last_entry() {
    let averages = simple_moving_average(4, &[2.0, 4.0, 6.0, 8.0]).expect("sma");
    assert_eq!(averages, vec![None, None, None, Some(5.0)]);
}

#[test]
fn empty_series_yields_empty_average() {
    let averages = simple_moving_average(3, &[]).expect("sma");
    assert!(averages.is_empty());
}

#[test]
fn zero_window_is_invalid_argument() {
    let err = simple_moving_average(0, &[1.0, 2.0]).expect_err("zero window");
    assert!(matches!(err, ChartError::InvalidArgument(_)));
}

#[test]
fn average_never_looks_ahead() {
    let base = [5.0, 6.0, 7.0, 8.0, 9.0];
    let mut spiked = base;
    spiked[4] = 1_000.0;

    let a = simple_moving_average(3, &base).expect("sma");
    let b = simple_moving_average(3, &spiked).expect("sma");
    assert_eq!(a[..4], b[..4]);
    assert_ne!(a[4], b[4]);
}

#[test]
fn accessor_variant_matches_plain_variant() {
    struct Sample {
        close: f64,
    }
    let samples: Vec<Sample> = [3.0, 1.0, 4.0, 1.0, 5.0]
        .iter()
        .map(|&close| Sample { close })
        .collect();
    let closes: Vec<f64> = samples.iter().map(|sample| sample.close).collect();

    assert_eq!(
        simple_moving_average_by(2, &samples, |sample| sample.close).expect("by"),
        simple_moving_average(2, &closes).expect("plain")
    );
}
