use crate::error::{ChartError, ChartResult};

/// Trailing simple moving average over `values`.
///
/// Entry `i` is `None` while fewer than `window_len` samples are available and
/// the mean of `values[i + 1 - window_len..=i]` afterwards. The running sum is
/// updated incrementally, so the whole series costs O(n).
pub fn simple_moving_average(window_len: usize, values: &[f64]) -> ChartResult<Vec<Option<f64>>> {
    simple_moving_average_by(window_len, values, |value| *value)
}

/// Same as [`simple_moving_average`] but reads each sample through `value_of`.
pub fn simple_moving_average_by<T, F>(
    window_len: usize,
    items: &[T],
    value_of: F,
) -> ChartResult<Vec<Option<f64>>>
where
    F: Fn(&T) -> f64,
{
    if window_len == 0 {
        return Err(ChartError::InvalidArgument(
            "moving average window length must be > 0".to_owned(),
        ));
    }

    let divisor = window_len as f64;
    let mut averages = Vec::with_capacity(items.len());
    let mut sum = 0.0;

    for (index, item) in items.iter().enumerate() {
        sum += value_of(item);

        let filled = index + 1;
        if filled < window_len {
            averages.push(None);
            continue;
        }
        if filled > window_len {
            sum -= value_of(&items[index - window_len]);
        }
        averages.push(Some(sum / divisor));
    }

    Ok(averages)
}
