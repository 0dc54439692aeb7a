//! Simple moving averages.

use pta_model::{DerivedOverlay, NormalizedSeries, SmaWindow};

/// Trailing arithmetic mean over `window` values.
///
/// Index `i` holds the mean of `values[i + 1 - window..=i]`. The first
/// `window - 1` positions are `None`; a window longer than the input yields
/// all `None`.
pub fn simple_moving_average(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let n = values.len();
    if window == 0 || n < window {
        return vec![None; n];
    }
    let mut result = vec![None; window - 1];
    result.extend(
        values
            .windows(window)
            .map(|slice| Some(slice.iter().sum::<f64>() / window as f64)),
    );
    result
}

/// Moving-average overlay of `series` for one window size.
pub fn compute_sma(series: &NormalizedSeries, window: SmaWindow) -> DerivedOverlay {
    let values = series.values();
    DerivedOverlay::new(window, simple_moving_average(&values, window.get()))
}
