//! Statistical helper functions for consumption series.
//!
//! Missing observations are `NaN` throughout the workspace; the `nan_*`
//! helpers skip them, the plain helpers expect complete data.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Mean absolute error between two equally long slices.
///
/// # Panics
///
/// Panics if the slices differ in length.
pub fn mean_absolute_error(predicted: &[f64], actual: &[f64]) -> f64 {
    assert_eq!(
        predicted.len(),
        actual.len(),
        "mean_absolute_error: length mismatch"
    );
    let diffs: Vec<f64> = predicted
        .iter()
        .zip(actual)
        .map(|(p, a)| (p - a).abs())
        .collect();
    mean(&diffs)
}

/// Linear-interpolation quantile (R type 7, the usual default elsewhere).
///
/// **Expects pre-sorted input** (caller's responsibility).
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn quantile_type7(sorted: &[f64], p: f64) -> f64 {
    assert!(
        !sorted.is_empty(),
        "quantile_type7: input must not be empty"
    );
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

/// Type-7 quantile of the non-missing values in `data` (any order).
///
/// Returns `None` when every value is `NaN`.
pub fn nan_quantile(data: &[f64], p: f64) -> Option<f64> {
    let mut present: Vec<f64> = data.iter().copied().filter(|v| !v.is_nan()).collect();
    if present.is_empty() {
        return None;
    }
    present.sort_by(f64::total_cmp);
    Some(quantile_type7(&present, p))
}

/// Clamp every present value into the `[lower_p, upper_p]` quantile band of
/// the series itself. `NaN` cells are left untouched.
///
/// Returns the `(lower, upper)` bounds that were applied, or `None` (and
/// leaves `data` unchanged) when the series has no present values.
pub fn clip_to_quantiles(data: &mut [f64], lower_p: f64, upper_p: f64) -> Option<(f64, f64)> {
    let lower = nan_quantile(data, lower_p)?;
    let upper = nan_quantile(data, upper_p)?;
    for v in data.iter_mut().filter(|v| !v.is_nan()) {
        *v = v.clamp(lower, upper);
    }
    Some((lower, upper))
}

/// A run of consecutive missing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NanStreak {
    /// Row of the first missing value in the run.
    pub start: usize,
    /// Number of consecutive missing values.
    pub len: usize,
}

/// Finds every run of consecutive `NaN` values, in row order.
pub fn nan_streaks(data: &[f64]) -> Vec<NanStreak> {
    let mut streaks = Vec::new();
    let mut current: Option<NanStreak> = None;

    for (i, v) in data.iter().enumerate() {
        if v.is_nan() {
            match current.as_mut() {
                Some(run) => run.len += 1,
                None => current = Some(NanStreak { start: i, len: 1 }),
            }
        } else if let Some(run) = current.take() {
            streaks.push(run);
        }
    }
    streaks.extend(current);
    streaks
}
