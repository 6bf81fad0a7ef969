//! Defect Populations Over Time

use super::winding::{detect_vortices, DefectMetrics};
use super::PhaseField;

/// Detects vortices independently in every frame of a phase-field
/// trajectory. Purely a per-frame map; no state crosses frames.
pub fn track_defects_over_time(phase_history: &[PhaseField], threshold: f64) -> Vec<DefectMetrics> {
    phase_history
        .iter()
        .map(|phase| detect_vortices(phase, threshold))
        .collect()
}

/// Per-step defect annihilation rate, optionally smoothed.
///
/// The raw rate is the backward difference of defect counts,
/// `count[t-1] - count[t]` (positive while defects disappear). When
/// `window > 1` and enough samples exist, a centered moving average of
/// width `window` is applied by discrete convolution with zero-padded
/// edges. The result has the same length as the input; the first element
/// is 0, since t = 0 has no predecessor.
pub fn annihilation_rate(metrics_history: &[DefectMetrics], window: usize) -> Vec<f64> {
    let counts: Vec<f64> = metrics_history
        .iter()
        .map(|m| m.n_defects as f64)
        .collect();
    let n = counts.len();
    if n < 2 {
        return vec![0.0; n];
    }

    let mut rate = vec![0.0; n];
    for t in 1..n {
        rate[t] = counts[t - 1] - counts[t];
    }

    if window > 1 && n >= window {
        rate = smooth_centered(&rate, window);
        rate[0] = 0.0;
    }

    rate
}

/// Centered moving average of width `window`, matching discrete
/// convolution with a uniform kernel and zero-padded edges (the edge
/// averages keep the full-window denominator).
fn smooth_centered(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let half = (window - 1) / 2;

    (0..n)
        .map(|i| {
            let hi = i + half;
            let lo = hi.saturating_sub(window - 1);
            let sum: f64 = values[lo..=hi.min(n - 1)].iter().sum();
            sum / window as f64
        })
        .collect()
}
