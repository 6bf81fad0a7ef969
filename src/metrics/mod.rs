//! Criticality Metrics: Quantifying the Order/Chaos Axis
//!
//! Four analyzers score a trajectory along the axis from frozen to
//! chaotic dynamics:
//!
//! - **Entropy**: distributional and spatial-pattern complexity of states
//! - **Sensitivity**: divergence of nearby trajectories (Hamming probes,
//!   Lyapunov estimate, time-lagged mutual information)
//! - **Memory**: attractor detection, cycle periods, recurrence statistics
//! - **Edge score**: composite aggregation peaked at empirically chosen
//!   critical targets
//!
//! All analyzers are pure functions over immutable snapshots; they share
//! no state and may run concurrently on independent trajectories. Every
//! degenerate input (trajectory shorter than 2, empty windows, vanishing
//! normalizers) maps to a documented neutral value rather than an error.

mod edge_score;
mod entropy;
mod memory;
mod sensitivity;

pub use edge_score::{
    composite_edge_metric, composite_edge_metric_with_probe, edge_of_chaos_score,
    lambda_parameter_estimate, lambda_parameter_estimate_stacked, CompositeConfig,
    CompositeEdgeMetrics, EdgeScoreConfig,
};
pub use entropy::{
    activity_level, shannon_entropy, shannon_entropy_pooled, spatial_entropy, temporal_entropy,
};
pub use memory::{
    attractor_analysis, detect_cycle, memory_score, return_time_statistics, AttractorClass,
    AttractorConfig, AttractorResult, ReturnTimeStats,
};
pub use sensitivity::{
    hamming_distance, hamming_sensitivity, lyapunov_exponent, mutual_information,
};

/// Population standard deviation (n in the denominator, not n - 1).
pub(crate) fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::population_std;

    #[test]
    fn test_population_std() {
        assert_eq!(population_std(&[]), 0.0);
        assert_eq!(population_std(&[3.0]), 0.0);
        // Var([1, 3]) = 1 with population normalization
        assert!((population_std(&[1.0, 3.0]) - 1.0).abs() < 1e-12);
    }
}
