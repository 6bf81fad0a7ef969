//! Edge-of-Chaos Score: Composite Criticality Metric
//!
//! The edge-of-chaos regime sits between frozen order and full chaos and
//! is characterized by:
//!
//! - Moderate entropy (neither constant nor fully random)
//! - Moderate sensitivity to perturbation (some divergence, not extreme)
//! - Presence of non-trivial attractors (memory, but not a dead fixed point)
//! - Balanced activity (not frozen, not saturated)
//!
//! Each criterion is a Gaussian kernel peaked at an empirically chosen
//! target, and the composite is the geometric mean of the four terms:
//!
//!   edge = (E · S · M · A)^(1/4)
//!
//! The geometric mean is deliberate: one term near zero suppresses the
//! composite (AND-like combination) instead of being diluted away.
//!
//! All targets and widths live in [`EdgeScoreConfig`], so the operative
//! definition of "critical" is auditable and testable in isolation.

use ndarray::Array3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::entropy::{activity_level, shannon_entropy, spatial_entropy};
use super::memory::{attractor_analysis, memory_score, AttractorClass, AttractorConfig};
use super::population_std;
use super::sensitivity::{hamming_distance, hamming_sensitivity};
use crate::error::MetricError;
use crate::state::{from_stacked, Grid, StateEncoding};

/// Targets and kernel widths defining the critical point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EdgeScoreConfig {
    /// Target normalized entropy of the final state.
    pub target_entropy: f64,
    pub entropy_sigma: f64,
    /// Target Hamming sensitivity; optimum around 0.2-0.4 empirically.
    pub target_sensitivity: f64,
    pub sensitivity_sigma: f64,
    /// Target memory score; attractors present but not a bare fixed point.
    pub target_memory: f64,
    pub memory_sigma: f64,
    /// Target activity level of the final state.
    pub target_activity: f64,
    pub activity_sigma: f64,
}

impl Default for EdgeScoreConfig {
    fn default() -> Self {
        Self {
            target_entropy: 0.5,
            entropy_sigma: 0.2,
            target_sensitivity: 0.3,
            sensitivity_sigma: 0.15,
            target_memory: 0.5,
            memory_sigma: 0.25,
            target_activity: 0.3,
            activity_sigma: 0.2,
        }
    }
}

/// Full configuration for the composite metric suite.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CompositeConfig {
    pub edge: EdgeScoreConfig,
    pub attractor: AttractorConfig,
    /// Block size for spatial entropy.
    pub spatial_block: usize,
    /// Steps each sensitivity probe evolves for.
    pub probe_steps: usize,
    /// Fraction of cells flipped per probe sample.
    pub probe_perturbation: f64,
    /// Perturbed trajectories averaged per probe.
    pub probe_samples: usize,
    /// Seed of the call-scoped probe generator.
    pub probe_seed: u64,
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            edge: EdgeScoreConfig::default(),
            attractor: AttractorConfig::default(),
            spatial_block: 2,
            probe_steps: 50,
            probe_perturbation: 0.01,
            probe_samples: 5,
            probe_seed: 42,
        }
    }
}

/// Flat record of every metric computed for one trajectory snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeEdgeMetrics {
    pub entropy: f64,
    pub spatial_entropy: f64,
    pub sensitivity: f64,
    pub memory_score: f64,
    pub edge_score: f64,
    pub activity: f64,
    pub attractor_type: AttractorClass,
    pub attractor_period: usize,
    pub attractor_stability: f64,
}

impl CompositeEdgeMetrics {
    /// Neutral all-zero record for trajectories too short to analyze.
    fn unknown() -> Self {
        Self {
            entropy: 0.0,
            spatial_entropy: 0.0,
            sensitivity: 0.0,
            memory_score: 0.0,
            edge_score: 0.0,
            activity: 0.0,
            attractor_type: AttractorClass::Unknown,
            attractor_period: 0,
            attractor_stability: 0.0,
        }
    }
}

/// Gaussian kernel peaked at `target` with width `sigma`.
fn bell(value: f64, target: f64, sigma: f64) -> f64 {
    (-(value - target).powi(2) / (2.0 * sigma * sigma)).exp()
}

/// Composite edge-of-chaos score in [0, 1] from pre-computed sensitivity
/// and memory values.
///
/// Entropy and activity come from the final state of `history`. Returns
/// 0.0 for histories shorter than 2 states.
pub fn edge_of_chaos_score(
    history: &[Grid],
    sensitivity: f64,
    memory: f64,
    cfg: &EdgeScoreConfig,
) -> f64 {
    if history.len() < 2 {
        return 0.0;
    }

    let last = &history[history.len() - 1];

    // Two-symbol alphabets carry at most one bit, so base-2 entropy is
    // already normalized
    let norm_entropy = shannon_entropy(last, 2.0);
    let entropy_term = bell(norm_entropy, cfg.target_entropy, cfg.entropy_sigma);
    let sensitivity_term = bell(sensitivity, cfg.target_sensitivity, cfg.sensitivity_sigma);
    let memory_term = bell(memory, cfg.target_memory, cfg.memory_sigma);
    let activity_term = bell(activity_level(last), cfg.target_activity, cfg.activity_sigma);

    let edge = (entropy_term * sensitivity_term * memory_term * activity_term).powf(0.25);
    edge.clamp(0.0, 1.0)
}

/// Orchestrates the full metric suite for one trajectory.
///
/// Sensitivity is approximated from the history itself as the mean
/// Hamming distance between consecutive states; use
/// [`composite_edge_metric_with_probe`] when an evolution function is
/// available. Histories shorter than 2 yield the neutral `Unknown`
/// record.
pub fn composite_edge_metric(
    history: &[Grid],
    cfg: &CompositeConfig,
) -> Result<CompositeEdgeMetrics, MetricError> {
    if history.len() < 2 {
        return Ok(CompositeEdgeMetrics::unknown());
    }

    let mut total = 0.0;
    for pair in history.windows(2) {
        total += hamming_distance(&pair[0], &pair[1])?;
    }
    let sensitivity = total / (history.len() - 1) as f64;

    Ok(compose(history, sensitivity, cfg))
}

/// Orchestrates the full metric suite, measuring sensitivity with a
/// black-box perturbation probe against `evolve`.
///
/// The probe draws from a call-scoped generator seeded with
/// `cfg.probe_seed`, so repeated calls are bit-identical.
pub fn composite_edge_metric_with_probe<F>(
    history: &[Grid],
    evolve: F,
    initial: &Grid,
    cfg: &CompositeConfig,
) -> Result<CompositeEdgeMetrics, MetricError>
where
    F: Fn(&Grid, usize) -> Grid,
{
    if history.len() < 2 {
        return Ok(CompositeEdgeMetrics::unknown());
    }

    let mut rng = StdRng::seed_from_u64(cfg.probe_seed);
    let sensitivity = hamming_sensitivity(
        evolve,
        initial,
        cfg.probe_steps,
        cfg.probe_perturbation,
        cfg.probe_samples,
        &mut rng,
    )?;

    Ok(compose(history, sensitivity, cfg))
}

fn compose(history: &[Grid], sensitivity: f64, cfg: &CompositeConfig) -> CompositeEdgeMetrics {
    let last = &history[history.len() - 1];
    let memory = memory_score(history, &cfg.attractor);
    let attractor = attractor_analysis(history, &cfg.attractor);
    let edge = edge_of_chaos_score(history, sensitivity, memory, &cfg.edge);

    CompositeEdgeMetrics {
        entropy: shannon_entropy(last, 2.0),
        spatial_entropy: spatial_entropy(last, cfg.spatial_block),
        sensitivity,
        memory_score: memory,
        edge_score: edge,
        activity: activity_level(last),
        attractor_type: attractor.class,
        attractor_period: attractor.period,
        attractor_stability: attractor.stability,
    }
}

/// Heuristic estimate of Langton's λ from observed dynamics.
///
///   λ ≈ activity(last) · (1 + std(activity over time))
///
/// clipped to [0, 1]. This is a proxy, **not** the formal rule-table
/// definition (fraction of non-quiescent transitions); callers must not
/// treat it as such. Returns 0.0 for fewer than 2 frames.
pub fn lambda_parameter_estimate(history: &[Grid]) -> f64 {
    if history.len() < 2 {
        return 0.0;
    }

    let activity = activity_level(&history[history.len() - 1]);
    let activities: Vec<f64> = history.iter().map(activity_level).collect();
    let variability = population_std(&activities);

    (activity * (1.0 + variability)).clamp(0.0, 1.0)
}

/// [`lambda_parameter_estimate`] over a 3-D stacked array
/// (first axis = time). Both input forms agree exactly.
pub fn lambda_parameter_estimate_stacked(stacked: &Array3<i8>, encoding: StateEncoding) -> f64 {
    lambda_parameter_estimate(&from_stacked(stacked, encoding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_history(n: usize, shape: (usize, usize), density: f64, seed: u64) -> Vec<Grid> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                Grid::binary(Array2::from_shape_fn(shape, |_| {
                    i8::from(rng.random_bool(density))
                }))
            })
            .collect()
    }

    #[test]
    fn test_edge_score_bounds_near_ordered() {
        let history = random_history(10, (8, 8), 0.3, 1);
        let score = edge_of_chaos_score(&history, 0.05, 0.95, &EdgeScoreConfig::default());
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_edge_score_bounds_near_chaotic() {
        let history = random_history(10, (8, 8), 0.5, 2);
        let score = edge_of_chaos_score(&history, 0.9, 0.05, &EdgeScoreConfig::default());
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_edge_score_short_history() {
        let history = random_history(1, (4, 4), 0.5, 3);
        assert_eq!(
            edge_of_chaos_score(&history, 0.3, 0.5, &EdgeScoreConfig::default()),
            0.0
        );
    }

    #[test]
    fn test_edge_score_peaks_at_targets() {
        // A state matching both the entropy and activity targets, scored
        // with on-target sensitivity and memory, beats an off-target one
        let cfg = EdgeScoreConfig::default();
        let history = random_history(10, (16, 16), 0.3, 4);
        let on_target = edge_of_chaos_score(&history, 0.3, 0.5, &cfg);
        let off_target = edge_of_chaos_score(&history, 0.9, 0.0, &cfg);
        assert!(on_target > off_target);
    }

    #[test]
    fn test_composite_short_history_is_unknown() {
        let history = random_history(1, (4, 4), 0.5, 5);
        let m = composite_edge_metric(&history, &CompositeConfig::default()).unwrap();
        assert_eq!(m.attractor_type, AttractorClass::Unknown);
        assert_eq!(m.edge_score, 0.0);
        assert_eq!(m.entropy, 0.0);
    }

    #[test]
    fn test_composite_fallback_sensitivity() {
        // Alternating full flips: consecutive Hamming distance is 1.0
        let a = Grid::binary(Array2::zeros((4, 4)));
        let b = Grid::binary(Array2::ones((4, 4)));
        let history = vec![a.clone(), b.clone(), a.clone(), b.clone()];
        let m = composite_edge_metric(&history, &CompositeConfig::default()).unwrap();
        assert!((m.sensitivity - 1.0).abs() < 1e-12);
        assert_eq!(m.attractor_type, AttractorClass::Cycle);
        assert_eq!(m.attractor_period, 2);
    }

    #[test]
    fn test_composite_with_probe_is_deterministic() {
        let history = random_history(12, (8, 8), 0.4, 6);
        let evolve = |state: &Grid, _steps: usize| state.clone();
        let cfg = CompositeConfig::default();

        let a = composite_edge_metric_with_probe(&history, evolve, &history[0], &cfg).unwrap();
        let b = composite_edge_metric_with_probe(&history, evolve, &history[0], &cfg).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_composite_scores_within_bounds() {
        let history = random_history(20, (8, 8), 0.5, 7);
        let m = composite_edge_metric(&history, &CompositeConfig::default()).unwrap();
        for v in [
            m.spatial_entropy,
            m.memory_score,
            m.edge_score,
            m.activity,
            m.attractor_stability,
        ] {
            assert!((0.0..=1.0).contains(&v), "out of bounds: {}", v);
        }
    }

    #[test]
    fn test_lambda_estimate_bounds() {
        let history = random_history(15, (8, 8), 0.5, 8);
        let lambda = lambda_parameter_estimate(&history);
        assert!((0.0..=1.0).contains(&lambda));
    }

    #[test]
    fn test_lambda_estimate_short_history() {
        let history = random_history(1, (4, 4), 0.5, 9);
        assert_eq!(lambda_parameter_estimate(&history), 0.0);
    }

    #[test]
    fn test_lambda_list_and_stacked_agree() {
        let mut rng = StdRng::seed_from_u64(10);
        let stacked = Array3::from_shape_fn((6, 5, 5), |_| i8::from(rng.random_bool(0.4)));
        let frames = from_stacked(&stacked, StateEncoding::Binary);

        let from_list = lambda_parameter_estimate(&frames);
        let from_stack = lambda_parameter_estimate_stacked(&stacked, StateEncoding::Binary);
        assert_eq!(from_list.to_bits(), from_stack.to_bits());
        assert!((0.0..=1.0).contains(&from_list));
    }
}
