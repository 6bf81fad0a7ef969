//! Sensitivity to Initial Conditions
//!
//! Quantifies divergence of nearby trajectories, a hallmark of chaos:
//!
//! - Hamming sensitivity: mean final-state divergence of perturbed copies
//! - Lyapunov estimate: mean per-step log-divergence rate
//!
//!   λ ≈ <log(d(t) / d(0)) / t>
//!
//!   Positive λ indicates exponential divergence (chaos), λ ≈ 0 the
//!   critical regime, negative λ contraction onto an attractor.
//! - Mutual information between time-lagged whole-state symbols
//!
//! The evolution rule is a black box: these probes only ever look at
//! input and output states, never at the rule itself. The rule must
//! preserve state shape and alphabet; a shape violation fails loudly with
//! [`MetricError::ShapeMismatch`].

use std::collections::HashMap;

use rand::Rng;

use crate::error::MetricError;
use crate::state::{Grid, StateKey};

/// Fraction of differing cells between two equal-shaped states, in [0, 1].
pub fn hamming_distance(a: &Grid, b: &Grid) -> Result<f64, MetricError> {
    if a.shape() != b.shape() {
        return Err(MetricError::ShapeMismatch {
            left: a.shape(),
            right: b.shape(),
        });
    }
    if a.is_empty() {
        return Ok(0.0);
    }
    let differing = a
        .cells()
        .iter()
        .zip(b.cells().iter())
        .filter(|(x, y)| x != y)
        .count();
    Ok(differing as f64 / a.len() as f64)
}

/// Sensitivity to initial conditions via Hamming divergence.
///
/// Evolves one reference trajectory for `steps` steps, then `n_samples`
/// independently perturbed copies (each flipping `max(1, ceil(len *
/// perturbation))` distinct cells of the initial state) for the same
/// number of steps, and returns the mean final-state Hamming distance to
/// the reference.
pub fn hamming_sensitivity<F, R>(
    evolve: F,
    initial: &Grid,
    steps: usize,
    perturbation: f64,
    n_samples: usize,
    rng: &mut R,
) -> Result<f64, MetricError>
where
    F: Fn(&Grid, usize) -> Grid,
    R: Rng + ?Sized,
{
    if n_samples == 0 {
        return Ok(0.0);
    }

    let reference_final = evolve(initial, steps);

    let mut total = 0.0;
    for _ in 0..n_samples {
        let perturbed = initial.perturbed(perturbation, rng);
        let perturbed_final = evolve(&perturbed, steps);
        total += hamming_distance(&reference_final, &perturbed_final)?;
    }

    Ok(total / n_samples as f64)
}

/// Lyapunov exponent estimate for discrete lattice dynamics.
///
/// Two trajectories start a perturbation apart (distance d(0), measured
/// before the transient). After discarding `transient` steps, each step t
/// with d(t) > 0 contributes one sample log(d(t) / d(0)) / t; the estimate
/// is the sample mean. Returns 0.0 when d(0) = 0 or no valid samples
/// exist. This is a bounded-effort numerical estimate, not an exact
/// exponent.
pub fn lyapunov_exponent<F, R>(
    evolve_one_step: F,
    initial: &Grid,
    steps: usize,
    perturbation: f64,
    transient: usize,
    rng: &mut R,
) -> Result<f64, MetricError>
where
    F: Fn(&Grid, usize) -> Grid,
    R: Rng + ?Sized,
{
    let mut reference = initial.clone();
    let mut shadow = initial.perturbed(perturbation, rng);

    let d0 = hamming_distance(&reference, &shadow)?;
    if d0 == 0.0 {
        return Ok(0.0);
    }

    for _ in 0..transient {
        reference = evolve_one_step(&reference, 1);
        shadow = evolve_one_step(&shadow, 1);
    }

    let mut sum = 0.0;
    let mut n_samples = 0usize;
    for t in 1..=steps {
        reference = evolve_one_step(&reference, 1);
        shadow = evolve_one_step(&shadow, 1);

        let dt = hamming_distance(&reference, &shadow)?;
        if dt > 0.0 {
            sum += (dt / d0).ln() / t as f64;
            n_samples += 1;
        }
    }

    if n_samples == 0 {
        return Ok(0.0);
    }
    Ok(sum / n_samples as f64)
}

/// Discrete mutual information (bits) between states at t and t + lag.
///
/// Each flattened state is one symbol; the empirical joint distribution
/// over the available window and both marginals give
///
///   I = Σ p(x, y) log2(p(x, y) / (p(x) p(y)))
///
/// Returns 0 if the window is empty.
pub fn mutual_information(history: &[Grid], lag: usize) -> f64 {
    if history.len() < lag + 1 {
        return 0.0;
    }

    let keys: Vec<StateKey> = history.iter().map(Grid::key).collect();
    let window = history.len() - lag;

    let mut joint: HashMap<(&StateKey, &StateKey), usize> = HashMap::new();
    let mut marginal_t: HashMap<&StateKey, usize> = HashMap::new();
    let mut marginal_lag: HashMap<&StateKey, usize> = HashMap::new();

    for i in 0..window {
        *joint.entry((&keys[i], &keys[i + lag])).or_insert(0) += 1;
        *marginal_t.entry(&keys[i]).or_insert(0) += 1;
        *marginal_lag.entry(&keys[i + lag]).or_insert(0) += 1;
    }

    let total = window as f64;
    let mut terms: Vec<f64> = Vec::with_capacity(joint.len());
    for ((key_t, key_lag), &count) in &joint {
        let p_joint = count as f64 / total;
        let p_t = marginal_t[key_t] as f64 / total;
        let p_lag = marginal_lag[key_lag] as f64 / total;
        terms.push(p_joint * (p_joint / (p_t * p_lag)).log2());
    }
    terms.sort_by(|a, b| a.total_cmp(b));
    terms.iter().sum()
}
