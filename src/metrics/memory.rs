//! Attractor Detection and Memory Scoring
//!
//! Quantifies memory-like behavior of a trajectory through:
//!
//! - Bounded cycle detection (fixed points and limit cycles)
//! - Attractor classification
//! - A composite memory score rewarding short-period, quickly-reached,
//!   long-lived attractors
//! - Return-time (Poincaré recurrence) statistics
//!
//! ## Bounded search
//!
//! Cycle detection is a direct offset-comparison search capped by
//! `max_period`, giving worst-case cost O(max_period²) regardless of
//! trajectory length. The cap is a deliberate cost/accuracy tradeoff:
//! failing to find a cycle within the bound is a normal outcome, and the
//! reported period is not guaranteed minimal over unbounded horizons.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::population_std;
use crate::state::{Grid, StateKey};

/// Tunable constants of the attractor detector.
///
/// The quasi-periodic boundary is an empirical heuristic with no stated
/// derivation; it is configuration, not a law of the domain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AttractorConfig {
    /// Largest cycle period the bounded search will consider.
    pub max_period: usize,
    /// A cycle-free trajectory whose distinct-state count falls below
    /// this fraction of its length classifies as quasi-periodic.
    pub quasi_periodic_fraction: f64,
    /// Weight of the period penalty in the memory score.
    pub period_penalty_weight: f64,
}

impl Default for AttractorConfig {
    fn default() -> Self {
        Self {
            max_period: 100,
            quasi_periodic_fraction: 0.5,
            period_penalty_weight: 0.5,
        }
    }
}

/// Long-run behavior classes of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttractorClass {
    Fixed,
    Cycle,
    QuasiPeriodic,
    Chaotic,
    Unknown,
}

impl AttractorClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttractorClass::Fixed => "fixed",
            AttractorClass::Cycle => "cycle",
            AttractorClass::QuasiPeriodic => "quasi-periodic",
            AttractorClass::Chaotic => "chaotic",
            AttractorClass::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for AttractorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attractor classification of one trajectory, recomputed from scratch on
/// every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttractorResult {
    pub class: AttractorClass,
    /// Cycle period; 0 if no cycle was found.
    pub period: usize,
    /// Steps before the attractor is entered.
    pub transient: usize,
    /// Fraction of the trajectory spent on the attractor, in [0, 1].
    pub stability: f64,
    /// Count of distinct states seen.
    pub n_unique_states: usize,
}

/// Detects a periodic cycle at the tail of a trajectory.
///
/// For each candidate period p from 1 to `min(max_period, n / 2)`, checks
/// whether the last p states repeat the p states immediately preceding
/// them, and on an apparent match verifies agreement with period p from
/// the putative transient boundary (n - 2p) forward. Returns
/// `(transient, period)` for the smallest period passing both checks.
pub fn detect_cycle(history: &[Grid], max_period: usize) -> Option<(usize, usize)> {
    let n = history.len();
    if n < 2 {
        return None;
    }

    let keys: Vec<StateKey> = history.iter().map(Grid::key).collect();

    'candidates: for period in 1..=max_period.min(n / 2) {
        for offset in 0..period {
            let tail = n - 1 - offset;
            if tail < period {
                continue 'candidates;
            }
            if keys[tail] != keys[tail - period] {
                continue 'candidates;
            }
        }

        let transient = n - 2 * period;
        let stable = (transient..n - period).all(|i| keys[i] == keys[i + period]);
        if stable {
            return Some((transient, period));
        }
    }

    None
}

/// Classifies the long-run behavior of a trajectory.
///
/// A detected cycle classifies as `Fixed` (period 1) or `Cycle` with
/// stability `1 - transient / n`. Without a cycle: a single distinct
/// state is `Fixed` (period 1, stability 1.0); a distinct-state count
/// below `quasi_periodic_fraction * n` is `QuasiPeriodic` (stability
/// 0.5); anything else is `Chaotic` (stability 0.0). Trajectories shorter
/// than 2 yield the neutral `Unknown` record.
pub fn attractor_analysis(history: &[Grid], cfg: &AttractorConfig) -> AttractorResult {
    let n = history.len();
    let mut result = AttractorResult {
        class: AttractorClass::Unknown,
        period: 0,
        transient: n,
        stability: 0.0,
        n_unique_states: 0,
    };

    if n < 2 {
        return result;
    }

    let unique: HashSet<StateKey> = history.iter().map(Grid::key).collect();
    result.n_unique_states = unique.len();

    if let Some((transient, period)) = detect_cycle(history, cfg.max_period) {
        result.transient = transient;
        result.period = period;
        result.class = if period == 1 {
            AttractorClass::Fixed
        } else {
            AttractorClass::Cycle
        };
        result.stability = 1.0 - transient as f64 / n as f64;
    } else if result.n_unique_states == 1 {
        result.class = AttractorClass::Fixed;
        result.period = 1;
        result.stability = 1.0;
    } else if (result.n_unique_states as f64) < cfg.quasi_periodic_fraction * n as f64 {
        // Many repeated states but no clean cycle within the bound
        result.class = AttractorClass::QuasiPeriodic;
        result.stability = 0.5;
    } else {
        result.class = AttractorClass::Chaotic;
        result.stability = 0.0;
    }

    result
}

/// Composite memory score in [0, 1].
///
///   memory = stability · (1 - w · period_penalty) · (0.5 + 0.5 · convergence)
///
/// where `period_penalty = min(period / max_period, 1)` (1.0 when no
/// attractor was found) and `convergence = 1 - min(transient / n, 1)`.
/// Short-period attractors reached quickly and held long score high; a
/// trajectory with no detectable attractor scores low but not necessarily
/// zero.
pub fn memory_score(history: &[Grid], cfg: &AttractorConfig) -> f64 {
    let n = history.len();
    if n < 2 {
        return 0.0;
    }

    let analysis = attractor_analysis(history, cfg);

    let period_penalty = if analysis.period > 0 {
        (analysis.period as f64 / cfg.max_period as f64).min(1.0)
    } else {
        1.0
    };
    let convergence = 1.0 - (analysis.transient as f64 / n as f64).min(1.0);

    let memory = analysis.stability
        * (1.0 - cfg.period_penalty_weight * period_penalty)
        * (0.5 + 0.5 * convergence);

    memory.clamp(0.0, 1.0)
}

/// Return-time (recurrence) statistics of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnTimeStats {
    /// Mean time between a state's first visit and each later revisit;
    /// the trajectory length when nothing ever recurs.
    pub mean_return_time: f64,
    /// Population standard deviation of the return times.
    pub std_return_time: f64,
    /// Recurrences per state visited.
    pub recurrence_rate: f64,
}

/// For each state, records its first-seen time index; every later
/// occurrence of the same state contributes one return time
/// (current index - first-seen index).
pub fn return_time_statistics(history: &[Grid]) -> ReturnTimeStats {
    let n = history.len();
    if n < 2 {
        return ReturnTimeStats {
            mean_return_time: 0.0,
            std_return_time: 0.0,
            recurrence_rate: 0.0,
        };
    }

    let mut first_seen: HashMap<StateKey, usize> = HashMap::new();
    let mut return_times: Vec<f64> = Vec::new();

    for (t, state) in history.iter().enumerate() {
        match first_seen.get(&state.key()) {
            Some(&first) => return_times.push((t - first) as f64),
            None => {
                first_seen.insert(state.key(), t);
            }
        }
    }

    if return_times.is_empty() {
        return ReturnTimeStats {
            mean_return_time: n as f64,
            std_return_time: 0.0,
            recurrence_rate: 0.0,
        };
    }

    let mean = return_times.iter().sum::<f64>() / return_times.len() as f64;
    ReturnTimeStats {
        mean_return_time: mean,
        std_return_time: population_std(&return_times),
        recurrence_rate: return_times.len() as f64 / n as f64,
    }
}
