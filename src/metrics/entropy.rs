//! Entropy Measures for Lattice States
//!
//! Provides:
//! - Shannon entropy of the cell-value distribution
//! - Spatial entropy (block-pattern complexity)
//! - Temporal entropy (transition-pair complexity)
//! - Activity level (mean "on" fraction)
//!
//! Shannon entropy is computed over the empirical symbol distribution:
//!
//!   H = -Σᵢ pᵢ log(pᵢ)
//!
//! A constant field carries zero entropy; a balanced two-symbol field
//! carries one bit (base 2).

use std::collections::HashMap;

use ndarray::s;

use crate::state::{Dimensionality, Grid, StateKey};

/// Shannon entropy of the cell-value distribution of one state.
///
/// `base` selects the unit: 2.0 for bits, `std::f64::consts::E` for nats.
pub fn shannon_entropy(state: &Grid, base: f64) -> f64 {
    shannon_entropy_pooled(std::slice::from_ref(state), base)
}

/// Shannon entropy of the pooled cell-value distribution of a state
/// collection.
///
/// All cells of all states form one multiset of symbols; the entropy is
/// distributional, not type-specific, so any finite alphabet works.
pub fn shannon_entropy_pooled(states: &[Grid], base: f64) -> f64 {
    let mut counts: HashMap<i8, usize> = HashMap::new();
    let mut total = 0usize;
    for state in states {
        for &v in state.cells().iter() {
            *counts.entry(v).or_insert(0) += 1;
            total += 1;
        }
    }

    if counts.len() < 2 {
        return 0.0;
    }

    let ln_base = base.ln();
    let total = total as f64;
    let mut freqs: Vec<usize> = counts.values().copied().collect();
    freqs.sort_unstable();
    -freqs
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * (p.ln() / ln_base)
        })
        .sum::<f64>()
}

/// Spatial entropy: Shannon entropy of the overlapping-block distribution,
/// normalized to [0, 1].
///
/// Every overlapping `block_size x block_size` block (length `block_size`
/// window for 1-D grids) is one symbol. Blocks never wrap around the
/// boundary; edge sites simply contribute fewer blocks. The normalizer is
/// `log2(min(2^(block_size²), n_blocks))`, and fields with fewer than two
/// distinct blocks score 0.
pub fn spatial_entropy(state: &Grid, block_size: usize) -> f64 {
    if block_size == 0 {
        return 0.0;
    }

    let cells = state.cells();
    let mut counts: HashMap<Vec<i8>, usize> = HashMap::new();
    let mut n_blocks = 0usize;

    match state.dimensionality() {
        Dimensionality::One => {
            let row = cells.row(0);
            if row.len() >= block_size {
                for i in 0..=(row.len() - block_size) {
                    let block: Vec<i8> = row.slice(s![i..i + block_size]).iter().copied().collect();
                    *counts.entry(block).or_insert(0) += 1;
                    n_blocks += 1;
                }
            }
        }
        Dimensionality::Two => {
            let (h, w) = cells.dim();
            if h >= block_size && w >= block_size {
                for i in 0..=(h - block_size) {
                    for j in 0..=(w - block_size) {
                        let block: Vec<i8> = cells
                            .slice(s![i..i + block_size, j..j + block_size])
                            .iter()
                            .copied()
                            .collect();
                        *counts.entry(block).or_insert(0) += 1;
                        n_blocks += 1;
                    }
                }
            }
        }
    }

    if n_blocks == 0 || counts.len() < 2 {
        return 0.0;
    }

    let total = n_blocks as f64;
    let mut freqs: Vec<usize> = counts.values().copied().collect();
    freqs.sort_unstable();
    let entropy = -freqs
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p.log2()
        })
        .sum::<f64>();

    let max_blocks = 2f64.powi((block_size * block_size) as i32);
    let max_entropy = max_blocks.min(total).log2();
    if max_entropy <= 0.0 {
        return 0.0;
    }

    (entropy / max_entropy).clamp(0.0, 1.0)
}

/// Temporal entropy: Shannon entropy (bits) of the empirical distribution
/// of (state at t, state at t + lag) transition pairs.
///
/// Returns 0 when the window is empty.
pub fn temporal_entropy(history: &[Grid], lag: usize) -> f64 {
    if history.len() < lag + 1 {
        return 0.0;
    }

    let keys: Vec<StateKey> = history.iter().map(Grid::key).collect();
    let window = history.len() - lag;
    let mut counts: HashMap<(&StateKey, &StateKey), usize> = HashMap::new();
    for i in 0..window {
        *counts.entry((&keys[i], &keys[i + lag])).or_insert(0) += 1;
    }

    let total = window as f64;
    let mut freqs: Vec<usize> = counts.values().copied().collect();
    freqs.sort_unstable();
    -freqs
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p.log2()
        })
        .sum::<f64>()
}

/// Mean "on" fraction of a state, always in [0, 1].
///
/// The encoding tag decides the mapping: binary cells average directly,
/// spin cells map through (x + 1) / 2 first.
pub fn activity_level(state: &Grid) -> f64 {
    if state.is_empty() {
        return 0.0;
    }
    let encoding = state.encoding();
    let sum: f64 = state.cells().iter().map(|&v| encoding.as_unit(v)).sum();
    sum / state.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1, Array2};

    #[test]
    fn test_shannon_entropy_constant_fields() {
        let zeros = Grid::binary(Array2::zeros((10, 10)));
        assert_eq!(shannon_entropy(&zeros, 2.0), 0.0);

        let ones = Grid::binary(Array2::ones((10, 10)));
        assert_eq!(shannon_entropy(&ones, 2.0), 0.0);
    }

    #[test]
    fn test_shannon_entropy_balanced() {
        let balanced = Grid::binary(Array2::from_shape_fn((10, 10), |(i, j)| ((i + j) % 2) as i8));
        let h = shannon_entropy(&balanced, 2.0);
        assert!(h > 0.9 && h <= 1.0 + 1e-12, "expected ~1 bit, got {}", h);
    }

    #[test]
    fn test_shannon_entropy_spin_alphabet() {
        // Distributional: a balanced spin field also carries one bit
        let spins = Grid::spin(Array2::from_shape_fn((8, 8), |(i, j)| {
            if (i + j) % 2 == 0 {
                1
            } else {
                -1
            }
        }));
        let h = shannon_entropy(&spins, 2.0);
        assert!((h - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_shannon_entropy_nats() {
        let balanced = Grid::binary(Array2::from_shape_fn((4, 4), |(i, j)| ((i + j) % 2) as i8));
        let h = shannon_entropy(&balanced, std::f64::consts::E);
        assert!((h - std::f64::consts::LN_2).abs() < 1e-9);
    }

    #[test]
    fn test_shannon_entropy_pooled() {
        // Two constant fields with different symbols pool to one bit
        let zeros = Grid::binary(Array2::zeros((4, 4)));
        let ones = Grid::binary(Array2::ones((4, 4)));
        let h = shannon_entropy_pooled(&[zeros, ones], 2.0);
        assert!((h - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_spatial_entropy_bounds() {
        let checker = Grid::binary(Array2::from_shape_fn((20, 20), |(i, j)| {
            if i % 2 == 0 && j % 2 == 0 {
                1
            } else {
                0
            }
        }));
        let h = spatial_entropy(&checker, 2);
        assert!((0.0..=1.0).contains(&h));
    }

    #[test]
    fn test_spatial_entropy_uniform_is_zero() {
        let flat = Grid::binary(Array2::zeros((10, 10)));
        assert_eq!(spatial_entropy(&flat, 2), 0.0);
    }

    #[test]
    fn test_spatial_entropy_random_above_regular() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(42);
        let random = Grid::binary(Array2::from_shape_fn((20, 20), |_| {
            i8::from(rng.random_bool(0.5))
        }));
        let stripes =
            Grid::binary(Array2::from_shape_fn((20, 20), |(i, _)| (i % 2) as i8));
        assert!(spatial_entropy(&random, 2) > spatial_entropy(&stripes, 2));
    }

    #[test]
    fn test_spatial_entropy_one_dimensional() {
        let row = Grid::binary_row(array![0, 1, 1, 0, 1, 0, 0, 1, 1, 1, 0, 0]);
        let h = spatial_entropy(&row, 2);
        assert!(h > 0.0 && h <= 1.0);

        // Too short for even one block
        let tiny = Grid::binary_row(array![1]);
        assert_eq!(spatial_entropy(&tiny, 2), 0.0);
    }

    #[test]
    fn test_temporal_entropy() {
        let a = Grid::binary(array![[0, 1], [1, 0]]);
        let b = Grid::binary(array![[1, 0], [0, 1]]);

        // Constant history: a single transition pair, zero entropy
        let constant = vec![a.clone(), a.clone(), a.clone(), a.clone()];
        assert_eq!(temporal_entropy(&constant, 1), 0.0);

        // Alternating history: two equiprobable pairs, one bit
        let alternating = vec![a.clone(), b.clone(), a.clone(), b.clone(), a.clone()];
        let h = temporal_entropy(&alternating, 1);
        assert!((h - 1.0).abs() < 1e-9);

        // Window shorter than lag
        assert_eq!(temporal_entropy(&constant, 10), 0.0);
    }

    #[test]
    fn test_activity_level_extremes() {
        assert_eq!(activity_level(&Grid::binary(Array2::zeros((10, 10)))), 0.0);
        assert_eq!(activity_level(&Grid::binary(Array2::ones((10, 10)))), 1.0);

        let half = Grid::binary_row(Array1::from_shape_fn(100, |i| (i % 2) as i8));
        let a = activity_level(&half);
        assert!(a > 0.49 && a < 0.51);
    }

    #[test]
    fn test_activity_level_spin_mapping() {
        let down = Grid::spin(Array2::from_elem((5, 5), -1));
        assert_eq!(activity_level(&down), 0.0);

        let up = Grid::spin(Array2::ones((5, 5)));
        assert_eq!(activity_level(&up), 1.0);
    }
}
