//! Rule Edge Scan: Scoring Toy CA Rules for Criticality
//!
//! This binary demonstrates the full metric suite on a handful of toy
//! cellular-automaton rules spanning the order/chaos axis:
//!
//! - **frozen**: the identity rule (a dead fixed point)
//! - **blinker**: global inversion (a trivial period-2 cycle)
//! - **majority**: 3×3 majority vote (ordering, domain-forming)
//! - **parity**: von Neumann neighborhood XOR (replicating, chaotic)
//!
//! Ordered rules should score low on sensitivity and high on memory,
//! chaotic rules the reverse; neither extreme maximizes the composite
//! edge score.

use edge_dynamics::{
    composite_edge_metric_with_probe, lambda_parameter_estimate, lyapunov_exponent,
    mutual_information, return_time_statistics, CompositeConfig, Grid,
};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() {
    println!("═══════════════════════════════════════════════════════════════");
    println!("  Edge-Dynamics: Toy Rule Criticality Scan");
    println!("═══════════════════════════════════════════════════════════════\n");

    let size = 32;
    let steps = 60;
    let density = 0.4;
    let seed = 42;

    println!("System Parameters:");
    println!("  Lattice: {}x{} (periodic)", size, size);
    println!("  Trajectory length: {} steps", steps);
    println!("  Initial density: {:.2}, seed {}", density, seed);

    let rules: [(&str, fn(&Grid) -> Grid); 4] = [
        ("frozen", step_frozen),
        ("blinker", step_blinker),
        ("majority", step_majority),
        ("parity", step_parity),
    ];

    println!(
        "\n{:<10} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}  {:<10}",
        "rule", "entropy", "spatial", "sens", "memory", "edge", "lambda", "attractor"
    );
    println!("{}", "-".repeat(80));

    for (name, rule) in rules {
        let initial = random_grid(size, density, seed);
        let history = run_trajectory(rule, &initial, steps);

        let evolve = |state: &Grid, n: usize| {
            let mut s = state.clone();
            for _ in 0..n {
                s = rule(&s);
            }
            s
        };

        let cfg = CompositeConfig::default();
        let metrics = composite_edge_metric_with_probe(&history, evolve, &initial, &cfg)
            .expect("trajectory states share one shape");
        let lambda = lambda_parameter_estimate(&history);

        println!(
            "{:<10} {:>8.4} {:>8.4} {:>8.4} {:>8.4} {:>8.4} {:>8.4}  {:<10}",
            name,
            metrics.entropy,
            metrics.spatial_entropy,
            metrics.sensitivity,
            metrics.memory_score,
            metrics.edge_score,
            lambda,
            format!("{} (p={})", metrics.attractor_type, metrics.attractor_period),
        );
    }

    println!("\nDivergence probes (majority rule):");
    let initial = random_grid(size, density, seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let evolve_one = |state: &Grid, _n: usize| step_majority(state);
    let lyapunov = lyapunov_exponent(evolve_one, &initial, 40, 0.01, 10, &mut rng)
        .expect("rule preserves shape");
    println!("  Lyapunov estimate: {:+.4}", lyapunov);

    let history = run_trajectory(step_majority, &initial, steps);
    println!("  Mutual information (lag 1): {:.4} bits", mutual_information(&history, 1));

    let rt = return_time_statistics(&history);
    println!(
        "  Return times: mean {:.2}, std {:.2}, recurrence rate {:.3}",
        rt.mean_return_time, rt.std_return_time, rt.recurrence_rate
    );
}

fn random_grid(size: usize, density: f64, seed: u64) -> Grid {
    let mut rng = StdRng::seed_from_u64(seed);
    Grid::binary(Array2::from_shape_fn((size, size), |_| {
        i8::from(rng.random_bool(density))
    }))
}

fn run_trajectory(rule: fn(&Grid) -> Grid, initial: &Grid, steps: usize) -> Vec<Grid> {
    let mut history = Vec::with_capacity(steps + 1);
    history.push(initial.clone());
    let mut state = initial.clone();
    for _ in 0..steps {
        state = rule(&state);
        history.push(state.clone());
    }
    history
}

fn step_frozen(state: &Grid) -> Grid {
    state.clone()
}

fn step_blinker(state: &Grid) -> Grid {
    Grid::binary(state.cells().mapv(|x| 1 - x))
}

/// 3×3 majority vote with periodic boundaries.
fn step_majority(state: &Grid) -> Grid {
    let cells = state.cells();
    let (h, w) = cells.dim();
    Grid::binary(Array2::from_shape_fn((h, w), |(i, j)| {
        let mut on = 0;
        for di in 0..3 {
            for dj in 0..3 {
                let ni = (i + h + di - 1) % h;
                let nj = (j + w + dj - 1) % w;
                on += i32::from(cells[[ni, nj]]);
            }
        }
        i8::from(on >= 5)
    }))
}

/// Von Neumann neighborhood XOR with periodic boundaries.
fn step_parity(state: &Grid) -> Grid {
    let cells = state.cells();
    let (h, w) = cells.dim();
    Grid::binary(Array2::from_shape_fn((h, w), |(i, j)| {
        let up = cells[[(i + h - 1) % h, j]];
        let down = cells[[(i + 1) % h, j]];
        let left = cells[[i, (j + w - 1) % w]];
        let right = cells[[i, (j + 1) % w]];
        (up ^ down ^ left ^ right) & 1
    }))
}
