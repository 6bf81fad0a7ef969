//! Vortex Relaxation: Defect Annihilation Under Uniform Coupling
//!
//! Imprints a vortex/anti-vortex pair on a periodic phase field, adds
//! Gaussian phase noise, then relaxes the field by aligning every site
//! with the local mean orientation of its neighbors (strong uniform
//! coupling, zero temperature).
//!
//! The pair attracts and annihilates as the field orders: the tracked
//! defect count falls toward zero and the smoothed annihilation rate
//! shows where the topological charge disappeared.

use edge_dynamics::{annihilation_rate, track_defects_over_time, wrap_angle, PhaseField};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn main() {
    println!("═══════════════════════════════════════════════════════════════");
    println!("  Edge-Dynamics: Vortex Pair Relaxation");
    println!("═══════════════════════════════════════════════════════════════\n");

    let size = 64;
    let noise_sigma = 0.3;
    let relax_steps = 200;
    let record_every = 5;
    let threshold = 0.5;
    let window = 10;

    println!("System Parameters:");
    println!("  Lattice: {}x{} (periodic)", size, size);
    println!("  Vortex at (16, 16), anti-vortex at (48, 48)");
    println!("  Phase noise sigma = {:.2}", noise_sigma);
    println!("  Relaxation: {} steps, recorded every {}", relax_steps, record_every);

    let mut phase = vortex_pair_field(size, (16.0, 16.0), (48.0, 48.0));
    add_phase_noise(&mut phase, noise_sigma, 7);

    let mut frames = vec![phase.clone()];
    for step in 1..=relax_steps {
        phase = relax_step(&phase);
        if step % record_every == 0 {
            frames.push(phase.clone());
        }
    }

    let tracked = track_defects_over_time(&frames, threshold);
    let rate = annihilation_rate(&tracked, window);

    println!("\n{:>6} {:>9} {:>6} {:>6} {:>10} {:>10}", "frame", "defects", "+1", "-1", "potential", "rate");
    println!("{}", "-".repeat(52));
    for (t, metrics) in tracked.iter().enumerate() {
        println!(
            "{:>6} {:>9} {:>6} {:>6} {:>10.4} {:>10.4}",
            t,
            metrics.n_defects,
            metrics.n_positive,
            metrics.n_negative,
            metrics.annihilation_potential(),
            rate[t],
        );
    }

    let first = &tracked[0];
    let last = &tracked[tracked.len() - 1];
    println!("\nSummary:");
    println!("  Initial defects: {} (density {:.4})", first.n_defects, first.defect_density);
    println!("  Final defects:   {} (density {:.4})", last.n_defects, last.defect_density);
    if last.n_defects <= first.n_defects {
        println!("  Field ordered: topological charge annihilated.");
    } else {
        println!("  Warning: defect count grew; increase relaxation time.");
    }
}

/// Phase field of a +1 vortex and a -1 anti-vortex at the given centers.
fn vortex_pair_field(size: usize, plus: (f64, f64), minus: (f64, f64)) -> PhaseField {
    Array2::from_shape_fn((size, size), |(i, j)| {
        let theta_plus = (j as f64 - plus.1).atan2(i as f64 - plus.0);
        let theta_minus = (j as f64 - minus.1).atan2(i as f64 - minus.0);
        wrap_angle(theta_plus - theta_minus)
    })
}

fn add_phase_noise(phase: &mut PhaseField, sigma: f64, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, sigma).expect("finite sigma");
    phase.mapv_inplace(|theta| wrap_angle(theta + normal.sample(&mut rng)));
}

/// One zero-temperature alignment sweep: every site takes the circular
/// mean of itself and its four periodic neighbors.
fn relax_step(phase: &PhaseField) -> PhaseField {
    let (h, w) = phase.dim();
    Array2::from_shape_fn((h, w), |(i, j)| {
        let neighbors = [
            phase[[i, j]],
            phase[[(i + h - 1) % h, j]],
            phase[[(i + 1) % h, j]],
            phase[[i, (j + w - 1) % w]],
            phase[[i, (j + 1) % w]],
        ];
        let sx: f64 = neighbors.iter().map(|t| t.cos()).sum();
        let sy: f64 = neighbors.iter().map(|t| t.sin()).sum();
        if sx == 0.0 && sy == 0.0 {
            phase[[i, j]]
        } else {
            wrap_angle(sy.atan2(sx))
        }
    })
}
