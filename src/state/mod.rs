//! Lattice State Algebra: Encodings, Grids, and Trajectories
//!
//! Every analyzer in this crate consumes immutable snapshots of a discrete
//! lattice. Two cell alphabets are admissible:
//!
//! - **Binary**: cells in {0, 1} (cellular automata)
//! - **Spin**: cells in {-1, +1} (Ising-like lattices)
//!
//! The encoding and the lattice rank are resolved **once**, when a [`Grid`]
//! is constructed, and carried as explicit tags. Analyzers branch on the
//! tags instead of re-inferring the alphabet from cell values on every call.
//!
//! A trajectory is an ordered slice of [`Grid`] snapshots sharing one shape
//! and encoding; the order is the time axis.

use ndarray::{Array1, Array2, Array3, Axis};
use rand::seq::index::sample;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Admissible cell alphabets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateEncoding {
    /// Cells in {0, 1}.
    Binary,
    /// Cells in {-1, +1}.
    Spin,
}

impl StateEncoding {
    /// Maps a cell value onto the unit interval: the "on" fraction
    /// contribution of one cell.
    ///
    /// Binary cells map to themselves; spin cells map via (x + 1) / 2.
    pub fn as_unit(&self, x: i8) -> f64 {
        match self {
            StateEncoding::Binary => f64::from(x),
            StateEncoding::Spin => (f64::from(x) + 1.0) / 2.0,
        }
    }

    /// Flips one cell to the opposite symbol of its alphabet.
    pub fn flip(&self, x: i8) -> i8 {
        match self {
            StateEncoding::Binary => 1 - x,
            StateEncoding::Spin => -x,
        }
    }
}

/// Lattice rank, fixed at construction.
///
/// One-dimensional grids are stored as a single-row 2-D array and tagged
/// [`Dimensionality::One`]; metrics that care about spatial structure
/// (block entropy) branch on the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimensionality {
    One,
    Two,
}

/// Exact, hashable identity of one lattice snapshot.
///
/// Two grids with equal keys hold identical cell values; there is no
/// collision risk, so cycle and recurrence detection are exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey(Vec<i8>);

/// One immutable lattice snapshot.
///
/// Never mutated after construction; analyzers receive `&Grid` and return
/// fresh values.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Array2<i8>,
    encoding: StateEncoding,
    dimensionality: Dimensionality,
}

impl Grid {
    /// 2-D binary grid.
    pub fn binary(cells: Array2<i8>) -> Self {
        Self {
            cells,
            encoding: StateEncoding::Binary,
            dimensionality: Dimensionality::Two,
        }
    }

    /// 2-D spin grid.
    pub fn spin(cells: Array2<i8>) -> Self {
        Self {
            cells,
            encoding: StateEncoding::Spin,
            dimensionality: Dimensionality::Two,
        }
    }

    /// 1-D binary grid (stored as a single row).
    pub fn binary_row(cells: Array1<i8>) -> Self {
        Self {
            cells: cells.insert_axis(Axis(0)),
            encoding: StateEncoding::Binary,
            dimensionality: Dimensionality::One,
        }
    }

    /// 1-D spin grid (stored as a single row).
    pub fn spin_row(cells: Array1<i8>) -> Self {
        Self {
            cells: cells.insert_axis(Axis(0)),
            encoding: StateEncoding::Spin,
            dimensionality: Dimensionality::One,
        }
    }

    /// Raw cell array.
    pub fn cells(&self) -> &Array2<i8> {
        &self.cells
    }

    pub fn encoding(&self) -> StateEncoding {
        self.encoding
    }

    pub fn dimensionality(&self) -> Dimensionality {
        self.dimensionality
    }

    /// (rows, cols) of the backing array.
    pub fn shape(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Exact hashable key over the flattened cells.
    pub fn key(&self) -> StateKey {
        StateKey(self.cells.iter().copied().collect())
    }

    /// Returns a copy with `max(1, ceil(len * fraction))` distinct,
    /// uniformly chosen cells flipped to the opposite symbol.
    ///
    /// The flip respects the encoding tag: binary cells toggle 0 <-> 1,
    /// spin cells negate. Randomness comes only from the injected
    /// generator, so results are reproducible per seed.
    pub fn perturbed<R: Rng + ?Sized>(&self, fraction: f64, rng: &mut R) -> Grid {
        let len = self.len();
        if len == 0 {
            return self.clone();
        }
        let n_flips = ((len as f64 * fraction).ceil() as usize).clamp(1, len);
        let cols = self.cells.ncols();

        let mut cells = self.cells.clone();
        for idx in sample(rng, len, n_flips) {
            let (i, j) = (idx / cols, idx % cols);
            cells[[i, j]] = self.encoding.flip(cells[[i, j]]);
        }

        Grid {
            cells,
            encoding: self.encoding,
            dimensionality: self.dimensionality,
        }
    }
}

/// Splits a 3-D stacked array (first axis = time) into a trajectory of
/// 2-D grids with the given encoding.
pub fn from_stacked(stacked: &Array3<i8>, encoding: StateEncoding) -> Vec<Grid> {
    stacked
        .outer_iter()
        .map(|frame| Grid {
            cells: frame.to_owned(),
            encoding,
            dimensionality: Dimensionality::Two,
        })
        .collect()
}
