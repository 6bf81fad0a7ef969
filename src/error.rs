//! Error types for hard precondition failures.
//!
//! Degenerate-but-expected inputs (short trajectories, empty windows,
//! vanishing denominators) never produce errors; every analyzer defines a
//! neutral value for them instead. The one condition treated as a caller
//! contract violation is comparing two states of different shapes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical error type for the metric engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum MetricError {
    /// Two compared states do not share one lattice shape.
    #[error("state shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
}
