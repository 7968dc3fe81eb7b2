//! Sampling and tolerance settings for curve lookup tables.

use railcurve_core::{CurveError, Result, Validate};
use railcurve_math::{DVec3, Vector3};
use serde::{Deserialize, Serialize};

/// Controls how densely a curve's tables are sampled and how queries
/// treat near-zero quantities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSettings {
    /// Number of uniform parameter steps N; tables hold N + 1 entries.
    pub samples: usize,
    /// Iteration cap for the distance -> parameter binary search.
    pub search_iterations: u32,
    /// Distances and vector lengths at or below this are treated as zero.
    pub epsilon: f64,
    /// Reference "up" for frame seeding when curvature gives no direction.
    pub world_up: Vector3,
}

impl CurveSettings {
    pub const DEFAULT_SAMPLES: usize = 100;
    pub const DEFAULT_SEARCH_ITERATIONS: u32 = 7;
    pub const DEFAULT_EPSILON: f64 = 1e-9;

    pub fn coarse() -> Self {
        Self {
            samples: 32,
            search_iterations: 5,
            ..Self::default()
        }
    }

    pub fn fine() -> Self {
        Self {
            samples: 1000,
            search_iterations: 10,
            ..Self::default()
        }
    }

    pub fn with_world_up(self, world_up: Vector3) -> Self {
        Self { world_up, ..self }
    }
}

impl Default for CurveSettings {
    fn default() -> Self {
        Self {
            samples: Self::DEFAULT_SAMPLES,
            search_iterations: Self::DEFAULT_SEARCH_ITERATIONS,
            epsilon: Self::DEFAULT_EPSILON,
            world_up: DVec3::Z,
        }
    }
}

impl Validate for CurveSettings {
    fn validate(&self) -> Result<()> {
        if self.samples == 0 {
            return Err(CurveError::InvalidSettings(
                "samples must be at least 1".into(),
            ));
        }
        // The capped search halves the bracket each step and must reach adjacent entries.
        let reach = 1u128 << self.search_iterations.min(127);
        if reach < self.samples as u128 {
            return Err(CurveError::InvalidSettings(format!(
                "{} search iterations cannot resolve {} samples",
                self.search_iterations, self.samples
            )));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(CurveError::InvalidSettings(format!(
                "epsilon must be finite and positive, got {}",
                self.epsilon
            )));
        }
        if !self.world_up.is_finite() || self.world_up.length() <= self.epsilon {
            return Err(CurveError::InvalidSettings(format!(
                "world_up must be a finite non-zero vector, got {}",
                self.world_up
            )));
        }
        Ok(())
    }
}
