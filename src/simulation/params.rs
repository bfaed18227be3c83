//! Numerical and physical parameters for a run
//!
//! `Parameters` holds:
//! - the fixed time step `dt` and the number of steps to run,
//! - the gravitational constant `G` (overridable for other unit systems),
//! - `min_distance`, below which a body is considered to sit on the central mass

use crate::error::{require_finite, require_positive, SimError};

pub const DEFAULT_DT: f64 = 0.001;
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11;
pub const DEFAULT_MIN_DISTANCE: f64 = 1.0e-9;

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub steps: usize,      // number of steps to run
    pub dt: f64,           // step size
    pub G: f64,            // gravitational constant
    pub min_distance: f64, // degenerate-geometry threshold
}

impl Parameters {
    /// Defaults for everything but the step count
    pub fn new(steps: usize) -> Self {
        Self {
            steps,
            dt: DEFAULT_DT,
            G: GRAVITATIONAL_CONSTANT,
            min_distance: DEFAULT_MIN_DISTANCE,
        }
    }

    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    #[allow(non_snake_case)]
    pub fn with_G(mut self, G: f64) -> Self {
        self.G = G;
        self
    }

    /// Reject a zero step count, a non-positive `dt`, a non-finite `G` or a
    /// negative `min_distance`
    pub fn validate(&self) -> Result<(), SimError> {
        if self.steps == 0 {
            return Err(SimError::InvalidParameter {
                field: "steps",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        require_positive("dt", self.dt)?;
        require_finite("G", self.G)?;
        require_finite("min_distance", self.min_distance)?;
        if self.min_distance < 0.0 {
            return Err(SimError::InvalidParameter {
                field: "min_distance",
                value: self.min_distance,
                reason: "must not be negative",
            });
        }
        Ok(())
    }
}
