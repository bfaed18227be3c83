//! Acceleration sources for the orbital engine
//!
//! Defines the [`Acceleration`] trait the integrator is driven by and the
//! one-way Newtonian pull of the central mass, [`CentralGravity`]

use crate::error::SimError;
use crate::simulation::params::Parameters;
use crate::simulation::states::{CentralMass, NVec2};

/// Trait for acceleration fields around a [`CentralMass`]
/// Implementations return the acceleration felt by body `body` at position `at`
pub trait Acceleration {
    fn acceleration(&self, source: &CentralMass, body: &str, at: &NVec2) -> Result<NVec2, SimError>;
}

/// Newtonian gravity of the central mass, unsoftened
/// Positions closer than `min_distance` to the source are rejected instead of
/// producing infinite accelerations
#[allow(non_snake_case)]
pub struct CentralGravity {
    pub G: f64,            // gravitational constant
    pub min_distance: f64, // degenerate-geometry threshold
}

impl CentralGravity {
    pub fn from_params(params: &Parameters) -> Self {
        Self {
            G: params.G,
            min_distance: params.min_distance,
        }
    }
}

impl Acceleration for CentralGravity {
    fn acceleration(&self, source: &CentralMass, body: &str, at: &NVec2) -> Result<NVec2, SimError> {
        // d is the displacement from the body to the source, so the pull
        // points along +d
        let d = source.position() - at;

        // Euclidean separation |d|
        let r = d.norm();

        // r = 0 divides by zero below; refuse rather than feed inf/NaN
        // into every later step
        if !(r > self.min_distance) {
            return Err(SimError::DegenerateGeometry {
                body: body.to_string(),
                distance: r,
            });
        }

        // a = G * M * d / |d|^3
        // (magnitude G*M/r^2 along the unit vector d/r)
        let coef = self.G * source.mass() / (r * r * r);

        Ok(coef * d)
    }
}
