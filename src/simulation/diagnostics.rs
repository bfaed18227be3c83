//! Per-body orbital invariants used to judge integrator drift

use crate::simulation::states::{CentralMass, OrbitingBody};

/// Radius, specific orbital energy and specific angular momentum of one body
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDiagnostics {
    pub name: String,
    pub radius: f64,           // |x - x_central|
    pub energy: f64,           // v^2/2 - G*M/r
    pub angular_momentum: f64, // (x × v)_z
}

#[allow(non_snake_case)]
pub fn diagnose(central: &CentralMass, body: &OrbitingBody, G: f64) -> BodyDiagnostics {
    let rel = body.position() - central.position();
    let v = body.velocity();
    let radius = rel.norm();

    BodyDiagnostics {
        name: body.name().to_string(),
        radius,
        energy: 0.5 * v.norm_squared() - G * central.mass() / radius,
        angular_momentum: rel.perp(&v),
    }
}

/// Relative change `|after - before| / |before|`, or the absolute change if
/// `before` is zero
pub fn relative_drift(before: f64, after: f64) -> f64 {
    let delta = (after - before).abs();
    if before == 0.0 { delta } else { delta / before.abs() }
}
