//! Fixed-step time integrator for the orbital system
//!
//! Semi-implicit (symplectic) Euler: drift every body along its current
//! velocity, then kick it with the acceleration evaluated at the new position.

use crate::error::SimError;
use crate::simulation::forces::Acceleration;
use crate::simulation::params::Parameters;
use crate::simulation::states::{CentralMass, NVec2, OrbitingBody, System};

/// Advance one body by `dt` without touching it
/// Returns the new `(position, velocity)` pair
pub fn advance_body<A>(body: &OrbitingBody, central: &CentralMass, field: &A, dt: f64) -> Result<(NVec2, NVec2), SimError>
where
    A: Acceleration + ?Sized,
{
    // Drift: x_n+1 = x_n + dt * v_n
    let x = body.position() + dt * body.velocity();

    // Acceleration at the *new* position x_n+1
    let a = field.acceleration(central, body.name(), &x)?;

    // Kick: v_n+1 = v_n + dt * a(x_n+1)
    let v = body.velocity() + dt * a;

    if !(x.iter().all(|c| c.is_finite()) && v.iter().all(|c| c.is_finite())) {
        return Err(SimError::NonFiniteState { body: body.name().to_string() });
    }

    Ok((x, v))
}

/// Advance the whole system by one step of `params.dt`
///
/// Bodies are processed in insertion order. New states are computed for every
/// body before any is written back, so on error `sys` is left untouched.
pub fn semi_implicit_euler<A>(sys: &mut System, field: &A, params: &Parameters) -> Result<(), SimError>
where
    A: Acceleration + ?Sized,
{
    let central = sys.central().ok_or(SimError::MissingCentralMass)?;
    let dt = params.dt;

    let next = sys
        .bodies()
        .iter()
        .map(|b| advance_body(b, central, field, dt))
        .collect::<Result<Vec<_>, _>>()?;

    for (b, (x, v)) in sys.bodies_mut().iter_mut().zip(next) {
        b.move_to(x.x, x.y);
        b.set_velocity(v.x, v.y);
    }

    sys.t += dt;
    sys.steps += 1;
    Ok(())
}
