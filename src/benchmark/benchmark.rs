use std::time::Instant;

use crate::error::SimError;
use crate::simulation::diagnostics::{diagnose, relative_drift};
use crate::simulation::forces::CentralGravity;
use crate::simulation::integrator::semi_implicit_euler;
use crate::simulation::params::Parameters;
use crate::simulation::states::{CentralMass, OrbitingBody, System};

/// Helper to build a system of `n` bodies on circular orbits
/// G*M = 1, radii spread over [1, 6)
fn make_system(n: usize) -> Result<System, SimError> {
    let mut sys = System::with_central(CentralMass::new("centre", 1.0, 0.1, 0.0)?);

    for i in 0..n {
        let i_f = i as f64;
        // deterministic radii, no rand needed
        let r = 1.0 + 5.0 * ((i_f * 0.37).sin() * 0.5 + 0.5);
        let v = (1.0 / r).sqrt();
        sys.add_body(OrbitingBody::new(format!("b{i}"), 0.01, 1.0, r, 0.0, v, "white")?);
    }

    Ok(sys)
}

fn make_params(steps: usize) -> Parameters {
    Parameters::new(steps).with_dt(0.001).with_G(1.0)
}

/// Time one integrator step for a range of body counts
pub fn bench_step() -> Result<(), SimError> {
    let ns = [200, 400, 800, 1600, 3200, 6400, 12800];
    let steps = 20;

    for n in ns {
        let mut sys = make_system(n)?;
        let params = make_params(steps);
        let gravity = CentralGravity::from_params(&params);

        // Warm-up
        semi_implicit_euler(&mut sys, &gravity, &params)?;

        let t0 = Instant::now();
        for _ in 0..steps {
            semi_implicit_euler(&mut sys, &gravity, &params)?;
        }
        let per_step = t0.elapsed().as_secs_f64() / steps as f64;

        println!("N = {:5}, step = {:10.3} us", n, per_step * 1.0e6);
    }
    Ok(())
}

/// Radius and energy drift of a single circular orbit, sampled every 1000 steps
/// Paste output directly into a spreadsheet to graph
pub fn bench_drift_curve() -> Result<(), SimError> {
    println!("step,radius_drift,energy_drift");

    let mut sys = make_system(1)?;
    let params = make_params(100_000);
    let gravity = CentralGravity::from_params(&params);

    let start = {
        let central = sys.central().ok_or(SimError::MissingCentralMass)?;
        diagnose(central, &sys.bodies()[0], params.G)
    };

    for step in 1..=params.steps {
        semi_implicit_euler(&mut sys, &gravity, &params)?;
        if step % 1000 == 0 {
            let central = sys.central().ok_or(SimError::MissingCentralMass)?;
            let now = diagnose(central, &sys.bodies()[0], params.G);
            println!(
                "{},{:.6e},{:.6e}",
                step,
                relative_drift(start.radius, now.radius),
                relative_drift(start.energy, now.energy)
            );
        }
    }
    Ok(())
}
