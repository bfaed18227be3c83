use approx::{assert_abs_diff_eq, assert_relative_eq};

use orbitsim::simulation::diagnostics::relative_drift;
use orbitsim::{advance_body, diagnose, semi_implicit_euler};
use orbitsim::{Acceleration, CentralGravity, CentralMass, NVec2, OrbitingBody, Parameters, System};
use orbitsim::{Scenario, ScenarioConfig, SimError, Simulation, StepReport, TrajectoryRecorder};

use std::io::Write;

/// Central mass with the given mass, everything else informational
pub fn sun(mass: f64) -> CentralMass {
    CentralMass::new("SOL", mass, 1.0e7, 5800.0).unwrap()
}

/// Body at `distance` on the +x axis moving with `(vx, vy)`
pub fn planet(name: &str, distance: f64, vx: f64, vy: f64) -> OrbitingBody {
    OrbitingBody::new(name, 1.0, 5.972e24, distance, vx, vy, "blue").unwrap()
}

/// Body on a circular orbit for the given G*M
pub fn circular(name: &str, gm: f64, r: f64) -> OrbitingBody {
    planet(name, r, 0.0, (gm / r).sqrt())
}

/// Default physics parameters for tests, G = 1
pub fn test_params(steps: usize) -> Parameters {
    Parameters::new(steps).with_G(1.0)
}

pub fn run_recorded(system: System, params: Parameters) -> (TrajectoryRecorder, System) {
    let mut recorder = TrajectoryRecorder::new();
    let mut sim = Simulation::new(system, params).unwrap();
    sim.run(&mut recorder).unwrap();
    (recorder, sim.into_system())
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn single_step_matches_closed_form() {
    let mut sys = System::with_central(sun(5000.0));
    sys.add_body(planet("EARTH", 150.0, 0.0, 30.0));
    let params = Parameters::new(1);
    let gravity = CentralGravity::from_params(&params);

    semi_implicit_euler(&mut sys, &gravity, &params).unwrap();

    let (g, m, dt): (f64, f64, f64) = (6.67430e-11, 5000.0, 0.001);
    let (x, y) = (150.0 + dt * 0.0, 0.0 + dt * 30.0);
    let (dx, dy) = (0.0 - x, 0.0 - y);
    let r = (dx * dx + dy * dy).sqrt();
    let ax = g * m * dx / r.powi(3);
    let ay = g * m * dy / r.powi(3);

    let earth = &sys.bodies()[0];
    assert_relative_eq!(earth.position().x, x, max_relative = 1e-9);
    assert_relative_eq!(earth.position().y, y, max_relative = 1e-9);
    assert_relative_eq!(earth.velocity().x, 0.0 + dt * ax, max_relative = 1e-9);
    assert_relative_eq!(earth.velocity().y, 30.0 + dt * ay, max_relative = 1e-9);
}

#[test]
fn single_step_magnitudes_follow_physical_constants() {
    let mut sys = System::with_central(sun(5000.0));
    sys.add_body(planet("EARTH", 150.0, 0.0, 30.0));
    let mut sim = Simulation::new(sys, Parameters::new(1)).unwrap();

    sim.step().unwrap();

    let earth = &sim.system().bodies()[0];
    assert_relative_eq!(earth.position().x, 150.0, max_relative = 1e-12);
    assert_relative_eq!(earth.position().y, 0.03, max_relative = 1e-12);

    // |a| ~ G*5000/150^2 ~ 1.48e-11, so dv ~ 1.48e-14 toward the sun
    assert_relative_eq!(earth.velocity().x, -1.4833e-14, max_relative = 1e-3);
    assert_relative_eq!(sim.system().t, 0.001);
}

#[test]
fn velocity_uses_acceleration_at_the_new_position() {
    let mut sys = System::with_central(sun(1.0));
    sys.add_body(planet("p", 1.0, 0.0, 1.0));
    let params = test_params(1).with_dt(0.1);
    let gravity = CentralGravity::from_params(&params);

    semi_implicit_euler(&mut sys, &gravity, &params).unwrap();

    // At the old position (1, 0) the pull has no y component; at the new
    // position (1, 0.1) it does
    let p = &sys.bodies()[0];
    assert_relative_eq!(p.position().y, 0.1, max_relative = 1e-12);
    let r3 = 1.01f64.powf(1.5);
    assert_relative_eq!(p.velocity().y, 1.0 - 0.1 * 0.1 / r3, max_relative = 1e-12);
    assert_relative_eq!(p.velocity().x, -0.1 * 1.0 / r3, max_relative = 1e-12);
}

#[test]
fn circular_orbit_radius_stays_bounded() {
    // G*M = 10, r = 150
    let mut sys = System::with_central(sun(10.0));
    sys.add_body(circular("p", 10.0, 150.0));

    let (_, sys) = run_recorded(sys, test_params(10_000));
    let r = sys.bodies()[0].position().norm();

    assert!(relative_drift(150.0, r) < 0.01, "radius drifted to {r}");
}

#[test]
fn full_revolution_conserves_energy_and_angular_momentum() {
    // G*M = 1, r = 1, v = 1: period 2*pi, so 10k steps is ~1.6 orbits
    let central = sun(1.0);
    let mut sys = System::with_central(central.clone());
    sys.add_body(circular("p", 1.0, 1.0));
    let before = diagnose(&central, &sys.bodies()[0], 1.0);

    let mut sim = Simulation::new(sys, test_params(10_000)).unwrap();
    let summary = sim.run(&mut orbitsim::NullReporter).unwrap();
    let after = diagnose(&central, &sim.system().bodies()[0], 1.0);

    assert_eq!(summary.steps, 10_000);
    assert!(summary.bodies[0].radius_drift() < 0.01);
    assert!(summary.bodies[0].energy_drift() < 0.01);
    // semi-implicit Euler conserves angular momentum for a central force
    assert_relative_eq!(after.angular_momentum, before.angular_momentum, max_relative = 1e-9);
    assert_relative_eq!(summary.t, 10.0, max_relative = 1e-9);
}

#[test]
fn runs_are_deterministic() {
    let build = || {
        let mut sys = System::with_central(sun(1.0e6));
        sys.add_body(circular("a", 1.0e6, 150.0));
        sys.add_body(planet("b", 228.0, 3.0, 40.0));
        sys
    };

    let (first, _) = run_recorded(build(), test_params(2_000));
    let (second, _) = run_recorded(build(), test_params(2_000));

    for name in ["a", "b"] {
        assert_eq!(first.trajectory(name), second.trajectory(name));
    }
}

#[test]
fn adding_a_body_does_not_change_another() {
    let mut alone = System::with_central(sun(1.0e6));
    alone.add_body(circular("a", 1.0e6, 150.0));

    let mut crowded = alone.clone();
    crowded.add_body(planet("heavy", 151.0, 0.0, 10.0));

    let (alone, _) = run_recorded(alone, test_params(1_000));
    let (crowded, _) = run_recorded(crowded, test_params(1_000));

    assert_eq!(alone.trajectory("a"), crowded.trajectory("a"));
}

#[test]
fn registration_order_only_changes_reporting_order() {
    let a = circular("a", 1.0e6, 150.0);
    let b = planet("b", 228.0, 0.0, 24.0);

    let mut ab = System::with_central(sun(1.0e6));
    ab.add_body(a.clone());
    ab.add_body(b.clone());
    let mut ba = System::with_central(sun(1.0e6));
    ba.add_body(b);
    ba.add_body(a);

    let (ab, _) = run_recorded(ab, test_params(500));
    let (ba, _) = run_recorded(ba, test_params(500));

    assert_eq!(ab.names(), ["a", "b"]);
    assert_eq!(ba.names(), ["b", "a"]);
    assert_eq!(ab.trajectory("a"), ba.trajectory("a"));
    assert_eq!(ab.trajectory("b"), ba.trajectory("b"));
}

/// Uniform field, independent of the source
struct ConstantField(NVec2);

impl Acceleration for ConstantField {
    fn acceleration(&self, _source: &CentralMass, _body: &str, _at: &NVec2) -> Result<NVec2, SimError> {
        Ok(self.0)
    }
}

#[test]
fn integrator_accepts_any_acceleration_field() {
    let central = sun(1.0);
    let body = planet("p", 2.0, 1.0, 0.0);

    let (x, v) = advance_body(&body, &central, &ConstantField(NVec2::new(0.0, -10.0)), 0.5).unwrap();

    assert_eq!(x, NVec2::new(2.5, 0.0));
    assert_eq!(v, NVec2::new(1.0, -5.0));
}

// ==================================================================================
// Error tests
// ==================================================================================

#[test]
fn stepping_without_central_mass_fails() {
    let mut sys = System::new();
    sys.add_body(planet("p", 1.0, 0.0, 1.0));
    let params = test_params(1);
    let gravity = CentralGravity::from_params(&params);

    let err = semi_implicit_euler(&mut sys, &gravity, &params).unwrap_err();
    assert!(matches!(err, SimError::MissingCentralMass));

    let err = Simulation::new(sys, params).err().unwrap();
    assert!(matches!(err, SimError::MissingCentralMass));
}

#[test]
fn invalid_masses_are_rejected() {
    assert!(matches!(
        CentralMass::new("SOL", 0.0, 1.0, 0.0),
        Err(SimError::InvalidParameter { field: "central mass", .. })
    ));
    assert!(matches!(
        CentralMass::new("SOL", f64::NAN, 1.0, 0.0),
        Err(SimError::InvalidParameter { .. })
    ));
    assert!(matches!(
        OrbitingBody::new("p", 1.0, -1.0, 1.0, 0.0, 0.0, "red"),
        Err(SimError::InvalidParameter { field: "body mass", .. })
    ));
    assert!(matches!(
        CentralMass::new("SOL", 1.0, -5.0, 0.0),
        Err(SimError::InvalidParameter { field: "central radius", .. })
    ));
    assert!(matches!(
        OrbitingBody::new("p", 0.0, 1.0, 1.0, 0.0, 0.0, "red"),
        Err(SimError::InvalidParameter { field: "body radius", .. })
    ));
}

#[test]
fn invalid_run_parameters_are_rejected() {
    let sys = System::with_central(sun(1.0));

    assert!(matches!(
        Simulation::new(sys.clone(), Parameters::new(0)),
        Err(SimError::InvalidParameter { field: "steps", .. })
    ));
    assert!(matches!(
        Simulation::new(sys.clone(), Parameters::new(1).with_dt(-0.001)),
        Err(SimError::InvalidParameter { field: "dt", .. })
    ));
    assert!(matches!(
        Simulation::new(sys, Parameters::new(1).with_G(f64::INFINITY)),
        Err(SimError::InvalidParameter { field: "G", .. })
    ));
}

#[test]
fn body_on_the_central_mass_is_degenerate() {
    let mut sys = System::with_central(sun(5000.0));
    sys.add_body(planet("ok", 150.0, 0.0, 30.0));
    sys.add_body(planet("stuck", 0.0, 0.0, 0.0));
    let before = sys.clone();
    let params = Parameters::new(1);
    let gravity = CentralGravity::from_params(&params);

    let err = semi_implicit_euler(&mut sys, &gravity, &params).unwrap_err();

    match err {
        SimError::DegenerateGeometry { body, distance } => {
            assert_eq!(body, "stuck");
            assert_eq!(distance, 0.0);
        }
        other => panic!("unexpected error {other:?}"),
    }
    // nothing was committed, not even the healthy body
    assert_eq!(sys.bodies(), before.bodies());
    assert_eq!(sys.steps, 0);
    assert_eq!(sys.t, 0.0);
}

#[test]
fn run_halts_at_the_failing_step() {
    // G = 0: straight line into the origin, 0.001 per step
    let mut sys = System::with_central(sun(1.0));
    sys.add_body(planet("diver", 0.003, -1.0, 0.0));
    let mut recorder = TrajectoryRecorder::new();
    let mut sim = Simulation::new(sys, Parameters::new(10).with_G(0.0)).unwrap();

    let err = sim.run(&mut recorder).unwrap_err();

    assert!(matches!(err, SimError::StepFailed { step: 3, .. }));
    assert!(matches!(err.root(), SimError::DegenerateGeometry { .. }));
    assert_eq!(recorder.steps(), [1, 2]);
    assert_eq!(sim.system().steps, 2);
    assert_abs_diff_eq!(sim.system().t, 2.0 * sim.parameters().dt, epsilon = 1e-15);
}

#[test]
fn overflowing_acceleration_is_non_finite() {
    // G*M overflows to infinity while the body is still well clear of the centre
    let mut sys = System::with_central(CentralMass::new("S", 1e308, 1.0, 0.0).unwrap());
    sys.add_body(planet("p", 1e-3, 0.0, 0.0));
    let mut sim = Simulation::new(sys, Parameters::new(1).with_G(1e10)).unwrap();
    let before = sim.system().clone();

    let err = sim.step().unwrap_err();

    match err {
        SimError::NonFiniteState { body } => assert_eq!(body, "p"),
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(sim.system().bodies(), before.bodies());
    assert_eq!(sim.system().steps, 0);
    assert_eq!(sim.system().t, 0.0);
}

#[test]
fn central_mass_can_be_registered_later() {
    let mut sys = System::new();
    sys.add_body(planet("EARTH", 150.0, 0.0, 30.0));
    let params = Parameters::new(1);
    let gravity = CentralGravity::from_params(&params);

    assert!(matches!(
        semi_implicit_euler(&mut sys, &gravity, &params),
        Err(SimError::MissingCentralMass)
    ));
    assert!(sys.central().is_none());

    sys.set_central(sun(5000.0));
    semi_implicit_euler(&mut sys, &gravity, &params).unwrap();

    assert_eq!(sys.central().map(|c| c.mass()), Some(5000.0));
    assert_eq!(sys.steps, 1);
    assert_abs_diff_eq!(sys.bodies()[0].position().y, 0.03, epsilon = 1e-15);
}

// ==================================================================================
// Reporting tests
// ==================================================================================

#[test]
fn reporter_sees_every_step_in_insertion_order() {
    let mut sys = System::with_central(sun(5000.0));
    sys.add_body(planet("EARTH", 150.0, 0.0, 30.0));
    sys.add_body(planet("MARS", 228.0, 0.0, 24.0));

    let (recorder, sys) = run_recorded(sys, Parameters::new(5));

    assert_eq!(recorder.steps(), [1, 2, 3, 4, 5]);
    assert_eq!(recorder.names(), ["EARTH", "MARS"]);
    let earth = recorder.trajectory("EARTH").unwrap();
    assert_eq!(earth.len(), 5);
    assert_eq!(earth[4], sys.bodies()[0].position());
    assert!(recorder.trajectory("VENUS").is_none());
}

fn counting(log: &mut Vec<(usize, usize)>) -> impl FnMut(&StepReport<'_>) + '_ {
    move |report| log.push((report.step, report.snapshots().count()))
}

#[test]
fn closures_are_reporters() {
    let mut sys = System::with_central(sun(5000.0));
    sys.add_body(planet("EARTH", 150.0, 0.0, 30.0));
    let mut log = Vec::new();

    {
        let mut reporter = counting(&mut log);
        let mut sim = Simulation::new(sys, Parameters::new(3)).unwrap();
        sim.run(&mut reporter).unwrap();
    }

    assert_eq!(log, [(1, 1), (2, 1), (3, 1)]);
}

#[test]
fn summaries_list_name_mass_radius_distance() {
    let earth = planet("EARTH", 150.0, 0.0, 30.0);
    let mut sys = System::with_central(sun(5000.0));
    sys.add_body(earth.clone());

    assert_eq!(sun(5000.0).to_string(), "Sun SOL: mass=5000, radius=10000000, temperature=5800");
    assert_eq!(sys.show_bodies(), ["Planet EARTH: mass=5972000000000000000000000, radius=1, distance=150"]);
    assert_eq!(earth.display_size(10.0), 0.1);
}

// ==================================================================================
// Scenario tests
// ==================================================================================

const SOLAR: &str = "
central: { name: SOL, mass: 5000.0, radius: 10000000.0, temperature: 5800.0 }
bodies:
  - { name: EARTH, radius: 1.0, mass: 5.972e24, distance: 150.0, v: [0.0, 30.0], color: blue }
  - { name: MARS, radius: 0.5, mass: 0.64171e24, distance: 228.0, v: [0.0, 24.0], color: red }
parameters: { steps: 500 }
";

#[test]
fn scenario_loads_from_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SOLAR.as_bytes()).unwrap();

    let cfg = ScenarioConfig::from_yaml_file(file.path()).unwrap();
    let scenario = Scenario::build_scenario(cfg).unwrap();

    assert_eq!(scenario.parameters, Parameters::new(500));
    assert_eq!(scenario.system.central().map(|c| c.name()), Some("SOL"));
    let mars = scenario.system.body("MARS").unwrap();
    assert_eq!(mars.position(), NVec2::new(228.0, 0.0));
    assert_eq!(mars.velocity(), NVec2::new(0.0, 24.0));
    assert_eq!(mars.color(), "red");
    assert_eq!(scenario.extent(), 228.0);

    let mut sim = Simulation::from_scenario(scenario).unwrap();
    let summary = sim.run(&mut orbitsim::NullReporter).unwrap();
    assert_eq!(summary.bodies.len(), 2);
}

#[test]
fn scenario_rejects_bad_velocity_and_mass() {
    let three_d = SOLAR.replace("v: [0.0, 30.0]", "v: [0.0, 30.0, 1.0]");
    let err = Scenario::build_scenario(ScenarioConfig::from_yaml_str(&three_d).unwrap()).unwrap_err();
    assert!(matches!(err, SimError::InvalidVector { len: 3, .. }));

    let massless = SOLAR.replace("mass: 5000.0", "mass: 0.0");
    let err = Scenario::build_scenario(ScenarioConfig::from_yaml_str(&massless).unwrap()).unwrap_err();
    assert!(matches!(err, SimError::InvalidParameter { field: "central mass", .. }));
}

#[test]
fn missing_scenario_file_is_an_io_error() {
    let err = ScenarioConfig::from_yaml_file("does/not/exist.yaml").unwrap_err();
    assert!(matches!(err, SimError::Io(_)));
}
