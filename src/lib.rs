pub mod error;
pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use error::SimError;

pub use simulation::states::{CentralMass, OrbitingBody, System, NVec2};
pub use simulation::params::{Parameters, DEFAULT_DT, GRAVITATIONAL_CONSTANT};
pub use simulation::forces::{Acceleration, CentralGravity};
pub use simulation::integrator::{advance_body, semi_implicit_euler};
pub use simulation::report::{BodySnapshot, NullReporter, Reporter, StepReport, TrajectoryRecorder};
pub use simulation::engine::{BodyDrift, RunSummary, Simulation};
pub use simulation::diagnostics::{diagnose, BodyDiagnostics};
pub use simulation::scenario::Scenario;

pub use configuration::config::{BodyConfig, CentralConfig, DisplayConfig, ParametersConfig, ScenarioConfig};

pub use visualization::{ascii::AsciiRenderer, console::ConsoleReporter};

pub use benchmark::benchmark::{bench_drift_curve, bench_step};
