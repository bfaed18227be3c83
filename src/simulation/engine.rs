//! The run loop
//!
//! `Simulation` owns the system, the force field and the run parameters,
//! advances the system a fixed number of steps and hands every post-step
//! state to a [`Reporter`]

use log::{debug, info, trace};

use crate::error::SimError;
use crate::simulation::diagnostics::{diagnose, relative_drift, BodyDiagnostics};
use crate::simulation::forces::CentralGravity;
use crate::simulation::integrator::semi_implicit_euler;
use crate::simulation::params::Parameters;
use crate::simulation::report::{Reporter, StepReport};
use crate::simulation::scenario::Scenario;
use crate::simulation::states::System;

/// Initial and final invariants of one body over a run
#[derive(Debug, Clone)]
pub struct BodyDrift {
    pub initial: BodyDiagnostics,
    pub last: BodyDiagnostics,
}

impl BodyDrift {
    pub fn radius_drift(&self) -> f64 {
        relative_drift(self.initial.radius, self.last.radius)
    }

    pub fn energy_drift(&self) -> f64 {
        relative_drift(self.initial.energy, self.last.energy)
    }
}

/// Outcome of a completed [`Simulation::run`]
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub steps: usize,
    pub t: f64,
    pub bodies: Vec<BodyDrift>,
}

pub struct Simulation {
    system: System,
    gravity: CentralGravity,
    parameters: Parameters,
}

impl Simulation {
    /// Fails on invalid parameters or when `system` has no central mass
    pub fn new(system: System, parameters: Parameters) -> Result<Self, SimError> {
        parameters.validate()?;
        if system.central().is_none() {
            return Err(SimError::MissingCentralMass);
        }
        Ok(Self {
            gravity: CentralGravity::from_params(&parameters),
            system,
            parameters,
        })
    }

    pub fn from_scenario(scenario: Scenario) -> Result<Self, SimError> {
        Self::new(scenario.system, scenario.parameters)
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn into_system(self) -> System {
        self.system
    }

    /// Advance the system once
    pub fn step(&mut self) -> Result<(), SimError> {
        semi_implicit_euler(&mut self.system, &self.gravity, &self.parameters)
    }

    fn diagnostics(&self) -> Vec<BodyDiagnostics> {
        match self.system.central() {
            Some(central) => self
                .system
                .bodies()
                .iter()
                .map(|b| diagnose(central, b, self.parameters.G))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Run `parameters.steps` steps, reporting after each
    ///
    /// Halts at the first failing step with [`SimError::StepFailed`]; the
    /// system keeps the state of the last successful step.
    pub fn run(&mut self, reporter: &mut dyn Reporter) -> Result<RunSummary, SimError> {
        let steps = self.parameters.steps;
        info!(
            "run: {} bodies, dt = {}, G = {:e}, {} steps",
            self.system.bodies().len(),
            self.parameters.dt,
            self.parameters.G,
            steps
        );

        let initial = self.diagnostics();

        for _ in 0..steps {
            let step = self.system.steps + 1;
            self.step()
                .map_err(|e| SimError::StepFailed { step, source: Box::new(e) })?;

            let central = self.system.central().ok_or(SimError::MissingCentralMass)?;
            trace!("step {step}: t = {}", self.system.t);
            reporter.report(&StepReport {
                step,
                t: self.system.t,
                central,
                bodies: self.system.bodies(),
            });
        }

        let bodies: Vec<BodyDrift> = initial
            .into_iter()
            .zip(self.diagnostics())
            .map(|(initial, last)| BodyDrift { initial, last })
            .collect();

        for d in &bodies {
            debug!("{}: r {} -> {}", d.initial.name, d.initial.radius, d.last.radius);
            info!(
                "{}: radius drift {:.3e}, energy drift {:.3e}",
                d.initial.name,
                d.radius_drift(),
                d.energy_drift()
            );
        }

        Ok(RunSummary {
            steps,
            t: self.system.t,
            bodies,
        })
    }
}
