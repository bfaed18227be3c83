//! What the simulation hands to its presentation collaborators after a step
//!
//! The core never draws anything. After each step the [`Simulation`] builds a
//! [`StepReport`] and passes it to a [`Reporter`]; consoles, terminal
//! renderers and test recorders all sit behind that trait.
//!
//! [`Simulation`]: crate::simulation::engine::Simulation

use crate::simulation::states::{CentralMass, NVec2, OrbitingBody};

/// Name and position of one body at the end of a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySnapshot<'a> {
    pub name: &'a str,
    pub position: NVec2,
}

/// Read-only view of the system right after step `step`
#[derive(Debug, Clone, Copy)]
pub struct StepReport<'a> {
    pub step: usize, // 1-based step counter
    pub t: f64,      // simulated time after the step
    pub central: &'a CentralMass,
    pub bodies: &'a [OrbitingBody],
}

impl<'a> StepReport<'a> {
    /// `(name, position)` pairs in insertion order
    pub fn snapshots(&self) -> impl Iterator<Item = BodySnapshot<'a>> + 'a {
        self.bodies.iter().map(|b| BodySnapshot {
            name: b.name(),
            position: b.position(),
        })
    }
}

/// Receives the state of the system after every step
pub trait Reporter {
    fn report(&mut self, report: &StepReport<'_>);
}

impl<F> Reporter for F
where
    F: FnMut(&StepReport<'_>),
{
    fn report(&mut self, report: &StepReport<'_>) {
        (*self)(report)
    }
}

/// Discards everything
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _report: &StepReport<'_>) {}
}

/// Stores every snapshot, grouped by body name in first-seen order
#[derive(Debug, Default, Clone)]
pub struct TrajectoryRecorder {
    names: Vec<String>,
    paths: Vec<Vec<NVec2>>,
    steps: Vec<usize>,
}

impl TrajectoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step counters received, in order
    pub fn steps(&self) -> &[usize] {
        &self.steps
    }

    /// Body names in reporting order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Every recorded position of `name`
    pub fn trajectory(&self, name: &str) -> Option<&[NVec2]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.paths[i].as_slice())
    }
}

impl Reporter for TrajectoryRecorder {
    fn report(&mut self, report: &StepReport<'_>) {
        self.steps.push(report.step);
        for snap in report.snapshots() {
            match self.names.iter().position(|n| n == snap.name) {
                Some(i) => self.paths[i].push(snap.position),
                None => {
                    self.names.push(snap.name.to_string());
                    self.paths.push(vec![snap.position]);
                }
            }
        }
    }
}
