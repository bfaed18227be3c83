//! Plain-text step log: a `Period: n` header followed by one line per body

use std::io::Write;

use crate::simulation::report::{Reporter, StepReport};

/// Writes every `every`-th step to `out` (stdout by default)
pub struct ConsoleReporter<W: Write = std::io::Stdout> {
    out: W,
    every: usize,
    positions: bool, // append the current position to each body line
}

impl ConsoleReporter {
    pub fn stdout(every: usize) -> Self {
        Self::new(std::io::stdout(), every)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, every: usize) -> Self {
        Self {
            out,
            every: every.max(1),
            positions: true,
        }
    }

    pub fn without_positions(mut self) -> Self {
        self.positions = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_step(&mut self, report: &StepReport<'_>) -> std::io::Result<()> {
        writeln!(self.out, "Period: {}", report.step)?;
        for body in report.bodies {
            if self.positions {
                let x = body.position();
                writeln!(self.out, "{body} at ({:.6}, {:.6})", x.x, x.y)?;
            } else {
                writeln!(self.out, "{body}")?;
            }
        }
        Ok(())
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, report: &StepReport<'_>) {
        if report.step % self.every != 0 {
            return;
        }
        if let Err(e) = self.write_step(report) {
            log::warn!("console reporter: {e}");
        }
    }
}
