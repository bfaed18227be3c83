//! Terminal "window" for watching orbits
//!
//! Maps world coordinates onto a character grid sized from the display
//! settings, draws the central mass as `@` and each body as the first letter
//! of its name, and redraws in place with ANSI escapes. Bodies whose display
//! size reaches a full cell are drawn as a filled disc of that radius.

use crate::configuration::config::DisplayConfig;
use crate::simulation::report::{Reporter, StepReport};

const PIXELS_PER_COLUMN: u32 = 10;
const PIXELS_PER_ROW: u32 = 20; // terminal cells are roughly twice as tall as wide

pub struct AsciiRenderer {
    cols: usize,
    rows: usize,
    extent: f64,       // world distance shown from the centre to the nearest edge
    radius_scale: f64, // body radius / radius_scale = disc radius in columns
    every: usize,
}

impl AsciiRenderer {
    pub fn new(cols: usize, rows: usize, extent: f64, every: usize) -> Self {
        Self {
            cols: cols.max(3),
            rows: rows.max(3),
            extent: if extent > 0.0 { extent } else { 1.0 },
            radius_scale: DisplayConfig::default().radius_scale,
            every: every.max(1),
        }
    }

    pub fn with_radius_scale(mut self, radius_scale: f64) -> Self {
        if radius_scale > 0.0 {
            self.radius_scale = radius_scale;
        }
        self
    }

    /// Grid sized from a pixel window, framing bodies out to `extent` with a margin
    pub fn from_display(display: &DisplayConfig, extent: f64, every: usize) -> Self {
        Self::new(
            (display.width / PIXELS_PER_COLUMN) as usize,
            (display.height / PIXELS_PER_ROW) as usize,
            extent * 1.2,
            every,
        )
        .with_radius_scale(display.radius_scale)
    }

    /// World position to `(column, row)`, `None` when off screen
    fn to_cell(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let half_w = (self.cols / 2) as f64;
        let half_h = (self.rows / 2) as f64;
        let scale = half_w.min(half_h * 2.0) / self.extent;

        let col = (half_w + x * scale).round();
        let row = (half_h - y * scale * 0.5).round();

        if col < 0.0 || row < 0.0 || col >= self.cols as f64 || row >= self.rows as f64 {
            return None;
        }
        Some((col as usize, row as usize))
    }

    /// Draw one frame, rows separated by newlines, with a border
    pub fn render_frame(&self, report: &StepReport<'_>) -> String {
        let mut grid = vec![vec![' '; self.cols]; self.rows];

        let c = report.central.position();
        if let Some((col, row)) = self.to_cell(c.x, c.y) {
            grid[row][col] = '@';
        }

        for body in report.bodies {
            let x = body.position();
            let Some((col, row)) = self.to_cell(x.x, x.y) else {
                continue;
            };
            let glyph = body.name().chars().next().unwrap_or('o');

            // disc radius in columns; rows count double
            let reach = body.display_size(self.radius_scale).floor().max(0.0) as i64;
            for dr in -(reach / 2)..=(reach / 2) {
                for dc in -reach..=reach {
                    if dc * dc + 4 * dr * dr > reach * reach {
                        continue;
                    }
                    let (c, r) = (col as i64 + dc, row as i64 + dr);
                    if c >= 0 && r >= 0 && (c as usize) < self.cols && (r as usize) < self.rows {
                        grid[r as usize][c as usize] = glyph;
                    }
                }
            }
        }

        let border = "-".repeat(self.cols);
        let mut out = String::with_capacity((self.cols + 3) * (self.rows + 2));
        out.push('+');
        out.push_str(&border);
        out.push_str("+\n");
        for row in grid {
            out.push('|');
            out.extend(row);
            out.push_str("|\n");
        }
        out.push('+');
        out.push_str(&border);
        out.push_str("+\n");
        out
    }
}

impl Reporter for AsciiRenderer {
    fn report(&mut self, report: &StepReport<'_>) {
        if report.step % self.every != 0 {
            return;
        }
        // clear screen, cursor home
        print!("\x1B[2J\x1B[1;1H");
        print!("{}", self.render_frame(report));
        println!("{} | step {} | t = {:.3}", report.central.name(), report.step, report.t);
    }
}
