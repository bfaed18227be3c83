//! Build validated runtime scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a `Scenario` bundle:
//! - numerical parameters (`Parameters`)
//! - system state (`System` with the central mass and bodies at t = 0)
//! - display settings for whichever renderer is attached

use crate::configuration::config::{BodyConfig, DisplayConfig, ScenarioConfig};
use crate::error::SimError;
use crate::simulation::params::Parameters;
use crate::simulation::states::{CentralMass, OrbitingBody, System};

#[derive(Debug, Clone)]
pub struct Scenario {
    pub parameters: Parameters,
    pub system: System,
    pub display: DisplayConfig,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SimError> {
        let c = cfg.central;
        let central = CentralMass::new(c.name, c.mass, c.radius, c.temperature)?;

        // Bodies: map `BodyConfig` -> runtime `OrbitingBody`, keeping file order
        let mut system = System::with_central(central);
        for bc in cfg.bodies {
            system.add_body(build_body(bc)?);
        }

        let p = cfg.parameters;
        let parameters = Parameters {
            steps: p.steps,
            dt: p.dt,
            G: p.G,
            min_distance: p.min_distance,
        };
        parameters.validate()?;

        if !(cfg.display.radius_scale > 0.0) {
            return Err(SimError::InvalidParameter {
                field: "radius_scale",
                value: cfg.display.radius_scale,
                reason: "must be positive",
            });
        }

        Ok(Self {
            parameters,
            system,
            display: cfg.display,
        })
    }

    /// Largest initial distance of any body, used to frame renderers
    pub fn extent(&self) -> f64 {
        self.system
            .bodies()
            .iter()
            .map(|b| b.distance().abs())
            .fold(0.0, f64::max)
    }
}

fn build_body(bc: BodyConfig) -> Result<OrbitingBody, SimError> {
    let &[vx, vy] = bc.v.as_slice() else {
        return Err(SimError::InvalidVector {
            field: format!("{}.v", bc.name),
            len: bc.v.len(),
        });
    };
    OrbitingBody::new(bc.name, bc.radius, bc.mass, bc.distance, vx, vy, bc.color)
}
