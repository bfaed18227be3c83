//! Core state types for the orbital simulation.
//!
//! - `CentralMass`  the immobile source of gravity, pinned at the origin
//! - `OrbitingBody` a planet-like body integrated every step
//! - `System`       owns one central mass, the ordered bodies and the time `t`

use std::fmt;

use nalgebra::Vector2;

use crate::error::{require_finite, require_positive, SimError};

pub type NVec2 = Vector2<f64>;

/// The dominant gravitational source. Never moves, never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct CentralMass {
    name: String,
    mass: f64,
    radius: f64,
    temperature: f64, // informational only
}

impl CentralMass {
    /// Fails if `mass` or `radius` is not a positive finite number
    pub fn new(name: impl Into<String>, mass: f64, radius: f64, temperature: f64) -> Result<Self, SimError> {
        Ok(Self {
            name: name.into(),
            mass: require_positive("central mass", mass)?,
            radius: require_positive("central radius", radius)?,
            temperature,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Always the origin
    pub fn position(&self) -> NVec2 {
        NVec2::zeros()
    }
}

impl fmt::Display for CentralMass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sun {}: mass={}, radius={}, temperature={}",
            self.name, self.mass, self.radius, self.temperature
        )
    }
}

/// A body orbiting the central mass.
///
/// `mass` is carried for reporting but takes no part in the force law: the
/// central mass pulls the body, the body never pulls back.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitingBody {
    name: String,
    radius: f64,   // display size only
    mass: f64,
    distance: f64, // initial distance from the origin
    x: NVec2,      // position
    v: NVec2,      // velocity
    color: String,
}

impl OrbitingBody {
    /// Place a body on the +x axis at `distance` with initial velocity `(vx, vy)`
    ///
    /// A zero `distance` is accepted here; stepping such a body reports
    /// [`SimError::DegenerateGeometry`].
    pub fn new(
        name: impl Into<String>,
        radius: f64,
        mass: f64,
        distance: f64,
        vx: f64,
        vy: f64,
        color: impl Into<String>,
    ) -> Result<Self, SimError> {
        let distance = require_finite("distance", distance)?;
        Ok(Self {
            name: name.into(),
            radius: require_positive("body radius", radius)?,
            mass: require_positive("body mass", mass)?,
            distance,
            x: NVec2::new(distance, 0.0),
            v: NVec2::new(require_finite("vx", vx)?, require_finite("vy", vy)?),
            color: color.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Initial distance from the origin, not the current one
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn position(&self) -> NVec2 {
        self.x
    }

    pub fn velocity(&self) -> NVec2 {
        self.v
    }

    pub fn set_velocity(&mut self, vx: f64, vy: f64) {
        self.v = NVec2::new(vx, vy);
    }

    /// Set both coordinates in one call
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x = NVec2::new(x, y);
    }

    /// Radius shrunk by a display-only scale factor
    pub fn display_size(&self, radius_scale: f64) -> f64 {
        self.radius / radius_scale
    }
}

impl fmt::Display for OrbitingBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Planet {}: mass={}, radius={}, distance={}",
            self.name, self.mass, self.radius, self.distance
        )
    }
}

/// One central mass plus the bodies orbiting it, in insertion order
#[derive(Debug, Clone, Default)]
pub struct System {
    central: Option<CentralMass>,
    bodies: Vec<OrbitingBody>,
    pub t: f64,       // simulated time
    pub steps: usize, // completed steps
}

impl System {
    /// An empty system with no central mass yet
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_central(central: CentralMass) -> Self {
        Self {
            central: Some(central),
            ..Self::default()
        }
    }

    /// Register (or replace) the central mass
    pub fn set_central(&mut self, central: CentralMass) {
        self.central = Some(central);
    }

    pub fn add_body(&mut self, body: OrbitingBody) {
        self.bodies.push(body);
    }

    pub fn central(&self) -> Option<&CentralMass> {
        self.central.as_ref()
    }

    pub fn bodies(&self) -> &[OrbitingBody] {
        &self.bodies
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [OrbitingBody] {
        &mut self.bodies
    }

    pub fn body(&self, name: &str) -> Option<&OrbitingBody> {
        self.bodies.iter().find(|b| b.name == name)
    }

    /// One summary line per body, in insertion order
    pub fn show_bodies(&self) -> Vec<String> {
        self.bodies.iter().map(ToString::to_string).collect()
    }
}
