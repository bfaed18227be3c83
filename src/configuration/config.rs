//! Configuration types for loading orbital scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`CentralConfig`]    – the fixed central mass
//! - [`BodyConfig`]       – initial state of each orbiting body
//! - [`ParametersConfig`] – step count, time step and physical constants
//! - [`DisplayConfig`]    – window size and radius scale for renderers
//! - [`ScenarioConfig`]   – top-level wrapper
//!
//! # YAML format
//!
//! ```yaml
//! central:
//!   name: SOL
//!   mass: 5000.0
//!   radius: 10000000.0
//!   temperature: 5800.0
//!
//! bodies:
//!   - name: EARTH
//!     radius: 1.0
//!     mass: 5.972e24
//!     distance: 150.0       # starts at (distance, 0)
//!     v: [0.0, 30.0]
//!     color: blue
//!
//! parameters:
//!   steps: 500
//!   dt: 0.001               # optional, default 0.001
//!   G: 6.67430e-11          # optional
//!   min_distance: 1.0e-9    # optional
//!
//! display:                  # optional
//!   width: 800
//!   height: 600
//!   radius_scale: 10.0
//! ```
//!
//! [`Scenario`](crate::simulation::scenario::Scenario) validates this and
//! turns it into runtime types.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::SimError;
use crate::simulation::params::{DEFAULT_DT, DEFAULT_MIN_DISTANCE, GRAVITATIONAL_CONSTANT};

/// The central mass
#[derive(Deserialize, Debug, Clone)]
pub struct CentralConfig {
    pub name: String,
    pub mass: f64,        // must be positive
    pub radius: f64,
    #[serde(default)]
    pub temperature: f64, // informational
}

/// Initial state of one orbiting body
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: String,
    pub radius: f64,   // display size
    pub mass: f64,     // must be positive, unused by the force law
    pub distance: f64, // initial x position, y starts at 0
    pub v: Vec<f64>,   // initial velocity [vx, vy]
    #[serde(default = "default_color")]
    pub color: String,
}

/// Numerical parameters and physical constants
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub steps: usize,
    #[serde(default = "default_dt")]
    pub dt: f64,
    #[serde(default = "default_g")]
    pub G: f64,
    #[serde(default = "default_min_distance")]
    pub min_distance: f64,
}

/// Presentation settings, ignored by the physics
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    pub radius_scale: f64, // display radius = body radius / radius_scale
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            radius_scale: 10.0,
        }
    }
}

/// Top-level scenario configuration loaded from YAML
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub central: CentralConfig,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, SimError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn default_color() -> String {
    "white".to_string()
}

fn default_dt() -> f64 {
    DEFAULT_DT
}

fn default_g() -> f64 {
    GRAVITATIONAL_CONSTANT
}

fn default_min_distance() -> f64 {
    DEFAULT_MIN_DISTANCE
}
