//! Error taxonomy for building and stepping a simulation
//!
//! Everything fallible in the library returns [`SimError`]; the binary wraps
//! it in `anyhow` for context.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// A step was requested before any central mass was registered
    #[error("no central mass registered; cannot compute gravity")]
    MissingCentralMass,

    /// A body came too close to the central mass for the force law to be defined
    #[error("degenerate configuration: body `{body}` is {distance:e} from the central mass")]
    DegenerateGeometry { body: String, distance: f64 },

    /// A step produced an infinite or NaN position/velocity
    #[error("non-finite state for body `{body}`")]
    NonFiniteState { body: String },

    /// Physically meaningless input rejected at construction time
    #[error("invalid {field} = {value}: {reason}")]
    InvalidParameter {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A configured vector did not have exactly two components
    #[error("`{field}` must have 2 components, got {len}")]
    InvalidVector { field: String, len: usize },

    /// Wraps the error that halted a run with the step it happened on
    #[error("simulation halted at step {step}")]
    StepFailed {
        step: usize,
        #[source]
        source: Box<SimError>,
    },

    #[error("failed to read scenario file")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario YAML")]
    Yaml(#[from] serde_yaml::Error),
}

impl SimError {
    /// The innermost error, looking through [`SimError::StepFailed`]
    pub fn root(&self) -> &SimError {
        match self {
            SimError::StepFailed { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Reject non-finite or non-positive values
pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64, SimError> {
    if !value.is_finite() {
        return Err(SimError::InvalidParameter { field, value, reason: "must be finite" });
    }
    if value <= 0.0 {
        return Err(SimError::InvalidParameter { field, value, reason: "must be positive" });
    }
    Ok(value)
}

/// Reject NaN and infinities
pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<f64, SimError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::InvalidParameter { field, value, reason: "must be finite" })
    }
}
