//! Actuator command limit.

use crate::error::{ControlError, ControlResult};
use cruise_core::Real;
use cruise_vehicle::consts;
use serde::{Deserialize, Serialize};

/// Symmetric actuator bound on the force command (N). Positive commands are
/// throttle, negative commands are brake.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommandLimit {
    /// Maximum command magnitude, must be positive.
    pub max_power: Real,
}

impl CommandLimit {
    pub fn new(max_power: Real) -> ControlResult<Self> {
        if !max_power.is_finite() || max_power <= 0.0 {
            return Err(ControlError::InvalidArg {
                what: "max_power must be positive and finite",
            });
        }
        Ok(Self { max_power })
    }

    /// Clip a raw command to `[-max_power, +max_power]`, boundary inclusive.
    ///
    /// Non-finite commands pass through unchanged so the engine's safety
    /// check can observe them; clamping an inf to the bound would mask a
    /// misbehaving controller as a saturated one.
    pub fn clip(&self, raw: Real) -> Real {
        if raw.is_finite() {
            raw.clamp(-self.max_power, self.max_power)
        } else {
            raw
        }
    }
}

impl Default for CommandLimit {
    fn default() -> Self {
        Self {
            max_power: consts::MAX_POWER_W,
        }
    }
}
