//! Vehicle and world parameter structs.

use crate::consts;
use crate::{VehicleError, VehicleResult};
use cruise_core::{Real, ensure_positive};
use serde::{Deserialize, Serialize};

/// Physical parameters of one vehicle. Fixed for the lifetime of a
/// [`crate::Vehicle`]; never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleParams {
    /// Mass (kg).
    pub mass: Real,
    /// Aerodynamic drag coefficient (dimensionless).
    pub drag_coeff: Real,
    /// Frontal cross-sectional area (m^2).
    pub frontal_area: Real,
    /// Air density (kg/m^3).
    pub air_density: Real,
    /// Body length (m).
    pub length: Real,
    /// Body height (m).
    pub height: Real,
}

impl VehicleParams {
    /// Nominal sedan parameterization for a given mass.
    ///
    /// Drag coefficient 0.275 and an empirical frontal area that scales
    /// with mass; air density at sea level.
    pub fn sedan(mass: Real) -> VehicleResult<Self> {
        ensure_positive(mass, "mass must be positive")?;
        Ok(Self {
            mass,
            drag_coeff: 0.275,
            frontal_area: 1.6 + 0.00056 * (mass - 765.0),
            air_density: 1.225,
            length: 7.5,
            height: 1.2,
        })
    }

    /// Validate an arbitrary parameter set.
    pub fn validated(self) -> VehicleResult<Self> {
        ensure_positive(self.mass, "mass must be positive")?;
        ensure_positive(self.frontal_area, "frontal_area must be positive")?;
        ensure_positive(self.air_density, "air_density must be positive")?;
        if !self.drag_coeff.is_finite() || self.drag_coeff < 0.0 {
            return Err(VehicleError::InvalidArg {
                what: "drag_coeff must be finite and non-negative",
            });
        }
        Ok(self)
    }
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self {
            mass: consts::CAR_MASS_KG,
            drag_coeff: 0.275,
            frontal_area: 1.6 + 0.00056 * (consts::CAR_MASS_KG - 765.0),
            air_density: 1.225,
            length: 7.5,
            height: 1.2,
        }
    }
}

/// World the vehicle drives through. Fixed per simulation; consumed
/// read-only when computing forces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Gravitational acceleration (m/s^2).
    pub gravity: Real,
    /// Ground height used by external renderers (m).
    pub ground_height: Real,
    /// Road grade as rise over run (dimensionless).
    pub slope: Real,
    /// Whether the world contains a hill.
    pub hill: bool,
}

impl World {
    /// Flat world at the given ground height.
    pub fn flat(ground_height: Real) -> Self {
        Self {
            gravity: consts::GRAVITY_M_S2,
            ground_height,
            slope: 0.0,
            hill: false,
        }
    }

    /// World with a single constant-grade hill.
    pub fn hill(slope: Real) -> Self {
        Self {
            gravity: consts::GRAVITY_M_S2,
            ground_height: consts::GROUND_HEIGHT_M,
            slope,
            hill: true,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::flat(consts::GROUND_HEIGHT_M)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sedan_area_scales_with_mass() {
        let params = VehicleParams::sedan(1300.0).unwrap();
        assert!((params.frontal_area - (1.6 + 0.00056 * 535.0)).abs() < 1e-12);
        assert_eq!(params.mass, 1300.0);
    }

    #[test]
    fn sedan_rejects_bad_mass() {
        assert!(VehicleParams::sedan(0.0).is_err());
        assert!(VehicleParams::sedan(-100.0).is_err());
        assert!(VehicleParams::sedan(Real::NAN).is_err());
    }

    #[test]
    fn validated_rejects_negative_drag() {
        let params = VehicleParams {
            drag_coeff: -0.1,
            ..VehicleParams::default()
        };
        assert!(params.validated().is_err());
    }

    #[test]
    fn world_constructors() {
        let flat = World::flat(2.0);
        assert!(!flat.hill);
        assert_eq!(flat.slope, 0.0);

        let hill = World::hill(8.0 / 115.0);
        assert!(hill.hill);
        assert!(hill.slope > 0.0);
    }
}
