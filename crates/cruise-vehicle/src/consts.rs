//! Default physical constants.
//!
//! These are defaults consumed by the convenience constructors in
//! [`crate::params`]; every simulation carries its own copy inside explicit
//! parameter structs, so independent runs never share mutable state.

use cruise_core::Real;

/// Nominal car mass (kg).
pub const CAR_MASS_KG: Real = 1300.0;

/// Gravitational acceleration (m/s^2).
pub const GRAVITY_M_S2: Real = 9.81;

/// Ground height of the flat world (m).
pub const GROUND_HEIGHT_M: Real = 2.0;

/// Grade of the default hill (rise over run).
pub const HILL_SLOPE: Real = 8.0 / 115.0;

/// Maximum engine/brake force magnitude (N).
pub const MAX_POWER_W: Real = 5000.0;
