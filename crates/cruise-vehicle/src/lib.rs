//! Longitudinal vehicle dynamics.
//!
//! Provides:
//! - Vehicle and world parameter structs (immutable after construction)
//! - The two-state equations of motion (position, velocity) with optional
//!   aerodynamic drag and constant road grade
//! - Fixed-step RK4 integration of one sampling interval under a held command

pub mod consts;
pub mod integrator;
pub mod model;
pub mod params;

pub use integrator::IntegratorKind;
pub use model::{Vehicle, VehicleState};
pub use params::{VehicleParams, World};

use thiserror::Error;

/// Errors encountered while constructing vehicle or world parameters.
#[derive(Error, Debug)]
pub enum VehicleError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type VehicleResult<T> = Result<T, VehicleError>;

impl From<cruise_core::CoreError> for VehicleError {
    fn from(e: cruise_core::CoreError) -> Self {
        match e {
            cruise_core::CoreError::NonFinite { what, .. } => VehicleError::InvalidArg { what },
            cruise_core::CoreError::InvalidArg { what } => VehicleError::InvalidArg { what },
        }
    }
}
