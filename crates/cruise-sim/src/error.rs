//! Error types for simulation runs.
//!
//! Everything inside a run terminates as [`crate::ExitStatus`] data; the
//! only hard failures are malformed options or sources detected before the
//! loop starts.

use thiserror::Error;

/// Errors encountered before a simulation run can start.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Trajectory error: {0}")]
    Trajectory(#[from] cruise_traj::TrajError),
}

pub type SimResult<T> = Result<T, SimError>;
