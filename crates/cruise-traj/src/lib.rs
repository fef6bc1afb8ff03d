//! cruise-traj: reference trajectory format, loading, and lookup.
//!
//! A trajectory is an ordered table of (time, position, velocity) waypoints
//! plus a nominal horizon `t_final`. Lookup is step/hold: the set-point at
//! time `t` is the velocity of the last waypoint whose time is at or before
//! `t`, held indefinitely past the end of the table.

pub mod schema;
pub mod trajectory;

pub use schema::{TrajectoryFile, Waypoints};
pub use trajectory::Trajectory;

use thiserror::Error;

pub type TrajResult<T> = Result<T, TrajError>;

/// Errors raised while loading or validating a trajectory source.
#[derive(Error, Debug)]
pub enum TrajError {
    #[error("Empty waypoint table")]
    EmptyTable,

    #[error("Waypoint field lengths differ: x={x_len}, v={v_len}, t={t_len}")]
    LengthMismatch {
        x_len: usize,
        v_len: usize,
        t_len: usize,
    },

    #[error("Waypoint times must be strictly increasing (index {index})")]
    NonMonotonicTime { index: usize },

    #[error("Non-finite waypoint value: {field}[{index}]")]
    NonFiniteSample { field: &'static str, index: usize },

    #[error("Trajectory horizon t_final must be finite, got {value}")]
    NonFiniteHorizon { value: f64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
