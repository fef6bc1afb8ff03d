//! On-disk trajectory file schema.

use cruise_core::Real;
use serde::{Deserialize, Serialize};

/// Ordered waypoint table: equal-length position, velocity, and time
/// sequences, chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoints {
    /// Positions (m).
    pub x: Vec<Real>,
    /// Velocities (m/s).
    pub v: Vec<Real>,
    /// Times (s), strictly increasing.
    pub t: Vec<Real>,
}

/// Serialized trajectory record: the waypoint table plus the nominal
/// simulation horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryFile {
    pub waypoints: Waypoints,
    pub t_final: Real,
}
