//! Run history: the engine's sole handoff to plotting and followers.

use crate::exit::ExitStatus;
use cruise_core::Real;
use cruise_traj::{TrajResult, Trajectory};
use cruise_vehicle::VehicleState;
use serde::{Deserialize, Serialize};

/// Time series produced by one simulation run, one entry per sampling
/// instant, immutable once the run terminates.
///
/// All four sequences are index-aligned: `control[k]` is the command
/// computed at `time[k]` from `states[k]` and `reference[k]`, and (by the
/// zero-order hold) the command that produced `states[k + 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunHistory {
    /// Sampling instants (s), starting at 0 with a fixed step.
    pub time: Vec<Real>,
    /// Vehicle state at each instant.
    pub states: Vec<VehicleState>,
    /// Clipped command computed at each instant (N).
    pub control: Vec<Real>,
    /// Reference set-point at each instant (m/s).
    pub reference: Vec<Real>,
    /// Reason the run terminated.
    pub exit_status: ExitStatus,
}

impl RunHistory {
    /// Number of sampling instants recorded.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Position sequence aligned to `time`.
    pub fn positions(&self) -> Vec<Real> {
        self.states.iter().map(|s| s.position).collect()
    }

    /// Velocity sequence aligned to `time`.
    pub fn velocities(&self) -> Vec<Real> {
        self.states.iter().map(|s| s.velocity).collect()
    }

    /// Build a follower reference from this run's own history, with
    /// `offset` applied to the first position sample.
    pub fn to_trajectory(&self, offset: Real) -> TrajResult<Trajectory> {
        Trajectory::from_samples(&self.time, &self.positions(), &self.velocities(), offset)
    }
}
