//! Exit statuses and the termination conditions that raise them.

use cruise_core::Real;
use cruise_traj::Trajectory;
use cruise_vehicle::VehicleState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position tolerance of the default termination rule (m).
pub const POSITION_TOL: Real = 0.02;

/// Velocity tolerance of the default termination rule (m/s).
pub const VELOCITY_TOL: Real = 0.02;

/// Reason a simulation run terminated. Set exactly once, at the instant the
/// corresponding condition is first detected; there is no resumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitStatus {
    /// The termination rule's criterion was met.
    Complete,
    /// The trajectory's nominal horizon elapsed first.
    Timeout,
    /// The controller produced an infinite command.
    InfValue,
    /// The controller produced a not-a-number command.
    NanValue,
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ExitStatus::Complete => "SUCCESS: End reached.",
            ExitStatus::Timeout => "TIMEOUT: Simulation end time reached.",
            ExitStatus::InfValue => "ERROR: Your controller returned a command of inf.",
            ExitStatus::NanValue => "ERROR: Your controller returned a command of nan.",
        };
        f.write_str(msg)
    }
}

/// Safety condition on the just-produced command. Checked before the
/// timeout and completion conditions every tick, including tick 0, so a
/// catastrophic controller output is reported deterministically instead of
/// silently timing out.
pub fn safety_exit(command: Real) -> Option<ExitStatus> {
    if command.is_infinite() {
        return Some(ExitStatus::InfValue);
    }
    if command.is_nan() {
        return Some(ExitStatus::NanValue);
    }
    None
}

/// Timeout condition: the virtual clock reached the trajectory's horizon.
pub fn time_exit(time: Real, t_final: Real) -> Option<ExitStatus> {
    if time >= t_final {
        return Some(ExitStatus::Timeout);
    }
    None
}

/// Default completion rule: the vehicle has arrived at the trajectory's
/// terminal position and nearly stopped.
///
/// If the initial position already equals the terminal position, a grace
/// period of one second must elapse before the rule is consulted, so a run
/// that starts "at the end" still has to hold there.
#[derive(Debug, Clone, Copy)]
pub struct TrajEndRule {
    terminal_position: Real,
    min_time: Real,
}

impl TrajEndRule {
    pub fn new(initial: &VehicleState, trajectory: &Trajectory) -> Self {
        let terminal_position = trajectory.terminal_position();
        let min_time = if initial.position == terminal_position {
            1.0
        } else {
            0.0
        };
        Self {
            terminal_position,
            min_time,
        }
    }

    pub fn check(&self, time: Real, state: &VehicleState) -> Option<ExitStatus> {
        if time >= self.min_time
            && (state.position - self.terminal_position).abs() < POSITION_TOL
            && state.velocity <= VELOCITY_TOL
        {
            return Some(ExitStatus::Complete);
        }
        None
    }
}
