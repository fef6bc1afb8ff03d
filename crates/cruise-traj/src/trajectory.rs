//! Validated trajectory table and set-point lookup.

use crate::schema::{TrajectoryFile, Waypoints};
use crate::{TrajError, TrajResult};
use cruise_core::Real;
use std::path::Path;

/// A validated, immutable reference trajectory.
///
/// The timeout bound of the simulation loop relies on `t_final` being
/// finite; construction rejects anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    waypoints: Waypoints,
    t_final: Real,
}

impl Trajectory {
    /// Build from an already-parsed waypoint table.
    pub fn new(waypoints: Waypoints, t_final: Real) -> TrajResult<Self> {
        validate(&waypoints, t_final)?;
        Ok(Self { waypoints, t_final })
    }

    /// Load from a serialized JSON trajectory file.
    ///
    /// `offset` is a longitudinal spacing added to the first position
    /// sample, used to stagger a leader ahead of a follower.
    pub fn from_file(path: &Path, offset: Real) -> TrajResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: TrajectoryFile = serde_json::from_str(&content)?;
        let mut waypoints = file.waypoints;
        if let Some(first) = waypoints.x.first_mut() {
            *first += offset;
        }
        Self::new(waypoints, file.t_final)
    }

    /// Build from a prior run's own time/position/velocity history, with
    /// `offset` added to the first position sample. The horizon is the last
    /// recorded time.
    pub fn from_samples(t: &[Real], x: &[Real], v: &[Real], offset: Real) -> TrajResult<Self> {
        let mut x = x.to_vec();
        if let Some(first) = x.first_mut() {
            *first += offset;
        }
        let t_final = t.last().copied().unwrap_or(0.0);
        Self::new(
            Waypoints {
                x,
                v: v.to_vec(),
                t: t.to_vec(),
            },
            t_final,
        )
    }

    /// Set-point velocity at time `t`: the velocity of the last waypoint
    /// whose time is at or before `t`, held past the end of the table.
    /// Queries earlier than the first waypoint return the first velocity.
    pub fn velocity_at(&self, t: Real) -> Real {
        for (i, &wt) in self.waypoints.t.iter().enumerate() {
            if t < wt {
                return self.waypoints.v[i.saturating_sub(1)];
            }
        }
        self.waypoints.v[self.waypoints.v.len() - 1]
    }

    /// Nominal simulation horizon (s).
    pub fn t_final(&self) -> Real {
        self.t_final
    }

    /// First waypoint's (position, velocity): the initial vehicle state.
    pub fn initial_sample(&self) -> (Real, Real) {
        (self.waypoints.x[0], self.waypoints.v[0])
    }

    /// Last waypoint's position, defining "trajectory end" for the default
    /// termination rule.
    pub fn terminal_position(&self) -> Real {
        self.waypoints.x[self.waypoints.x.len() - 1]
    }

    /// Last waypoint's velocity.
    pub fn terminal_velocity(&self) -> Real {
        self.waypoints.v[self.waypoints.v.len() - 1]
    }

    pub fn waypoints(&self) -> &Waypoints {
        &self.waypoints
    }
}

fn validate(waypoints: &Waypoints, t_final: Real) -> TrajResult<()> {
    if waypoints.t.is_empty() {
        return Err(TrajError::EmptyTable);
    }
    if waypoints.x.len() != waypoints.t.len() || waypoints.v.len() != waypoints.t.len() {
        return Err(TrajError::LengthMismatch {
            x_len: waypoints.x.len(),
            v_len: waypoints.v.len(),
            t_len: waypoints.t.len(),
        });
    }
    for (field, values) in [
        ("x", &waypoints.x),
        ("v", &waypoints.v),
        ("t", &waypoints.t),
    ] {
        if let Some(index) = values.iter().position(|s| !s.is_finite()) {
            return Err(TrajError::NonFiniteSample { field, index });
        }
    }
    for index in 1..waypoints.t.len() {
        if waypoints.t[index] <= waypoints.t[index - 1] {
            return Err(TrajError::NonMonotonicTime { index });
        }
    }
    if !t_final.is_finite() {
        return Err(TrajError::NonFiniteHorizon { value: t_final });
    }
    Ok(())
}
