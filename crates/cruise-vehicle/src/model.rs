//! Vehicle dynamics model.
//!
//! The model integrates the car's equations of motion across one sampling
//! interval under a zero-order-hold command:
//!
//! - `x_dot = max(v, 0)`
//! - `v_dot = (F - drag - grade) / m`
//!
//! Drag is the usual `0.5 * rho * Cd * A * v^2`; the grade force is
//! `m * g * sin(atan(slope))`, constant and independent of position (a single
//! constant-grade hill). The returned velocity is clamped to zero from below:
//! braking stops the car rather than reversing it.

use crate::integrator::{self, IntegratorKind, StateVec};
use crate::params::{VehicleParams, World};
use crate::VehicleResult;
use cruise_core::Real;
use serde::{Deserialize, Serialize};

/// Kinematic state of the vehicle at one sampling instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    /// Longitudinal position (m).
    pub position: Real,
    /// Longitudinal velocity (m/s), never negative.
    pub velocity: Real,
}

impl VehicleState {
    pub fn new(position: Real, velocity: Real) -> Self {
        Self {
            position,
            velocity: velocity.max(0.0),
        }
    }

    fn pack(&self) -> StateVec {
        [self.position, self.velocity]
    }

    /// Unpack from the integrator's vector form, enforcing `velocity >= 0`.
    fn unpack(s: StateVec) -> Self {
        Self {
            position: s[0],
            velocity: s[1].max(0.0),
        }
    }
}

/// A vehicle with fixed physical parameters and an integrator selection.
#[derive(Debug, Clone)]
pub struct Vehicle {
    params: VehicleParams,
    integrator: IntegratorKind,
}

impl Vehicle {
    pub fn new(params: VehicleParams) -> VehicleResult<Self> {
        Ok(Self {
            params: params.validated()?,
            integrator: IntegratorKind::default(),
        })
    }

    /// Select a different integrator (RK4 by default).
    pub fn with_integrator(mut self, integrator: IntegratorKind) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn params(&self) -> &VehicleParams {
        &self.params
    }

    /// State derivative for a fixed command, as an autonomous ODE.
    pub fn rhs(
        &self,
        world: &World,
        state: &VehicleState,
        command: Real,
        drag: bool,
        slope: bool,
    ) -> StateVec {
        let x_dot = state.velocity.max(0.0);

        let mut force = command;
        if drag {
            force -= 0.5
                * self.params.air_density
                * self.params.drag_coeff
                * self.params.frontal_area
                * x_dot
                * x_dot;
        }
        if slope {
            force -= self.params.mass * world.gravity * world.slope.atan().sin();
        }

        [x_dot, force / self.params.mass]
    }

    /// Integrate dynamics forward from `state` with `command` held constant
    /// across `dt`. One fixed micro-step per call; pure function of its
    /// inputs. `dt > 0` is validated by the simulation engine.
    pub fn step(
        &self,
        world: &World,
        state: &VehicleState,
        command: Real,
        dt: Real,
        drag: bool,
        slope: bool,
    ) -> VehicleState {
        let rhs = |_t: Real, s: StateVec| {
            let unpacked = VehicleState::unpack(s);
            self.rhs(world, &unpacked, command, drag, slope)
        };

        let s = match self.integrator {
            IntegratorKind::Rk4 => integrator::rk4_step(rhs, 0.0, state.pack(), dt),
            IntegratorKind::ForwardEuler => integrator::euler_step(rhs, 0.0, state.pack(), dt),
        };
        VehicleState::unpack(s)
    }
}
