//! Controller capability and the standard strategies.

use crate::error::{ControlError, ControlResult};
use crate::limit::CommandLimit;
use cruise_core::Real;
use cruise_vehicle::VehicleState;

/// A velocity-tracking control strategy.
///
/// Implementors provide [`controller`](Controller::controller), the raw
/// control law, and their [`CommandLimit`]. The provided
/// [`update`](Controller::update) wrapper is what the simulation engine
/// calls; it is the single place the actuator bound is applied.
pub trait Controller {
    /// Raw control law: map (time step, state, set-point) to an unclipped
    /// force command.
    fn controller(&mut self, dt: Real, state: &VehicleState, reference: Real) -> Real;

    /// Actuator bound applied by [`update`](Controller::update).
    fn limit(&self) -> CommandLimit;

    /// Compute the clipped command for this tick.
    fn update(&mut self, dt: Real, state: &VehicleState, reference: Real) -> Real {
        let raw = self.controller(dt, state, reference);
        self.limit().clip(raw)
    }
}

fn ensure_finite_gain(gain: Real, what: &'static str) -> ControlResult<Real> {
    if gain.is_finite() {
        Ok(gain)
    } else {
        Err(ControlError::InvalidArg { what })
    }
}

/// Proportional controller: `u = -kp * (v - ref)`.
#[derive(Debug, Clone)]
pub struct Proportional {
    kp: Real,
    limit: CommandLimit,
}

impl Proportional {
    pub const DEFAULT_KP: Real = 1000.0;

    pub fn new(kp: Real, limit: CommandLimit) -> ControlResult<Self> {
        Ok(Self {
            kp: ensure_finite_gain(kp, "kp must be finite")?,
            limit,
        })
    }
}

impl Default for Proportional {
    fn default() -> Self {
        Self {
            kp: Self::DEFAULT_KP,
            limit: CommandLimit::default(),
        }
    }
}

impl Controller for Proportional {
    fn controller(&mut self, _dt: Real, state: &VehicleState, reference: Real) -> Real {
        -self.kp * (state.velocity - reference)
    }

    fn limit(&self) -> CommandLimit {
        self.limit
    }
}

/// Proportional-derivative controller.
///
/// The derivative memory (previous velocity) is initialized on the first
/// call of a run; the first derivative term is therefore zero.
#[derive(Debug, Clone)]
pub struct Pd {
    kp: Real,
    kd: Real,
    limit: CommandLimit,
    prev_velocity: Option<Real>,
}

impl Pd {
    pub const DEFAULT_KP: Real = 2000.0;
    pub const DEFAULT_KD: Real = 1200.0;

    pub fn new(kp: Real, kd: Real, limit: CommandLimit) -> ControlResult<Self> {
        Ok(Self {
            kp: ensure_finite_gain(kp, "kp must be finite")?,
            kd: ensure_finite_gain(kd, "kd must be finite")?,
            limit,
            prev_velocity: None,
        })
    }
}

impl Default for Pd {
    fn default() -> Self {
        Self {
            kp: Self::DEFAULT_KP,
            kd: Self::DEFAULT_KD,
            limit: CommandLimit::default(),
            prev_velocity: None,
        }
    }
}

impl Controller for Pd {
    fn controller(&mut self, dt: Real, state: &VehicleState, reference: Real) -> Real {
        let prev = self.prev_velocity.unwrap_or(state.velocity);
        let p = -self.kp * (state.velocity - reference);
        let d = -self.kd * (state.velocity - prev) / dt;
        self.prev_velocity = Some(state.velocity);
        p + d
    }

    fn limit(&self) -> CommandLimit {
        self.limit
    }
}

/// Proportional-integral-derivative controller.
///
/// Integral and derivative memory are instance-private and start at zero,
/// so two fresh instances given identical inputs produce identical outputs.
#[derive(Debug, Clone)]
pub struct Pid {
    kp: Real,
    ki: Real,
    kd: Real,
    limit: CommandLimit,
    prev_velocity: Option<Real>,
    error_integral: Real,
}

impl Pid {
    pub const DEFAULT_KP: Real = 2000.0;
    pub const DEFAULT_KI: Real = 8.0;
    pub const DEFAULT_KD: Real = 1200.0;

    pub fn new(kp: Real, ki: Real, kd: Real, limit: CommandLimit) -> ControlResult<Self> {
        Ok(Self {
            kp: ensure_finite_gain(kp, "kp must be finite")?,
            ki: ensure_finite_gain(ki, "ki must be finite")?,
            kd: ensure_finite_gain(kd, "kd must be finite")?,
            limit,
            prev_velocity: None,
            error_integral: 0.0,
        })
    }
}

impl Default for Pid {
    fn default() -> Self {
        Self {
            kp: Self::DEFAULT_KP,
            ki: Self::DEFAULT_KI,
            kd: Self::DEFAULT_KD,
            limit: CommandLimit::default(),
            prev_velocity: None,
            error_integral: 0.0,
        }
    }
}

impl Controller for Pid {
    fn controller(&mut self, dt: Real, state: &VehicleState, reference: Real) -> Real {
        let prev = self.prev_velocity.unwrap_or(state.velocity);
        self.error_integral += dt * (state.velocity - reference);

        let p = -self.kp * (state.velocity - reference);
        let i = -self.ki * self.error_integral;
        let d = -self.kd * (state.velocity - prev) / dt;

        self.prev_velocity = Some(state.velocity);
        p + i + d
    }

    fn limit(&self) -> CommandLimit {
        self.limit
    }
}

/// Bang-bang controller: full throttle below the set-point, full brake
/// above it, idle at exact match.
#[derive(Debug, Clone, Default)]
pub struct BangBang {
    limit: CommandLimit,
}

impl BangBang {
    pub fn new(limit: CommandLimit) -> Self {
        Self { limit }
    }
}

impl Controller for BangBang {
    fn controller(&mut self, _dt: Real, state: &VehicleState, reference: Real) -> Real {
        if state.velocity < reference {
            self.limit.max_power
        } else if state.velocity > reference {
            -self.limit.max_power
        } else {
            0.0
        }
    }

    fn limit(&self) -> CommandLimit {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(velocity: Real) -> VehicleState {
        VehicleState::new(0.0, velocity)
    }

    #[test]
    fn proportional_law() {
        let mut ctrl = Proportional::new(2.0, CommandLimit::default()).unwrap();
        let u = ctrl.update(0.1, &state(3.0), 5.0);
        // -2 * (3 - 5) = 4, well inside the bound.
        assert_eq!(u, 4.0);
    }

    #[test]
    fn update_clips_large_raw_commands() {
        let mut ctrl = Proportional::default();
        let limit = ctrl.limit();
        let u = ctrl.update(0.1, &state(100.0), 0.0);
        assert_eq!(u, -limit.max_power);
    }

    #[test]
    fn pd_first_call_has_zero_derivative_term() {
        let mut with_d = Pd::new(100.0, 1e6, CommandLimit::new(1e12).unwrap()).unwrap();
        let mut p_only = Pd::new(100.0, 0.0, CommandLimit::new(1e12).unwrap()).unwrap();
        let u_d = with_d.update(0.1, &state(4.0), 5.0);
        let u_p = p_only.update(0.1, &state(4.0), 5.0);
        assert_eq!(u_d, u_p);
    }

    #[test]
    fn pd_derivative_reacts_to_velocity_change() {
        let mut ctrl = Pd::new(0.0, 10.0, CommandLimit::new(1e12).unwrap()).unwrap();
        ctrl.update(0.1, &state(0.0), 0.0);
        let u = ctrl.update(0.1, &state(1.0), 0.0);
        // -kd * dv/dt = -10 * 1.0 / 0.1
        assert!((u - (-100.0)).abs() < 1e-9);
    }

    #[test]
    fn pid_integral_accumulates_signed_error() {
        let mut ctrl = Pid::new(0.0, 10.0, 0.0, CommandLimit::new(1e12).unwrap()).unwrap();
        // Constant error v - ref = -1 for three ticks of 0.1 s.
        let mut u = 0.0;
        for _ in 0..3 {
            u = ctrl.update(0.1, &state(0.0), 1.0);
        }
        // integral = -0.3, u = -ki * integral = 3.0
        assert!((u - 3.0).abs() < 1e-9);
    }

    #[test]
    fn fresh_instances_share_no_state() {
        let mut a = Pid::default();
        let mut b = Pid::default();
        let inputs = [(0.0, 5.0), (1.0, 5.0), (2.5, 5.0), (4.0, 5.0)];

        let run = |ctrl: &mut Pid| {
            inputs
                .iter()
                .map(|&(v, r)| ctrl.update(0.1, &state(v), r))
                .collect::<Vec<_>>()
        };

        // Drive `a` once to dirty its memory, then compare fresh runs.
        run(&mut a);
        let mut a2 = Pid::default();
        assert_eq!(run(&mut a2), run(&mut b));
    }

    #[test]
    fn bang_bang_switches_on_sign_of_error() {
        let mut ctrl = BangBang::default();
        let max = ctrl.limit().max_power;
        assert_eq!(ctrl.update(0.1, &state(0.0), 10.0), max);
        assert_eq!(ctrl.update(0.1, &state(20.0), 10.0), -max);
        assert_eq!(ctrl.update(0.1, &state(10.0), 10.0), 0.0);
    }

    #[test]
    fn constructors_reject_non_finite_gains() {
        assert!(Proportional::new(Real::NAN, CommandLimit::default()).is_err());
        assert!(Pd::new(1.0, Real::INFINITY, CommandLimit::default()).is_err());
        assert!(Pid::new(1.0, Real::NAN, 1.0, CommandLimit::default()).is_err());
    }
}
