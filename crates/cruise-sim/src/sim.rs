//! Simulation runner: the sampling loop and its termination state machine.

use crate::error::{SimError, SimResult};
use crate::exit::{self, ExitStatus, TrajEndRule};
use crate::history::RunHistory;
use cruise_controls::Controller;
use cruise_core::Real;
use cruise_traj::Trajectory;
use cruise_vehicle::{Vehicle, VehicleState, World};
use std::fmt;

/// Caller-supplied termination predicate over (time, state).
pub type ExitFn = Box<dyn Fn(Real, &VehicleState) -> Option<ExitStatus>>;

/// Completion criterion consulted every tick, after the safety and timeout
/// checks.
pub enum Termination {
    /// Complete when the vehicle has arrived at the trajectory's terminal
    /// position and nearly stopped (see [`TrajEndRule`]).
    TrajectoryEnd,
    /// Never complete; the run ends by timeout or a safety exit.
    Never,
    /// Custom predicate; whatever status it returns ends the run.
    Custom(ExitFn),
}

impl fmt::Debug for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::TrajectoryEnd => f.write_str("TrajectoryEnd"),
            Termination::Never => f.write_str("Never"),
            Termination::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Options for simulation runs.
#[derive(Debug)]
pub struct SimOptions {
    /// Fixed sampling period (seconds).
    pub sampling_period: Real,
    /// Apply aerodynamic drag.
    pub drag: bool,
    /// Apply the constant road grade.
    pub slope: bool,
    /// Completion criterion.
    pub termination: Termination,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            sampling_period: 0.1,
            drag: true,
            slope: false,
            termination: Termination::TrajectoryEnd,
        }
    }
}

enum ActiveRule<'a> {
    Default(TrajEndRule),
    Never,
    Custom(&'a ExitFn),
}

impl ActiveRule<'_> {
    fn check(&self, time: Real, state: &VehicleState) -> Option<ExitStatus> {
        match self {
            ActiveRule::Default(rule) => rule.check(time, state),
            ActiveRule::Never => None,
            ActiveRule::Custom(f) => f(time, state),
        }
    }
}

/// Run one closed-loop simulation to a terminal status.
///
/// Per-tick protocol, in this fixed order: the safety condition on the
/// just-produced command, then the timeout condition, then the completion
/// rule. Safety beats timeout beats completion when several would fire on
/// the same tick. If no status is raised, the vehicle is integrated one
/// step under the command computed on the previous tick (zero-order hold),
/// the reference is advanced, and a new history entry is appended.
///
/// The loop itself never fails: any raised status is final and the history
/// accumulated up to and including the terminal tick is returned. The only
/// error path is malformed options, rejected before the run starts.
pub fn run<C: Controller + ?Sized>(
    vehicle: &Vehicle,
    world: &World,
    trajectory: &Trajectory,
    controller: &mut C,
    options: &SimOptions,
) -> SimResult<RunHistory> {
    let dt = options.sampling_period;
    if !dt.is_finite() || dt <= 0.0 {
        return Err(SimError::InvalidArg {
            what: "sampling_period must be positive and finite",
        });
    }

    let (x0, v0) = trajectory.initial_sample();
    let initial_state = VehicleState::new(x0, v0);

    let rule = match &options.termination {
        Termination::TrajectoryEnd => {
            ActiveRule::Default(TrajEndRule::new(&initial_state, trajectory))
        }
        Termination::Never => ActiveRule::Never,
        Termination::Custom(f) => ActiveRule::Custom(f),
    };

    tracing::debug!(
        dt,
        t_final = trajectory.t_final(),
        drag = options.drag,
        slope = options.slope,
        "starting run"
    );

    let mut tick: u64 = 0;
    let mut t = 0.0;
    let mut state = initial_state;
    let mut reference = trajectory.velocity_at(t);
    let mut command = controller.update(dt, &state, reference);

    let mut time = vec![t];
    let mut states = vec![state];
    let mut control = vec![command];
    let mut references = vec![reference];

    let exit_status = loop {
        if let Some(status) = exit::safety_exit(command) {
            break status;
        }
        if let Some(status) = exit::time_exit(t, trajectory.t_final()) {
            break status;
        }
        if let Some(status) = rule.check(t, &state) {
            break status;
        }

        // Virtual time is tick * dt rather than accumulated additions, so
        // the recorded sequence keeps its constant step exactly.
        tick += 1;
        t = tick as Real * dt;
        state = vehicle.step(world, &state, command, dt, options.drag, options.slope);
        reference = trajectory.velocity_at(t);
        command = controller.update(dt, &state, reference);

        time.push(t);
        states.push(state);
        control.push(command);
        references.push(reference);
    };

    tracing::info!(
        status = %exit_status,
        ticks = time.len(),
        final_time = t,
        "run terminated"
    );
    Ok(RunHistory {
        time,
        states,
        control,
        reference: references,
        exit_status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cruise_traj::Waypoints;
    use cruise_vehicle::VehicleParams;

    fn vehicle() -> Vehicle {
        Vehicle::new(VehicleParams::sedan(1300.0).unwrap()).unwrap()
    }

    fn constant_trajectory(t_final: Real) -> Trajectory {
        Trajectory::new(
            Waypoints {
                x: vec![0.0],
                v: vec![0.0],
                t: vec![0.0],
            },
            t_final,
        )
        .unwrap()
    }

    struct Zero;
    impl Controller for Zero {
        fn controller(&mut self, _dt: Real, _state: &VehicleState, _ref: Real) -> Real {
            0.0
        }
        fn limit(&self) -> cruise_controls::CommandLimit {
            cruise_controls::CommandLimit::default()
        }
    }

    #[test]
    fn rejects_non_positive_sampling_period() {
        for dt in [0.0, -0.1, Real::NAN, Real::INFINITY] {
            let options = SimOptions {
                sampling_period: dt,
                termination: Termination::Never,
                ..SimOptions::default()
            };
            let result = run(
                &vehicle(),
                &World::default(),
                &constant_trajectory(1.0),
                &mut Zero,
                &options,
            );
            assert!(result.is_err());
        }
    }

    #[test]
    fn time_sequence_has_constant_step() {
        let options = SimOptions {
            termination: Termination::Never,
            ..SimOptions::default()
        };
        let history = run(
            &vehicle(),
            &World::default(),
            &constant_trajectory(5.0),
            &mut Zero,
            &options,
        )
        .unwrap();

        for k in 1..history.len() {
            let expected = k as Real * 0.1;
            assert_eq!(history.time[k], expected);
            assert!(history.time[k] > history.time[k - 1]);
        }
        assert_eq!(history.time[history.len() - 1], 5.0);
    }

    #[test]
    fn initial_state_comes_from_the_first_waypoint() {
        let traj = Trajectory::new(
            Waypoints {
                x: vec![12.0, 50.0],
                v: vec![3.0, 3.0],
                t: vec![0.0, 1.0],
            },
            1.0,
        )
        .unwrap();
        let history = run(
            &vehicle(),
            &World::default(),
            &traj,
            &mut Zero,
            &SimOptions {
                termination: Termination::Never,
                ..SimOptions::default()
            },
        )
        .unwrap();
        assert_eq!(history.states[0], VehicleState::new(12.0, 3.0));
    }
}
