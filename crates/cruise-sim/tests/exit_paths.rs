//! Integration tests: all four exit paths and their priority.
//!
//! The check order is a contract: safety beats timeout beats completion
//! when several conditions would fire on the same tick.

use cruise_controls::{CommandLimit, Controller};
use cruise_core::Real;
use cruise_sim::{ExitStatus, SimOptions, Termination, run};
use cruise_traj::{Trajectory, Waypoints};
use cruise_vehicle::{Vehicle, VehicleParams, VehicleState, World};

fn vehicle() -> Vehicle {
    Vehicle::new(VehicleParams::sedan(1300.0).unwrap()).unwrap()
}

fn trajectory(x: Vec<Real>, v: Vec<Real>, t: Vec<Real>, t_final: Real) -> Trajectory {
    Trajectory::new(Waypoints { x, v, t }, t_final).unwrap()
}

/// Controller that always returns the same raw command.
struct Constant(Real);

impl Controller for Constant {
    fn controller(&mut self, _dt: Real, _state: &VehicleState, _ref: Real) -> Real {
        self.0
    }
    fn limit(&self) -> CommandLimit {
        CommandLimit::default()
    }
}

#[test]
fn inf_command_on_tick_zero_halts_immediately() {
    let traj = trajectory(vec![0.0], vec![0.0], vec![0.0], 5.0);
    let history = run(
        &vehicle(),
        &World::default(),
        &traj,
        &mut Constant(Real::INFINITY),
        &SimOptions::default(),
    )
    .unwrap();

    assert_eq!(history.exit_status, ExitStatus::InfValue);
    assert_eq!(history.len(), 1);
    assert_eq!(history.time[0], 0.0);
}

#[test]
fn nan_command_on_tick_zero_halts_immediately() {
    let traj = trajectory(vec![0.0], vec![0.0], vec![0.0], 5.0);
    let history = run(
        &vehicle(),
        &World::default(),
        &traj,
        &mut Constant(Real::NAN),
        &SimOptions::default(),
    )
    .unwrap();

    assert_eq!(history.exit_status, ExitStatus::NanValue);
    assert_eq!(history.len(), 1);
}

#[test]
fn zero_command_times_out_at_the_horizon() {
    // Terminal position is unreachable at zero command, so the default rule
    // never fires and the run ends exactly at t_final.
    let traj = trajectory(vec![0.0, 100.0], vec![0.0, 0.0], vec![0.0, 5.0], 5.0);
    let history = run(
        &vehicle(),
        &World::default(),
        &traj,
        &mut Constant(0.0),
        &SimOptions::default(),
    )
    .unwrap();

    assert_eq!(history.exit_status, ExitStatus::Timeout);
    assert_eq!(history.len(), 51);
    assert_eq!(history.time[50], 5.0);
    assert_eq!(history.states[50].position, 0.0);
}

#[test]
fn safety_beats_timeout_on_the_same_tick() {
    // t_final = 0 means the timeout condition is already true on tick 0,
    // but the NaN command must win.
    let traj = trajectory(vec![0.0], vec![0.0], vec![0.0], 0.0);
    let history = run(
        &vehicle(),
        &World::default(),
        &traj,
        &mut Constant(Real::NAN),
        &SimOptions::default(),
    )
    .unwrap();

    assert_eq!(history.exit_status, ExitStatus::NanValue);
    assert_eq!(history.len(), 1);
}

#[test]
fn timeout_beats_completion_on_the_same_tick() {
    let traj = trajectory(vec![0.0], vec![0.0], vec![0.0], 0.0);
    let options = SimOptions {
        termination: Termination::Custom(Box::new(|_, _| Some(ExitStatus::Complete))),
        ..SimOptions::default()
    };
    let history = run(
        &vehicle(),
        &World::default(),
        &traj,
        &mut Constant(0.0),
        &options,
    )
    .unwrap();

    assert_eq!(history.exit_status, ExitStatus::Timeout);
    assert_eq!(history.len(), 1);
}

#[test]
fn starting_at_the_end_completes_after_the_grace_period() {
    // Initial state already equals the trajectory's terminal state: the
    // default rule waits one second before declaring success.
    let traj = trajectory(vec![0.0], vec![0.0], vec![0.0], 5.0);
    let history = run(
        &vehicle(),
        &World::default(),
        &traj,
        &mut Constant(0.0),
        &SimOptions::default(),
    )
    .unwrap();

    assert_eq!(history.exit_status, ExitStatus::Complete);
    assert_eq!(history.len(), 11);
    assert_eq!(history.time[10], 1.0);
}

#[test]
fn custom_rule_sees_time_and_state() {
    // Coast at 3 m/s and stop once the car has covered one meter.
    let traj = trajectory(vec![0.0], vec![3.0], vec![0.0], 10.0);
    let options = SimOptions {
        drag: false,
        termination: Termination::Custom(Box::new(|_t, state| {
            (state.position >= 1.0).then_some(ExitStatus::Complete)
        })),
        ..SimOptions::default()
    };
    let history = run(
        &vehicle(),
        &World::default(),
        &traj,
        &mut Constant(0.0),
        &options,
    )
    .unwrap();

    assert_eq!(history.exit_status, ExitStatus::Complete);
    // x advances 0.3 m per tick; first sample at or past 1.0 m is tick 4.
    assert_eq!(history.len(), 5);
    assert!((history.states[4].position - 1.2).abs() < 1e-9);
}

#[test]
fn never_termination_always_runs_to_timeout() {
    // Initial state sits at the trajectory end, which would complete under
    // the default rule; Never must ride through to the horizon.
    let traj = trajectory(vec![0.0], vec![0.0], vec![0.0], 3.0);
    let options = SimOptions {
        termination: Termination::Never,
        ..SimOptions::default()
    };
    let history = run(
        &vehicle(),
        &World::default(),
        &traj,
        &mut Constant(0.0),
        &options,
    )
    .unwrap();

    assert_eq!(history.exit_status, ExitStatus::Timeout);
    assert_eq!(history.len(), 31);
}
