//! Velocity controllers for the cruise simulation.
//!
//! The [`Controller`] trait is the single customization point the simulation
//! engine depends on: a strategy maps (time step, vehicle state, set-point)
//! to a raw force command, and the shared [`Controller::update`] wrapper is
//! the only place the actuator bound is enforced. Strategies never self-clip.
//!
//! Concrete strategies:
//! - [`Proportional`]
//! - [`Pd`] (proportional-derivative)
//! - [`Pid`] (proportional-integral-derivative)
//! - [`BangBang`]
//!
//! Each strategy privately owns its transient memory (previous velocity,
//! integrated error); nothing is shared across instances or runs.

pub mod controller;
pub mod error;
pub mod limit;

pub use controller::{BangBang, Controller, Pd, Pid, Proportional};
pub use error::{ControlError, ControlResult};
pub use limit::CommandLimit;
