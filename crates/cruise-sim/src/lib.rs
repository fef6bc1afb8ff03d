//! Discrete-time simulation engine for closed-loop cruise control.
//!
//! Provides:
//! - The fixed-step sampling loop with zero-order-hold command application
//! - The four-way termination state machine (complete / timeout / inf / nan)
//! - Injectable termination rules for custom stopping criteria
//! - The run history handed off to plotting and follower scenarios

pub mod error;
pub mod exit;
pub mod history;
pub mod sim;

pub use error::{SimError, SimResult};
pub use exit::{ExitStatus, TrajEndRule, safety_exit, time_exit};
pub use history::RunHistory;
pub use sim::{ExitFn, SimOptions, Termination, run};
