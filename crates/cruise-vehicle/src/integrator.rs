//! Fixed-step integrators for the two-state vehicle ODE.

use cruise_core::Real;

/// Packed (position, velocity) state vector.
pub type StateVec = [Real; 2];

/// Integrator selection for vehicle stepping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorKind {
    /// 4th-order Runge-Kutta (default, 4 rhs calls per step).
    #[default]
    Rk4,
    /// Forward Euler (1st-order, 1 rhs call per step).
    ForwardEuler,
}

/// Classical RK4 step across `dt` with the step pinned to `dt`.
pub fn rk4_step<F>(rhs: F, t: Real, x: StateVec, dt: Real) -> StateVec
where
    F: Fn(Real, StateVec) -> StateVec,
{
    let k1 = rhs(t, x);
    let k2 = rhs(t + 0.5 * dt, add(x, scale(k1, 0.5 * dt)));
    let k3 = rhs(t + 0.5 * dt, add(x, scale(k2, 0.5 * dt)));
    let k4 = rhs(t + dt, add(x, scale(k3, dt)));

    // x_new = x + (dt/6) * (k1 + 2*k2 + 2*k3 + k4)
    let k_sum = add(add(k1, scale(k2, 2.0)), add(scale(k3, 2.0), k4));
    add(x, scale(k_sum, dt / 6.0))
}

/// Explicit Euler step: `x_new = x + dt * rhs(t, x)`.
pub fn euler_step<F>(rhs: F, t: Real, x: StateVec, dt: Real) -> StateVec
where
    F: Fn(Real, StateVec) -> StateVec,
{
    add(x, scale(rhs(t, x), dt))
}

fn add(a: StateVec, b: StateVec) -> StateVec {
    [a[0] + b[0], a[1] + b[1]]
}

fn scale(a: StateVec, s: Real) -> StateVec {
    [a[0] * s, a[1] * s]
}
