//! Numerical integrators for N-body propagation.
//!
//! Each step recomputes the acceleration at the body's current position, so
//! switching integrators (or switching in from Keplerian mode) only needs a
//! position and a velocity.

use bevy::math::DVec3;

use super::gravity::compute_accelerations_batch;
use crate::ephemeris::GravitySource;
use crate::types::BodyState;

/// Selectable integration scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Integrator {
    /// Semi-implicit Euler: velocity first, then position with the new velocity.
    Euler,
    /// Velocity Verlet (2nd order, symplectic).
    #[default]
    Verlet,
    /// Single-stage "RK4": one Euler sub-step where position uses the
    /// velocity from before the kick. First order despite the name.
    SimplifiedRk4,
}

impl Integrator {
    /// All integrators, in display order.
    pub const ALL: [Integrator; 3] = [
        Integrator::Euler,
        Integrator::Verlet,
        Integrator::SimplifiedRk4,
    ];

    /// Short display name
    pub fn name(&self) -> &'static str {
        match self {
            Integrator::Euler => "Euler",
            Integrator::Verlet => "Verlet",
            Integrator::SimplifiedRk4 => "RK4 (simplified)",
        }
    }

    /// Advance a single body by `dt` days.
    ///
    /// `acceleration_fn` maps a position to an acceleration in units/day².
    /// `state.acc` holds the most recent acceleration afterwards.
    pub fn step<F>(&self, state: &mut BodyState, dt: f64, acceleration_fn: F)
    where
        F: Fn(DVec3) -> DVec3,
    {
        let acc = acceleration_fn(state.pos);
        self.begin(state, acc, dt);
        if self.needs_end_acceleration() {
            let acc_new = acceleration_fn(state.pos);
            finish_verlet(state, acc, acc_new, dt);
        }
    }

    /// Whether the step needs a second acceleration at the moved position.
    fn needs_end_acceleration(&self) -> bool {
        matches!(self, Integrator::Verlet)
    }

    /// Everything that only needs the acceleration at the starting position.
    fn begin(&self, state: &mut BodyState, acc: DVec3, dt: f64) {
        match self {
            Integrator::Euler => {
                state.vel += acc * dt;
                state.pos += state.vel * dt;
                state.acc = acc;
            }
            Integrator::Verlet => {
                state.pos += state.vel * dt + acc * (0.5 * dt * dt);
            }
            Integrator::SimplifiedRk4 => {
                let k1x = state.vel * dt;
                state.vel += acc * dt;
                state.pos += k1x;
                state.acc = acc;
            }
        }
    }
}

/// Velocity Verlet's closing kick.
fn finish_verlet(state: &mut BodyState, acc: DVec3, acc_new: DVec3, dt: f64) {
    state.vel += (acc + acc_new) * (0.5 * dt);
    state.acc = acc_new;
}

/// Advance a population of test particles by `dt` days against fixed sources.
///
/// Shares the per-body update with [`Integrator::step`]; only the
/// acceleration passes are vectorised across the population.
pub fn integrate_population(
    integrator: Integrator,
    states: &mut [&mut BodyState],
    dt: f64,
    sources: &[GravitySource],
    multiplier: f64,
) {
    if states.is_empty() {
        return;
    }

    let mut positions: Vec<DVec3> = states.iter().map(|s| s.pos).collect();
    let mut acc = vec![DVec3::ZERO; states.len()];
    compute_accelerations_batch(&positions, sources, multiplier, &mut acc);

    for (state, a) in states.iter_mut().zip(&acc) {
        integrator.begin(state, *a, dt);
    }
    if !integrator.needs_end_acceleration() {
        return;
    }

    for (pos, state) in positions.iter_mut().zip(states.iter()) {
        *pos = state.pos;
    }
    let mut acc_new = vec![DVec3::ZERO; states.len()];
    compute_accelerations_batch(&positions, sources, multiplier, &mut acc_new);
    for ((state, a), a_new) in states.iter_mut().zip(&acc).zip(&acc_new) {
        finish_verlet(state, *a, *a_new, dt);
    }
}
