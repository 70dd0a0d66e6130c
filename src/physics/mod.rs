//! Physics simulation for asteroid orbital mechanics.
//!
//! Two propagation modes share the same [`BodyState`]:
//! - Keplerian: closed-form two-body position from (possibly overridden)
//!   elements. Stateless; velocity is left untouched.
//! - N-body: numerical integration against the Sun and planets with a
//!   selectable [`Integrator`].
//!
//! Everything a step needs is carried in a [`PropagationContext`] built once
//! per tick.

mod gravity;
mod integrator;

#[cfg(test)]
mod proptest_physics;

use bevy::prelude::*;

pub use gravity::{acceleration_from, compute_acceleration, compute_accelerations_batch};
pub use integrator::{Integrator, integrate_population};

use crate::asteroid::{Asteroid, AsteroidId, AsteroidRecord, Impacted, SurfaceAltered};
use crate::ephemeris::{Ephemeris, GravitySources, OrbitalElements};
use crate::overrides::OrbitOverrides;
use crate::types::{BASE_DAY_STEP, BodyState, SimulationClock, SimulationSet};

/// Velocity change per base-length tick from an altered surface (units/day).
pub const YARKOVSKY_DV_PER_BASE_STEP: f64 = 2.0e-6;

/// Yarkovsky acceleration toward the Sun (units/day²), scaled so a base-length
/// tick adds [`YARKOVSKY_DV_PER_BASE_STEP`].
pub const YARKOVSKY_ACCELERATION: f64 = YARKOVSKY_DV_PER_BASE_STEP / BASE_DAY_STEP;

/// Runtime physics switches.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct PhysicsSettings {
    /// N-body integration when true, Keplerian propagation when false.
    pub gravity_enabled: bool,
    pub integrator: Integrator,
    /// Scales G for every perturber.
    pub gravity_multiplier: f64,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity_enabled: true,
            integrator: Integrator::Verlet,
            gravity_multiplier: 1.0,
        }
    }
}

/// Everything one propagation tick reads.
#[derive(Clone, Debug)]
pub struct PropagationContext {
    /// Simulation day after the clock advanced
    pub sim_day: f64,
    /// Step length in days
    pub dt: f64,
    pub gravity_enabled: bool,
    pub integrator: Integrator,
    pub gravity_multiplier: f64,
    /// Massive bodies at `sim_day`
    pub sources: GravitySources,
}

impl PropagationContext {
    pub fn new(sim_day: f64, dt: f64, settings: &PhysicsSettings, ephemeris: &Ephemeris) -> Self {
        Self {
            sim_day,
            dt,
            gravity_enabled: settings.gravity_enabled,
            integrator: settings.integrator,
            gravity_multiplier: settings.gravity_multiplier,
            sources: ephemeris.gravity_sources(sim_day),
        }
    }

    /// Place a body on its two-body orbit at `sim_day`.
    pub fn step_keplerian(&self, elements: &OrbitalElements, state: &mut BodyState) {
        state.pos = elements.position_at(self.sim_day);
    }

    /// Integrate a population of bodies one step.
    pub fn step_nbody(&self, states: &mut [&mut BodyState]) {
        integrate_population(
            self.integrator,
            states,
            self.dt,
            &self.sources,
            self.gravity_multiplier,
        );
    }

    /// Constant thermal push toward the Sun.
    pub fn apply_yarkovsky(&self, state: &mut BodyState) {
        let sun_direction = (-state.pos).normalize_or_zero();
        state.vel += sun_direction * (YARKOVSKY_ACCELERATION * self.dt);
    }
}

/// Plugin providing asteroid propagation.
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PhysicsSettings>()
            .add_systems(Update, propagate_asteroids.in_set(SimulationSet::Propagate))
            .add_systems(Update, log_settings_changes);
    }
}

/// Advance every live asteroid by the step the clock just took.
///
/// Impacted asteroids are frozen. Surface-altered asteroids also get the
/// Yarkovsky kick in N-body mode.
pub fn propagate_asteroids(
    clock: Res<SimulationClock>,
    settings: Res<PhysicsSettings>,
    ephemeris: Res<Ephemeris>,
    overrides: Res<OrbitOverrides>,
    mut asteroids: Query<
        (&AsteroidId, &AsteroidRecord, &mut BodyState, Has<SurfaceAltered>),
        (With<Asteroid>, Without<Impacted>),
    >,
) {
    let Some(dt) = clock.last_dt() else {
        return;
    };
    let ctx = PropagationContext::new(clock.sim_day, dt, &settings, &ephemeris);

    if !ctx.gravity_enabled {
        for (id, record, mut state, _) in &mut asteroids {
            let elements = overrides.effective_elements(&id.0, &record.elements);
            ctx.step_keplerian(&elements, &mut state);
        }
        return;
    }

    let mut rows: Vec<_> = asteroids.iter_mut().collect();
    {
        let mut states: Vec<&mut BodyState> = rows.iter_mut().map(|row| &mut *row.2).collect();
        ctx.step_nbody(&mut states);
    }
    for (_, _, state, altered) in rows.iter_mut() {
        if *altered {
            ctx.apply_yarkovsky(state);
        }
    }
}

fn log_settings_changes(settings: Res<PhysicsSettings>) {
    if settings.is_changed() && !settings.is_added() {
        info!(
            "Physics settings: gravity {}, integrator {}, multiplier {:.2}",
            if settings.gravity_enabled { "on" } else { "off" },
            settings.integrator.name(),
            settings.gravity_multiplier
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::DVec3;
    use crate::types::AU_SCALE;
    use approx::assert_relative_eq;

    fn context(gravity_enabled: bool) -> PropagationContext {
        let settings = PhysicsSettings {
            gravity_enabled,
            ..Default::default()
        };
        PropagationContext::new(10.0, 0.5, &settings, &Ephemeris::new())
    }

    #[test]
    fn test_default_settings() {
        let settings = PhysicsSettings::default();
        assert!(settings.gravity_enabled);
        assert_eq!(settings.integrator, Integrator::Verlet);
        assert_eq!(settings.gravity_multiplier, 1.0);
    }

    #[test]
    fn test_keplerian_step_keeps_velocity() {
        let ctx = context(false);
        let elements = OrbitalElements::from_degrees(1.5, 0.1, 3.0, 20.0, 40.0, 0.0, 1.84);
        let vel = DVec3::new(0.1, 0.2, 0.3);
        let mut state = BodyState::new(DVec3::ZERO, vel, 1.0);
        ctx.step_keplerian(&elements, &mut state);
        assert_eq!(state.pos, elements.position_at(10.0));
        assert_eq!(state.vel, vel);
    }

    #[test]
    fn test_yarkovsky_points_at_sun() {
        let ctx = context(true);
        let mut state = BodyState::new(DVec3::new(2.0 * AU_SCALE, 0.0, 0.0), DVec3::ZERO, 1.0);
        ctx.apply_yarkovsky(&mut state);
        assert!(state.vel.x < 0.0);
        assert_relative_eq!(state.vel.length(), YARKOVSKY_ACCELERATION * 0.5, max_relative = 1e-12);
    }

    #[test]
    fn test_yarkovsky_base_step_delta() {
        assert_relative_eq!(YARKOVSKY_ACCELERATION * BASE_DAY_STEP, 2.0e-6, max_relative = 1e-12);
    }
}
