//! Ephemeris module for computing celestial body positions.
//!
//! Coordinate frame:
//! - 3D heliocentric (Sun at origin), y up, scaled units.
//! - Planets follow fixed analytic ellipses, asteroids use full Keplerian
//!   elements (see [`kepler::OrbitalElements`]).

pub mod data;
pub mod kepler;

#[cfg(test)]
mod proptest_ephemeris;

pub use data::{CelestialBodyData, CelestialBodyId, all_bodies, get_body_data};
pub use kepler::{OrbitalElements, PlanetOrbit, solve_eccentric_anomaly};

use bevy::math::DVec3;
use bevy::prelude::*;
use std::collections::HashMap;

use crate::types::{BodyState, BodyView, SimulationClock, SimulationSet};

/// Total number of gravity sources in the solar system model.
/// 1 Sun + 8 Planets = 9 bodies
pub const GRAVITY_SOURCE_COUNT: usize = 9;

/// A massive body at a given instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GravitySource {
    pub id: CelestialBodyId,
    /// Position in simulation units
    pub pos: DVec3,
    /// Mass in kg
    pub mass: f64,
}

/// Fixed-size array of gravity sources (no heap allocation).
pub type GravitySources = [GravitySource; GRAVITY_SOURCE_COUNT];

/// Standard body order for the gravity sources array.
const BODY_ORDER: [CelestialBodyId; GRAVITY_SOURCE_COUNT] = [
    CelestialBodyId::Sun,
    CelestialBodyId::Mercury,
    CelestialBodyId::Venus,
    CelestialBodyId::Earth,
    CelestialBodyId::Mars,
    CelestialBodyId::Jupiter,
    CelestialBodyId::Saturn,
    CelestialBodyId::Uranus,
    CelestialBodyId::Neptune,
];

/// Marker for planet and Sun entities.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CelestialBody(pub CelestialBodyId);

/// Resource providing ephemeris data for all celestial bodies.
#[derive(Resource)]
pub struct Ephemeris {
    body_data: HashMap<CelestialBodyId, CelestialBodyData>,
}

impl Default for Ephemeris {
    fn default() -> Self {
        Self::new()
    }
}

impl Ephemeris {
    /// Create a new ephemeris with all celestial body data loaded.
    pub fn new() -> Self {
        let body_data = all_bodies().into_iter().map(|data| (data.id, data)).collect();
        Self { body_data }
    }

    /// Get the body data for a celestial body ID.
    pub fn body(&self, id: CelestialBodyId) -> Option<&CelestialBodyData> {
        self.body_data.get(&id)
    }

    /// Position of a body at `sim_day`, in simulation units.
    ///
    /// The Sun is always at the origin.
    pub fn position(&self, id: CelestialBodyId, sim_day: f64) -> DVec3 {
        self.body(id)
            .and_then(|data| data.orbit.as_ref())
            .map_or(DVec3::ZERO, |orbit| orbit.position_at(sim_day))
    }

    /// Velocity of a body at `sim_day`, in units/day.
    pub fn velocity(&self, id: CelestialBodyId, sim_day: f64) -> DVec3 {
        self.body(id)
            .and_then(|data| data.orbit.as_ref())
            .map_or(DVec3::ZERO, |orbit| orbit.velocity_at(sim_day))
    }

    /// Earth's position at `sim_day`.
    pub fn earth_position(&self, sim_day: f64) -> DVec3 {
        self.position(CelestialBodyId::Earth, sim_day)
    }

    /// Earth's velocity at `sim_day`.
    pub fn earth_velocity(&self, sim_day: f64) -> DVec3 {
        self.velocity(CelestialBodyId::Earth, sim_day)
    }

    /// All gravity sources at `sim_day`: the Sun followed by the planets.
    pub fn gravity_sources(&self, sim_day: f64) -> GravitySources {
        BODY_ORDER.map(|id| GravitySource {
            id,
            pos: self.position(id, sim_day),
            mass: self.body(id).map_or(0.0, |data| data.mass),
        })
    }
}

/// Spawns the Sun and planets and keeps their state on the analytic ephemeris.
pub struct EphemerisPlugin;

impl Plugin for EphemerisPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Ephemeris>()
            .add_systems(Startup, spawn_celestial_bodies)
            .add_systems(Update, update_celestial_bodies.in_set(SimulationSet::Propagate));
    }
}

fn spawn_celestial_bodies(
    mut commands: Commands,
    ephemeris: Res<Ephemeris>,
    clock: Res<SimulationClock>,
) {
    for &id in &BODY_ORDER {
        let Some(data) = ephemeris.body(id) else {
            continue;
        };
        let pos = ephemeris.position(id, clock.sim_day);
        commands.spawn((
            CelestialBody(id),
            BodyState::new(pos, ephemeris.velocity(id, clock.sim_day), data.mass),
            BodyView {
                translation: pos.as_vec3(),
                radius: data.visual_radius as f32,
                visible: true,
            },
            Name::new(id.name()),
        ));
    }
    info!("Spawned Sun and {} planets", CelestialBodyId::PLANETS.len());
}

fn update_celestial_bodies(
    ephemeris: Res<Ephemeris>,
    clock: Res<SimulationClock>,
    mut bodies: Query<(&CelestialBody, &mut BodyState)>,
) {
    if clock.last_dt().is_none() {
        return;
    }
    for (body, mut state) in &mut bodies {
        state.pos = ephemeris.position(body.0, clock.sim_day);
        state.vel = ephemeris.velocity(body.0, clock.sim_day);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AU_SCALE;
    use approx::assert_relative_eq;

    #[test]
    fn test_sun_position() {
        let eph = Ephemeris::new();
        assert_eq!(eph.position(CelestialBodyId::Sun, 1234.0), DVec3::ZERO);
        assert_eq!(eph.velocity(CelestialBodyId::Sun, 1234.0), DVec3::ZERO);
    }

    #[test]
    fn test_earth_position_at_epoch() {
        let eph = Ephemeris::new();
        let pos = eph.earth_position(0.0);
        // Perihelion on +x at day 0
        assert_relative_eq!(pos.x, AU_SCALE * (1.0 - 0.017), epsilon = 1e-9);
        assert!(pos.y.abs() < 1e-12);
        assert!(pos.z.abs() < 1e-12);
    }

    #[test]
    fn test_inclined_planet_leaves_ecliptic() {
        let eph = Ephemeris::new();
        let pos = eph.position(CelestialBodyId::Mercury, 22.0);
        assert!(pos.y > 0.0, "Mercury should rise above the ecliptic after perihelion");
    }

    #[test]
    fn test_gravity_sources() {
        let eph = Ephemeris::new();
        let sources = eph.gravity_sources(100.0);

        assert_eq!(sources[0].id, CelestialBodyId::Sun);
        assert_eq!(sources[0].pos, DVec3::ZERO);
        assert_eq!(sources[3].id, CelestialBodyId::Earth);
        assert_eq!(sources[3].pos, eph.earth_position(100.0));
        assert!(sources.iter().all(|s| s.mass > 0.0));
    }

    #[test]
    fn test_planetary_motion_over_time() {
        let eph = Ephemeris::new();
        let p0 = eph.earth_position(0.0);
        let p1 = eph.earth_position(30.0);
        let moved = (p1 - p0).length();
        // Roughly 30/365 of a 2π·40 circumference
        assert!(moved > 3.5 && moved < 4.7, "Earth moved {} units in 30 days", moved);
    }

    #[test]
    fn test_earth_velocity_tangent() {
        let eph = Ephemeris::new();
        let pos = eph.earth_position(0.0);
        let vel = eph.earth_velocity(0.0);
        // At perihelion velocity is perpendicular to the radius
        assert!(pos.dot(vel).abs() < 1e-9);
        assert!(vel.z > 0.0);
    }
}
