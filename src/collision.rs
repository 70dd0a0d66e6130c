//! Earth impact detection for the tracked asteroid.
//!
//! The detector is a two-state latch. While armed it compares the tracked
//! asteroid's distance to Earth with `earth_radius + asteroid_radius +
//! clearance` once per clock tick. On a hit:
//! - The simulation clock is paused
//! - The asteroid is marked [`Impacted`] (hidden, no longer propagated)
//! - An [`ImpactEvent`] message is written and kept as the last impact
//!
//! The latch stays triggered until the selection is cleared.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::asteroid::{Asteroid, AsteroidId, AsteroidRecord, AsteroidScale, Impacted};
use crate::ephemeris::Ephemeris;
use crate::selection::TrackedAsteroid;
use crate::types::{
    BodyState, DAYS_PER_YEAR, JOULES_PER_MEGATON, RAD_TO_DEG, SimulationClock, SimulationSet,
    units_per_day_to_m_s,
};

/// Impact geometry settings, in simulation units.
#[derive(Resource, Clone, Debug)]
pub struct ImpactConfig {
    /// Earth's display radius
    pub earth_radius: f64,
    /// Extra margin added to the contact distance
    pub clearance: f64,
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            earth_radius: 1.4,
            clearance: 0.5,
        }
    }
}

impl ImpactConfig {
    /// Center distance below which an asteroid of the given display radius hits Earth.
    pub fn threshold(&self, asteroid_radius: f64) -> f64 {
        self.earth_radius + asteroid_radius + self.clearance
    }
}

/// Detector latch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DetectorState {
    #[default]
    Armed,
    Triggered,
}

/// Record of an asteroid striking Earth.
#[derive(Message, Clone, Debug, PartialEq)]
pub struct ImpactEvent {
    pub asteroid_id: String,
    pub asteroid_name: String,
    /// Point on Earth's surface, simulation frame
    pub impact_point: DVec3,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    /// Asteroid velocity minus Earth velocity (units/day)
    pub relative_velocity: DVec3,
    /// Relative speed in m/s
    pub speed_m_s: f64,
    pub mass_kg: f64,
    pub diameter_km: f64,
    /// Kinetic energy from the Earth-relative speed, not the heliocentric one
    pub energy_megatons: f64,
    pub sim_day: f64,
}

impl ImpactEvent {
    /// Build the event for a body that has reached Earth.
    pub fn compute(
        id: &AsteroidId,
        record: &AsteroidRecord,
        state: &BodyState,
        earth_pos: DVec3,
        earth_vel: DVec3,
        sim_day: f64,
        config: &ImpactConfig,
    ) -> Self {
        let relative_velocity = state.vel - earth_vel;
        let impact_point =
            impact_point(earth_pos, state.pos, relative_velocity, config.earth_radius);
        let (latitude_deg, longitude_deg) = surface_coordinates(impact_point, earth_pos);
        let speed_m_s = units_per_day_to_m_s(relative_velocity.length());

        Self {
            asteroid_id: id.0.clone(),
            asteroid_name: record.name.clone(),
            impact_point,
            latitude_deg,
            longitude_deg,
            relative_velocity,
            speed_m_s,
            mass_kg: state.mass,
            diameter_km: record.diameter_km,
            energy_megatons: impact_energy_megatons(state.mass, speed_m_s),
            sim_day,
        }
    }

    /// Relative speed in km/s.
    pub fn speed_km_s(&self) -> f64 {
        self.speed_m_s / 1000.0
    }

    /// Time of impact in years.
    pub fn years(&self) -> f64 {
        self.sim_day / DAYS_PER_YEAR
    }
}

/// Point where the ray from Earth's center through the body leaves the surface.
///
/// When the body sits exactly at Earth's center the approach direction
/// (reverse relative velocity) is used, then +x.
pub fn impact_point(
    earth_pos: DVec3,
    body_pos: DVec3,
    relative_velocity: DVec3,
    earth_radius: f64,
) -> DVec3 {
    let direction = (body_pos - earth_pos)
        .try_normalize()
        .or_else(|| (-relative_velocity).try_normalize())
        .unwrap_or(DVec3::X);
    earth_pos + direction * earth_radius
}

/// Latitude and longitude (degrees) of a surface point.
///
/// Latitude is measured from the x–z plane toward +y, longitude is
/// `atan2(z, x)`.
pub fn surface_coordinates(point: DVec3, earth_pos: DVec3) -> (f64, f64) {
    let local = (point - earth_pos).normalize_or_zero();
    let latitude = local.y.clamp(-1.0, 1.0).asin() * RAD_TO_DEG;
    let longitude = local.z.atan2(local.x) * RAD_TO_DEG;
    (latitude, longitude)
}

/// Kinetic energy in megatons of TNT.
pub fn impact_energy_megatons(mass_kg: f64, speed_m_s: f64) -> f64 {
    0.5 * mass_kg * speed_m_s * speed_m_s / JOULES_PER_MEGATON
}

/// Detector state plus the most recent impact.
#[derive(Resource, Default, Debug)]
pub struct ImpactState {
    detector: DetectorState,
    /// Most recent impact, kept for display after the message is gone.
    pub last_impact: Option<ImpactEvent>,
}

impl ImpactState {
    pub fn detector(&self) -> DetectorState {
        self.detector
    }

    pub fn is_armed(&self) -> bool {
        self.detector == DetectorState::Armed
    }

    /// Latch the detector and remember the event.
    pub fn trigger(&mut self, event: ImpactEvent) {
        info!(
            "IMPACT! {} hit Earth at {:.2}°, {:.2}° ({:.2} km/s, {:.3e} Mt) on day {:.1}",
            event.asteroid_name,
            event.latitude_deg,
            event.longitude_deg,
            event.speed_km_s(),
            event.energy_megatons,
            event.sim_day
        );
        self.detector = DetectorState::Triggered;
        self.last_impact = Some(event);
    }

    /// Re-arm the detector. The last impact stays available.
    pub fn rearm(&mut self) {
        self.detector = DetectorState::Armed;
    }
}

/// Whether a body at `body_pos` is inside the impact threshold.
pub fn is_impact(body_pos: DVec3, earth_pos: DVec3, threshold: f64) -> bool {
    body_pos.distance(earth_pos) < threshold
}

/// Plugin for Earth impact detection.
pub struct CollisionPlugin;

impl Plugin for CollisionPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ImpactEvent>()
            .init_resource::<ImpactConfig>()
            .init_resource::<ImpactState>()
            .add_systems(Update, detect_earth_impact.in_set(SimulationSet::Detect));
    }
}

/// Check the tracked asteroid against Earth after propagation.
pub fn detect_earth_impact(
    mut commands: Commands,
    tracked: Res<TrackedAsteroid>,
    ephemeris: Res<Ephemeris>,
    config: Res<ImpactConfig>,
    scale: Res<AsteroidScale>,
    mut clock: ResMut<SimulationClock>,
    mut impacts: ResMut<ImpactState>,
    mut impact_events: MessageWriter<ImpactEvent>,
    asteroids: Query<
        (&AsteroidId, &AsteroidRecord, &BodyState),
        (With<Asteroid>, Without<Impacted>),
    >,
) {
    if clock.last_dt().is_none() || !impacts.is_armed() {
        return;
    }
    let Some(entity) = tracked.entity() else {
        return;
    };
    let Ok((id, record, state)) = asteroids.get(entity) else {
        return;
    };

    let earth_pos = ephemeris.earth_position(clock.sim_day);
    let threshold = config.threshold(record.visual_radius(&scale));
    if !is_impact(state.pos, earth_pos, threshold) {
        return;
    }

    let event = ImpactEvent::compute(
        id,
        record,
        state,
        earth_pos,
        ephemeris.earth_velocity(clock.sim_day),
        clock.sim_day,
        &config,
    );
    clock.paused = true;
    impact_events.write(event.clone());
    impacts.trigger(event);
    commands.entity(entity).insert(Impacted);
}
