//! Core physics types and constants for the orbital mechanics core.
//!
//! All physics runs in a scaled frame: one astronomical unit maps to
//! [`AU_SCALE`] simulation units, time is measured in simulated days, so
//! velocities are units/day and accelerations units/day².

use bevy::math::DVec3;
use bevy::prelude::*;

/// System sets for ordering the per-frame simulation tick.
///
/// Everything a consumer renders is produced inside one chained pass, so a
/// frame never observes a partially advanced simulation.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Advance the simulation clock.
    Clock,
    /// Move asteroids (Keplerian or N-body).
    Propagate,
    /// Check the tracked asteroid against Earth.
    Detect,
    /// Drive cooperative deflection missions.
    Missions,
    /// Refresh render-facing views from physics state.
    Sync,
}

/// Physical constants (SI units)

/// Gravitational constant (m³·kg⁻¹·s⁻²)
pub const G: f64 = 6.67430e-11;

/// Astronomical unit in meters
pub const AU_TO_METERS: f64 = 1.496e11;

/// Simulation units per astronomical unit
pub const AU_SCALE: f64 = 40.0;

/// Meters represented by one simulation unit
pub const METERS_PER_UNIT: f64 = AU_TO_METERS / AU_SCALE;

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Days per Julian year
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians to degrees conversion factor
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Solar mass in kilograms
pub const SUN_MASS: f64 = 1.989e30;

/// Sun's gravitational parameter (m³/s²)
pub const GM_SUN: f64 = G * SUN_MASS;

/// Separation below which gravity is treated as zero (1,000 km)
pub const MIN_GRAVITY_DISTANCE_M: f64 = 1.0e6;

/// Joules per megaton of TNT
pub const JOULES_PER_MEGATON: f64 = 4.184e15;

/// Convert a speed in simulation units/day to meters per second.
#[inline]
pub fn units_per_day_to_m_s(speed: f64) -> f64 {
    speed * METERS_PER_UNIT / SECONDS_PER_DAY
}

/// Convert a speed in meters per second to simulation units/day.
#[inline]
pub fn m_s_to_units_per_day(speed: f64) -> f64 {
    speed * SECONDS_PER_DAY / METERS_PER_UNIT
}

/// Physical state of a body in the simulation.
///
/// Owned by the propagator during a tick. Rendering never writes here, see
/// [`BodyView`] for the render-facing half.
#[derive(Component, Clone, Debug, Default, PartialEq)]
pub struct BodyState {
    /// Position in simulation units (Sun at origin)
    pub pos: DVec3,
    /// Velocity in simulation units per day
    pub vel: DVec3,
    /// Last computed acceleration in units/day² (scratch)
    pub acc: DVec3,
    /// Mass in kilograms
    pub mass: f64,
}

impl BodyState {
    /// Create a new body state with zeroed acceleration.
    pub fn new(pos: DVec3, vel: DVec3, mass: f64) -> Self {
        Self {
            pos,
            vel,
            acc: DVec3::ZERO,
            mass,
        }
    }

    /// Position in AU
    pub fn pos_au(&self) -> DVec3 {
        self.pos / AU_SCALE
    }

    /// Speed in m/s
    pub fn speed_m_s(&self) -> f64 {
        units_per_day_to_m_s(self.vel.length())
    }
}

/// Render-facing view of a body, refreshed from [`BodyState`] every tick.
#[derive(Component, Clone, Debug, Default, PartialEq)]
pub struct BodyView {
    /// Render translation (f32 copy of the physics position)
    pub translation: Vec3,
    /// Visual radius in simulation units
    pub radius: f32,
    /// Whether the body should be drawn
    pub visible: bool,
}

/// Simulation clock resource.
///
/// `sim_day` only moves forward; each unpaused tick adds
/// `base_step * speed_multiplier` days.
#[derive(Resource, Clone, Debug)]
pub struct SimulationClock {
    /// Simulated days elapsed since start
    pub sim_day: f64,
    /// Days advanced per tick at 1x speed
    pub base_step: f64,
    /// Simulated days per real second (time warp)
    pub speed_multiplier: f64,
    /// Whether simulation is paused
    pub paused: bool,
    last_dt: Option<f64>,
}

/// Default per-frame step in days (about 4 minutes of simulated time).
pub const BASE_DAY_STEP: f64 = 0.0027;

impl Default for SimulationClock {
    fn default() -> Self {
        Self {
            sim_day: 0.0,
            base_step: BASE_DAY_STEP,
            speed_multiplier: 1.0,
            paused: false,
            last_dt: None,
        }
    }
}

impl SimulationClock {
    /// Create a clock starting at a given simulated day.
    pub fn at_day(sim_day: f64) -> Self {
        Self {
            sim_day,
            ..Default::default()
        }
    }

    /// Advance by one tick. Returns the step taken, or `None` while paused.
    pub fn tick(&mut self) -> Option<f64> {
        if self.paused {
            self.last_dt = None;
            return None;
        }
        let dt = self.base_step * self.speed_multiplier;
        if dt <= 0.0 {
            self.last_dt = None;
            return None;
        }
        self.sim_day += dt;
        self.last_dt = Some(dt);
        Some(dt)
    }

    /// Step taken by the most recent tick, `None` if the clock did not move.
    pub fn last_dt(&self) -> Option<f64> {
        self.last_dt
    }

    /// Elapsed simulated years
    pub fn years(&self) -> f64 {
        self.sim_day / DAYS_PER_YEAR
    }
}
