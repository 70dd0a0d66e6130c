//! Orbit path sampling.
//!
//! Paths are closed polylines in simulation units, sampled uniformly in mean
//! anomaly so points bunch up near aphelion the way a body actually moves.
//! The last point repeats the first.

use bevy::math::DVec3;
use std::f64::consts::TAU;

use crate::ephemeris::{OrbitalElements, PlanetOrbit, solve_eccentric_anomaly};
use crate::overrides::OrbitOverrides;

/// Default number of segments per orbit.
pub const ORBIT_SEGMENTS: usize = 256;

/// Sample `segments + 1` points of an asteroid orbit for `M` in `[0, 2π]`.
pub fn orbit_path(elements: &OrbitalElements, segments: usize) -> Vec<DVec3> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|k| elements.position_at_mean_anomaly(k as f64 / segments as f64 * TAU))
        .collect()
}

/// Path of an asteroid's orbit, using its override when one exists.
pub fn asteroid_orbit_path(
    id: &str,
    canonical: &OrbitalElements,
    overrides: &OrbitOverrides,
    segments: usize,
) -> Vec<DVec3> {
    orbit_path(&overrides.effective_elements(id, canonical), segments)
}

/// Sample `segments + 1` points of a planet's orbit.
pub fn planet_orbit_path(orbit: &PlanetOrbit, segments: usize) -> Vec<DVec3> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|k| {
            let mean_anomaly = k as f64 / segments as f64 * TAU;
            let e_anomaly = solve_eccentric_anomaly(mean_anomaly, orbit.eccentricity);
            orbit.position_at_eccentric_anomaly(e_anomaly)
        })
        .collect()
}
