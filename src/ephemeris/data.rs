//! Orbital and physical data for the Sun and the eight planets.
//!
//! Orbits are the simplified planetary model: semi-major axis, eccentricity,
//! inclination and period only. Mean anomaly is zero at simulation day 0.

use super::kepler::PlanetOrbit;
use crate::types::SUN_MASS;

/// Identifier for celestial bodies in the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CelestialBodyId {
    Sun,
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl CelestialBodyId {
    /// All planets (not including Sun)
    pub const PLANETS: &'static [CelestialBodyId] = &[
        CelestialBodyId::Mercury,
        CelestialBodyId::Venus,
        CelestialBodyId::Earth,
        CelestialBodyId::Mars,
        CelestialBodyId::Jupiter,
        CelestialBodyId::Saturn,
        CelestialBodyId::Uranus,
        CelestialBodyId::Neptune,
    ];

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            CelestialBodyId::Sun => "Sun",
            CelestialBodyId::Mercury => "Mercury",
            CelestialBodyId::Venus => "Venus",
            CelestialBodyId::Earth => "Earth",
            CelestialBodyId::Mars => "Mars",
            CelestialBodyId::Jupiter => "Jupiter",
            CelestialBodyId::Saturn => "Saturn",
            CelestialBodyId::Uranus => "Uranus",
            CelestialBodyId::Neptune => "Neptune",
        }
    }
}

/// Static data for a celestial body.
#[derive(Clone, Debug)]
pub struct CelestialBodyData {
    pub id: CelestialBodyId,
    pub mass: f64, // kg
    /// Physical radius in km
    pub radius_km: f64,
    /// Display radius in simulation units
    pub visual_radius: f64,
    /// `None` for the Sun, which sits at the origin.
    pub orbit: Option<PlanetOrbit>,
}

/// Get orbital and physical data for a celestial body.
pub fn get_body_data(id: CelestialBodyId) -> CelestialBodyData {
    // (mass kg, radius km, visual radius, (a AU, e, i deg, period days))
    let (mass, radius_km, visual_radius, orbit) = match id {
        CelestialBodyId::Sun => (SUN_MASS, 696_000.0, 7.0, None),
        CelestialBodyId::Mercury => (3.285e23, 2_439.7, 0.5, Some((0.387, 0.206, 7.00, 88.0))),
        CelestialBodyId::Venus => (4.867e24, 6_051.8, 1.2, Some((0.723, 0.007, 3.39, 225.0))),
        CelestialBodyId::Earth => (5.972e24, 6_371.0, 1.4, Some((1.0, 0.017, 0.0, 365.0))),
        CelestialBodyId::Mars => (6.39e23, 3_389.5, 1.0, Some((1.524, 0.093, 1.85, 687.0))),
        CelestialBodyId::Jupiter => (1.898e27, 69_911.0, 4.0, Some((5.203, 0.049, 1.30, 4_333.0))),
        CelestialBodyId::Saturn => (5.683e26, 58_232.0, 5.5, Some((9.537, 0.056, 2.49, 10_759.0))),
        CelestialBodyId::Uranus => (8.681e25, 25_362.0, 4.5, Some((19.191, 0.047, 0.77, 30_687.0))),
        CelestialBodyId::Neptune => {
            (1.024e26, 24_622.0, 4.3, Some((30.068, 0.009, 1.77, 60_190.0)))
        }
    };

    CelestialBodyData {
        id,
        mass,
        radius_km,
        visual_radius,
        orbit: orbit.map(|(a, e, i, period)| PlanetOrbit::new(a, e, i, period)),
    }
}

/// Data for the Sun followed by the planets in order from the Sun.
pub fn all_bodies() -> Vec<CelestialBodyData> {
    std::iter::once(CelestialBodyId::Sun)
        .chain(CelestialBodyId::PLANETS.iter().copied())
        .map(get_body_data)
        .collect()
}
