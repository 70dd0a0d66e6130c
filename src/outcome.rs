//! Orbit summaries for edited and deflected orbits.
//!
//! - [`OrbitalDynamics`]: perihelion speed, period and energy for a given
//!   `(a, e)` about the Sun.
//! - [`EarthCrossing`]: whether the orbit's distance range overlaps Earth's.
//! - [`osculating_orbit`]: two-body orbit implied by a live N-body state.

use bevy::math::DVec3;

use crate::types::{
    AU_TO_METERS, BodyState, DAYS_PER_YEAR, GM_SUN, METERS_PER_UNIT, MIN_GRAVITY_DISTANCE_M,
    SECONDS_PER_DAY, units_per_day_to_m_s,
};

/// Perihelion below this and aphelion above [`EARTH_CROSSING_MIN_APHELION`]
/// overlaps Earth's orbit (AU).
pub const EARTH_CROSSING_MAX_PERIHELION: f64 = 1.017;

/// See [`EARTH_CROSSING_MAX_PERIHELION`] (AU).
pub const EARTH_CROSSING_MIN_APHELION: f64 = 0.983;

/// How an orbit relates to Earth's.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EarthCrossing {
    #[default]
    None,
    /// Distance range overlaps Earth's perihelion–aphelion band.
    EarthCrossing,
    /// Orbit straddles exactly 1 AU.
    HighImpactPotential,
}

impl EarthCrossing {
    /// Classify from perihelion `q` and aphelion `Q` in AU.
    pub fn classify(perihelion: f64, aphelion: f64) -> Self {
        if perihelion < 1.0 && aphelion > 1.0 {
            EarthCrossing::HighImpactPotential
        } else if perihelion < EARTH_CROSSING_MAX_PERIHELION
            && aphelion > EARTH_CROSSING_MIN_APHELION
        {
            EarthCrossing::EarthCrossing
        } else {
            EarthCrossing::None
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            EarthCrossing::None => "",
            EarthCrossing::EarthCrossing => "Earth-Crossing Orbit Detected!",
            EarthCrossing::HighImpactPotential => "High Earth Impact Potential!",
        }
    }
}

/// Derived quantities of a heliocentric orbit.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitalDynamics {
    /// Speed at perihelion (km/s)
    pub perihelion_speed_km_s: f64,
    pub period_years: f64,
    /// Specific orbital energy −μ/2a (J/kg)
    pub specific_energy: f64,
    pub perihelion_au: f64,
    pub aphelion_au: f64,
    pub classification: EarthCrossing,
}

impl OrbitalDynamics {
    /// Compute from semi-major axis (AU) and eccentricity.
    pub fn compute(semi_major_axis_au: f64, eccentricity: f64) -> Self {
        let a = semi_major_axis_au * AU_TO_METERS;
        let perihelion_au = semi_major_axis_au * (1.0 - eccentricity);
        let aphelion_au = semi_major_axis_au * (1.0 + eccentricity);
        let q = perihelion_au * AU_TO_METERS;

        let perihelion_speed = (GM_SUN * (2.0 / q - 1.0 / a)).max(0.0).sqrt();
        let period_seconds = std::f64::consts::TAU * (a.powi(3) / GM_SUN).sqrt();

        Self {
            perihelion_speed_km_s: perihelion_speed / 1000.0,
            period_years: period_seconds / (DAYS_PER_YEAR * SECONDS_PER_DAY),
            specific_energy: -GM_SUN / (2.0 * a),
            perihelion_au,
            aphelion_au,
            classification: EarthCrossing::classify(perihelion_au, aphelion_au),
        }
    }

    /// Specific energy in GJ/kg.
    pub fn energy_gj_per_kg(&self) -> f64 {
        self.specific_energy / 1e9
    }
}

/// Two-body orbit matching a position/velocity pair.
#[derive(Clone, Debug, PartialEq)]
pub struct OsculatingOrbit {
    /// Semi-major axis (AU). Negative for hyperbolic orbits.
    pub semi_major_axis_au: f64,
    pub eccentricity: f64,
    /// Specific orbital energy (J/kg). E > 0 = unbound.
    pub energy: f64,
    /// Specific angular momentum magnitude (m²/s)
    pub angular_momentum: f64,
    /// Only for bound orbits.
    pub period_years: Option<f64>,
}

impl OsculatingOrbit {
    pub fn is_bound(&self) -> bool {
        self.energy < 0.0
    }

    /// Perihelion distance (AU), `a(1 - e)`.
    pub fn perihelion_au(&self) -> f64 {
        self.semi_major_axis_au * (1.0 - self.eccentricity)
    }

    /// Aphelion distance (AU); infinite for unbound orbits.
    pub fn aphelion_au(&self) -> f64 {
        if self.is_bound() {
            self.semi_major_axis_au * (1.0 + self.eccentricity)
        } else {
            f64::INFINITY
        }
    }

    pub fn classification(&self) -> EarthCrossing {
        EarthCrossing::classify(self.perihelion_au(), self.aphelion_au())
    }
}

/// Osculating heliocentric orbit of a body.
///
/// Returns `None` when the body is within 1,000 km of the Sun.
pub fn osculating_orbit(state: &BodyState) -> Option<OsculatingOrbit> {
    let pos: DVec3 = state.pos * METERS_PER_UNIT;
    let r = pos.length();
    if r < MIN_GRAVITY_DISTANCE_M {
        return None;
    }
    let vel = state.vel.normalize_or_zero() * units_per_day_to_m_s(state.vel.length());

    let energy = 0.5 * vel.length_squared() - GM_SUN / r;
    let h = pos.cross(vel).length();

    let semi_major_axis = if energy.abs() > 1e-10 {
        -GM_SUN / (2.0 * energy)
    } else {
        f64::INFINITY
    };

    // e = sqrt(1 + 2Eh²/μ²)
    let e_squared = 1.0 + (2.0 * energy * h * h) / (GM_SUN * GM_SUN);
    let eccentricity = e_squared.max(0.0).sqrt();

    let period_years = (energy < 0.0).then(|| {
        std::f64::consts::TAU * (semi_major_axis.powi(3) / GM_SUN).sqrt()
            / (DAYS_PER_YEAR * SECONDS_PER_DAY)
    });

    Some(OsculatingOrbit {
        semi_major_axis_au: semi_major_axis / AU_TO_METERS,
        eccentricity,
        energy,
        angular_momentum: h,
        period_years,
    })
}
