//! Kepler orbit solver and element-to-state conversion.
//!
//! Frame convention: y is "up". The ecliptic is the x–z plane, so a
//! zero-inclination orbit has y = 0 everywhere and runs from +x toward +z.

use std::f64::consts::TAU;

use bevy::math::DVec3;

use crate::types::{
    AU_SCALE, AU_TO_METERS, DAYS_PER_YEAR, DEG_TO_RAD, GM_SUN, METERS_PER_UNIT,
    MIN_GRAVITY_DISTANCE_M, m_s_to_units_per_day,
};

/// Default absolute tolerance on the Newton step (radians).
pub const KEPLER_TOLERANCE: f64 = 1e-6;

/// Hard cap on Newton iterations.
pub const KEPLER_MAX_ITERATIONS: u32 = 20;

/// Solve Kepler's equation `M = E - e*sin(E)` for the eccentric anomaly.
///
/// Newton–Raphson from `E = M`. If the step has not dropped below
/// [`KEPLER_TOLERANCE`] after [`KEPLER_MAX_ITERATIONS`] iterations the current
/// estimate is returned as-is.
#[inline]
pub fn solve_eccentric_anomaly(mean_anomaly: f64, eccentricity: f64) -> f64 {
    solve_eccentric_anomaly_with_tolerance(mean_anomaly, eccentricity, KEPLER_TOLERANCE)
}

/// [`solve_eccentric_anomaly`] with an explicit tolerance.
pub fn solve_eccentric_anomaly_with_tolerance(
    mean_anomaly: f64,
    eccentricity: f64,
    tolerance: f64,
) -> f64 {
    let mut e_anomaly = mean_anomaly;
    let mut delta = 1.0_f64;
    let mut iterations = 0;

    while delta.abs() > tolerance && iterations < KEPLER_MAX_ITERATIONS {
        // f(E) / f'(E)
        delta = (e_anomaly - eccentricity * e_anomaly.sin() - mean_anomaly)
            / (1.0 - eccentricity * e_anomaly.cos());
        e_anomaly -= delta;
        iterations += 1;
    }

    e_anomaly
}

/// Keplerian orbital elements of a heliocentric orbit.
///
/// Distances in AU, angles in radians, period in days.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitalElements {
    /// Semi-major axis `a` (AU)
    pub semi_major_axis: f64,
    /// Eccentricity `e`, `0 <= e < 1`
    pub eccentricity: f64,
    /// Inclination `i`
    pub inclination: f64,
    /// Longitude of the ascending node `Ω`
    pub ascending_node: f64,
    /// Argument of periapsis `ω`
    pub argument_of_periapsis: f64,
    /// Mean anomaly at epoch `M0`
    pub mean_anomaly_at_epoch: f64,
    /// Orbital period (days)
    pub period_days: f64,
}

impl OrbitalElements {
    /// Build elements from catalog-style inputs (angles in degrees, period in years).
    pub fn from_degrees(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination_deg: f64,
        ascending_node_deg: f64,
        argument_of_periapsis_deg: f64,
        mean_anomaly_deg: f64,
        period_years: f64,
    ) -> Self {
        Self {
            semi_major_axis,
            eccentricity,
            inclination: inclination_deg * DEG_TO_RAD,
            ascending_node: ascending_node_deg * DEG_TO_RAD,
            argument_of_periapsis: argument_of_periapsis_deg * DEG_TO_RAD,
            mean_anomaly_at_epoch: mean_anomaly_deg * DEG_TO_RAD,
            period_days: period_years * DAYS_PER_YEAR,
        }
    }

    /// Mean motion in radians per day.
    pub fn mean_motion(&self) -> f64 {
        TAU / self.period_days
    }

    /// Mean anomaly after `sim_day` days.
    pub fn mean_anomaly_at(&self, sim_day: f64) -> f64 {
        self.mean_anomaly_at_epoch + self.mean_motion() * sim_day
    }

    /// Orbital period in years.
    pub fn period_years(&self) -> f64 {
        self.period_days / DAYS_PER_YEAR
    }

    /// Perihelion distance `a(1 - e)` in AU.
    pub fn perihelion(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Aphelion distance `a(1 + e)` in AU.
    pub fn aphelion(&self) -> f64 {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    /// Unit vectors of the orbital plane in the simulation frame.
    ///
    /// `P` points at periapsis, `Q` is 90° ahead in the direction of motion.
    /// Composition is ω, then i, then Ω.
    pub fn plane_basis(&self) -> (DVec3, DVec3) {
        let (sw, cw) = self.argument_of_periapsis.sin_cos();
        let (so, co) = self.ascending_node.sin_cos();
        let (si, ci) = self.inclination.sin_cos();

        let p = DVec3::new(cw * co - sw * so * ci, sw * si, cw * so + sw * co * ci);
        let q = DVec3::new(
            -(sw * co + cw * so * ci),
            cw * si,
            -(sw * so - cw * co * ci),
        );
        (p, q)
    }

    /// Unit normal of the orbital plane, along the orbit's angular momentum.
    pub fn orbit_normal(&self) -> DVec3 {
        let (p, q) = self.plane_basis();
        p.cross(q)
    }

    /// Position at a given mean anomaly, in simulation units.
    pub fn position_at_mean_anomaly(&self, mean_anomaly: f64) -> DVec3 {
        let a = self.semi_major_axis;
        let e = self.eccentricity;
        let e_anomaly = solve_eccentric_anomaly(mean_anomaly, e);

        let x_orb = a * (e_anomaly.cos() - e);
        let y_orb = a * (1.0 - e * e).sqrt() * e_anomaly.sin();

        let (p, q) = self.plane_basis();
        (p * x_orb + q * y_orb) * AU_SCALE
    }

    /// Position after `sim_day` days of two-body motion.
    pub fn position_at(&self, sim_day: f64) -> DVec3 {
        self.position_at_mean_anomaly(self.mean_anomaly_at(sim_day))
    }

    /// Seed velocity for N-body integration, in units/day.
    ///
    /// Speed from vis-viva about the Sun at the given position; direction is
    /// `normal × r̂`, i.e. locally circular. Returns zero when the position is
    /// within 1,000 km of the Sun.
    pub fn initial_velocity(&self, position: DVec3) -> DVec3 {
        let r = position.length() * METERS_PER_UNIT;
        if r < MIN_GRAVITY_DISTANCE_M {
            return DVec3::ZERO;
        }

        let a = self.semi_major_axis * AU_TO_METERS;
        let v_squared = GM_SUN * (2.0 / r - 1.0 / a);
        let speed = m_s_to_units_per_day(v_squared.max(0.0).sqrt());

        let direction = self.orbit_normal().cross(position / position.length());
        direction.normalize_or_zero() * speed
    }
}

/// Simplified planetary orbit: no node or periapsis rotation, inclination
/// tilts the orbit about the x axis, mean anomaly is zero at day 0.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanetOrbit {
    /// Semi-major axis in simulation units
    pub semi_major_axis: f64,
    /// Eccentricity
    pub eccentricity: f64,
    /// Inclination in radians
    pub inclination: f64,
    /// Orbital period in days
    pub period_days: f64,
}

impl PlanetOrbit {
    /// Create an orbit from `a` in AU, inclination in degrees and period in days.
    pub fn new(
        semi_major_axis_au: f64,
        eccentricity: f64,
        inclination_deg: f64,
        period_days: f64,
    ) -> Self {
        Self {
            semi_major_axis: semi_major_axis_au * AU_SCALE,
            eccentricity,
            inclination: inclination_deg * DEG_TO_RAD,
            period_days,
        }
    }

    /// Position at eccentric anomaly `E`.
    pub fn position_at_eccentric_anomaly(&self, e_anomaly: f64) -> DVec3 {
        let a = self.semi_major_axis;
        let e = self.eccentricity;
        let x = a * (e_anomaly.cos() - e);
        let z0 = a * (1.0 - e * e).sqrt() * e_anomaly.sin();
        let (si, ci) = self.inclination.sin_cos();
        DVec3::new(x, z0 * si, z0 * ci)
    }

    /// Position after `sim_day` days.
    pub fn position_at(&self, sim_day: f64) -> DVec3 {
        let mean_anomaly = TAU * (sim_day / self.period_days);
        let e_anomaly = solve_eccentric_anomaly(mean_anomaly, self.eccentricity);
        self.position_at_eccentric_anomaly(e_anomaly)
    }

    /// Analytic velocity after `sim_day` days, in units/day.
    pub fn velocity_at(&self, sim_day: f64) -> DVec3 {
        let mean_anomaly = TAU * (sim_day / self.period_days);
        let e = self.eccentricity;
        let e_anomaly = solve_eccentric_anomaly(mean_anomaly, e);

        // dE/dt = n / (1 - e cos E)
        let e_dot = (TAU / self.period_days) / (1.0 - e * e_anomaly.cos());
        let a = self.semi_major_axis;
        let dx = -a * e_anomaly.sin() * e_dot;
        let dz0 = a * (1.0 - e * e).sqrt() * e_anomaly.cos() * e_dot;
        let (si, ci) = self.inclination.sin_cos();
        DVec3::new(dx, dz0 * si, dz0 * ci)
    }
}
