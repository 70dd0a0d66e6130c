//! Test utilities for orbital mechanics simulation tests.
//!
//! Fixtures work in simulation units (units, days) so they plug straight
//! into the integrators.

use bevy::math::DVec3;

use crate::types::{AU_SCALE, BodyState, GM_SUN, METERS_PER_UNIT, SECONDS_PER_DAY};

/// Sun's gravitational parameter in units³/day².
pub fn mu_sun() -> f64 {
    GM_SUN * SECONDS_PER_DAY * SECONDS_PER_DAY / METERS_PER_UNIT.powi(3)
}

/// Fixtures for creating test orbital states.
pub mod fixtures {
    use super::*;

    /// Body in a circular orbit at the given distance, on +x moving toward +z.
    pub fn circular_orbit(distance_au: f64) -> BodyState {
        let r = distance_au * AU_SCALE;
        let v = (mu_sun() / r).sqrt();
        BodyState::new(DVec3::new(r, 0.0, 0.0), DVec3::new(0.0, 0.0, v), 1.0)
    }

    /// Body at perihelion of an elliptical orbit, on +x moving toward +z.
    pub fn elliptical_orbit(perihelion_au: f64, eccentricity: f64) -> BodyState {
        assert!(
            (0.0..1.0).contains(&eccentricity),
            "Eccentricity must be in [0, 1) for elliptical orbit"
        );

        let r_p = perihelion_au * AU_SCALE;
        let a = r_p / (1.0 - eccentricity);
        let v = (mu_sun() * (2.0 / r_p - 1.0 / a)).sqrt();
        BodyState::new(DVec3::new(r_p, 0.0, 0.0), DVec3::new(0.0, 0.0, v), 1.0)
    }
}

/// Assertions for verifying physical invariants.
pub mod assertions {
    use super::*;

    /// Specific orbital energy about the Sun, E = v²/2 - μ/r.
    pub fn orbital_energy(pos: DVec3, vel: DVec3) -> f64 {
        0.5 * vel.length_squared() - mu_sun() / pos.length()
    }

    /// Specific angular momentum vector r × v.
    pub fn angular_momentum(pos: DVec3, vel: DVec3) -> DVec3 {
        pos.cross(vel)
    }

    /// Orbital period in days for a semi-major axis in units.
    pub fn orbital_period(semi_major_axis: f64) -> f64 {
        std::f64::consts::TAU * (semi_major_axis.powi(3) / mu_sun()).sqrt()
    }

    /// Assert that energy is conserved within a relative tolerance.
    pub fn assert_energy_conserved(initial_energy: f64, final_energy: f64, tolerance: f64) {
        let drift = ((final_energy - initial_energy) / initial_energy).abs();
        assert!(
            drift <= tolerance,
            "energy drift {drift:.3e} > {tolerance:.3e} ({initial_energy:.6e} -> {final_energy:.6e})"
        );
    }
}

/// Utilities for creating headless Bevy apps for testing.
pub mod bevy_test {
    use bevy::prelude::*;

    use crate::simulation::SimulationPlugin;

    /// Minimal app with the full simulation and no rendering.
    pub fn headless_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, SimulationPlugin));
        app.finish();
        app.cleanup();
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AU_TO_METERS, m_s_to_units_per_day};
    use approx::assert_relative_eq;

    #[test]
    fn test_circular_orbit_speed_matches_si() {
        let state = fixtures::circular_orbit(1.0);
        let expected = m_s_to_units_per_day((GM_SUN / AU_TO_METERS).sqrt());
        assert_relative_eq!(state.vel.length(), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_elliptical_orbit_is_bound() {
        let state = fixtures::elliptical_orbit(1.0, 0.5);
        assert!(assertions::orbital_energy(state.pos, state.vel) < 0.0);
    }

    #[test]
    fn test_orbital_period_earth() {
        let period = assertions::orbital_period(AU_SCALE);
        assert_relative_eq!(period, 365.25, max_relative = 0.01);
    }
}
