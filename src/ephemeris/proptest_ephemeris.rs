//! Property-based tests for ephemeris computations using proptest.

use proptest::prelude::*;
use std::f64::consts::TAU;

use super::kepler::{OrbitalElements, PlanetOrbit, solve_eccentric_anomaly};
use crate::types::AU_SCALE;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The solver should produce E such that M = E - e*sin(E).
    #[test]
    fn prop_kepler_solver_convergence(
        mean_anomaly_normalized in 0.0f64..1.0,
        eccentricity in 0.0f64..0.9,
    ) {
        let mean_anomaly = mean_anomaly_normalized * TAU;
        let e_anom = solve_eccentric_anomaly(mean_anomaly, eccentricity);

        let residual = (e_anom - eccentricity * e_anom.sin() - mean_anomaly).abs();
        prop_assert!(
            residual < 1e-5,
            "Kepler solver failed: M={}, e={}, E={}, residual={}",
            mean_anomaly, eccentricity, e_anom, residual
        );
    }

    /// Circular orbits keep a constant radius of a·AU_SCALE at any orientation.
    #[test]
    fn prop_circular_orbit_radius(
        semi_major_axis in 0.3f64..40.0,
        inclination in 0.0f64..180.0,
        node in 0.0f64..360.0,
        periapsis in 0.0f64..360.0,
        mean_anomaly in 0.0f64..TAU,
    ) {
        let orbit = OrbitalElements::from_degrees(
            semi_major_axis, 0.0, inclination, node, periapsis, 0.0, 1.0,
        );
        let r = orbit.position_at_mean_anomaly(mean_anomaly).length();
        let expected = semi_major_axis * AU_SCALE;
        prop_assert!(
            (r - expected).abs() < 1e-9 * expected,
            "radius {} != {}", r, expected
        );
    }

    /// Distance from the Sun stays within [q, Q] for elliptical orbits.
    #[test]
    fn prop_distance_within_apsides(
        semi_major_axis in 0.5f64..10.0,
        eccentricity in 0.0f64..0.9,
        inclination in 0.0f64..90.0,
        mean_anomaly in 0.0f64..TAU,
    ) {
        let orbit = OrbitalElements::from_degrees(
            semi_major_axis, eccentricity, inclination, 30.0, 60.0, 0.0, 1.0,
        );
        let r = orbit.position_at_mean_anomaly(mean_anomaly).length() / AU_SCALE;
        prop_assert!(r >= orbit.perihelion() - 1e-6);
        prop_assert!(r <= orbit.aphelion() + 1e-6);
    }

    /// The seeded N-body velocity always points along the direction of
    /// Keplerian motion.
    #[test]
    fn prop_initial_velocity_is_prograde(
        semi_major_axis in 0.5f64..10.0,
        eccentricity in 0.0f64..0.5,
        inclination in 0.0f64..80.0,
        node in 0.0f64..360.0,
        periapsis in 0.0f64..360.0,
        mean_anomaly in 0.0f64..TAU,
    ) {
        let orbit = OrbitalElements::from_degrees(
            semi_major_axis, eccentricity, inclination, node, periapsis, 0.0, 1.0,
        );
        let here = orbit.position_at_mean_anomaly(mean_anomaly);
        let ahead = orbit.position_at_mean_anomaly(mean_anomaly + 1e-3);
        let vel = orbit.initial_velocity(here);
        prop_assert!(vel.dot(ahead - here) > 0.0);
    }

    /// Planet positions repeat after one period.
    #[test]
    fn prop_planet_orbit_periodic(
        day in 0.0f64..1000.0,
        eccentricity in 0.0f64..0.3,
    ) {
        let orbit = PlanetOrbit::new(1.5, eccentricity, 3.0, 500.0);
        let p0 = orbit.position_at(day);
        let p1 = orbit.position_at(day + 500.0);
        prop_assert!((p1 - p0).length() < 1e-6);
    }
}
