//! Property-based tests for physics simulation using proptest.
//!
//! These tests verify physical invariants across a wide range of orbital parameters.

use bevy::math::DVec3;
use proptest::prelude::*;

use super::gravity::{acceleration_from, compute_accelerations_batch};
use super::integrator::Integrator;
use crate::ephemeris::{CelestialBodyId, GravitySource};
use crate::test_utils::{assertions, fixtures};
use crate::types::{AU_SCALE, SUN_MASS};

fn sun() -> [GravitySource; 1] {
    [GravitySource {
        id: CelestialBodyId::Sun,
        pos: DVec3::ZERO,
        mass: SUN_MASS,
    }]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Verlet keeps two-body energy within 1% over one orbit.
    #[test]
    fn prop_verlet_energy_conservation_one_orbit(
        perihelion_au in 0.5f64..5.0,
        eccentricity in 0.0f64..0.6,
    ) {
        let mut state = fixtures::elliptical_orbit(perihelion_au, eccentricity);
        let initial_energy = assertions::orbital_energy(state.pos, state.vel);

        let a = perihelion_au * AU_SCALE / (1.0 - eccentricity);
        let period = assertions::orbital_period(a);
        let steps = 5000;
        let dt = period / steps as f64;
        let sources = sun();

        for _ in 0..steps {
            Integrator::Verlet.step(&mut state, dt, |p| {
                super::gravity::compute_acceleration(p, &sources, 1.0)
            });
        }

        let final_energy = assertions::orbital_energy(state.pos, state.vel);
        let drift = ((final_energy - initial_energy) / initial_energy).abs();
        prop_assert!(
            drift < 0.01,
            "Energy drift {:.4}% exceeds 1% (e={}, q={} AU)",
            drift * 100.0, eccentricity, perihelion_au
        );
    }

    /// Central force conserves angular momentum under Verlet.
    #[test]
    fn prop_verlet_angular_momentum_conservation(
        distance_au in 0.5f64..5.0,
    ) {
        let mut state = fixtures::circular_orbit(distance_au);
        let l0 = assertions::angular_momentum(state.pos, state.vel);
        let sources = sun();

        for _ in 0..500 {
            Integrator::Verlet.step(&mut state, 0.5, |p| {
                super::gravity::compute_acceleration(p, &sources, 1.0)
            });
        }

        let l1 = assertions::angular_momentum(state.pos, state.vel);
        prop_assert!((l1 - l0).length() < 1e-9 * l0.length());
    }

    /// Acceleration is always directed at the perturber and follows 1/r².
    #[test]
    fn prop_inverse_square(
        x in -300.0f64..300.0,
        y in -20.0f64..20.0,
        z in -300.0f64..300.0,
    ) {
        let pos = DVec3::new(x, y, z);
        prop_assume!(pos.length() > 1.0);

        let acc = acceleration_from(pos, DVec3::ZERO, SUN_MASS, 1.0);
        prop_assert!(acc.dot(pos) < 0.0);

        let far = acceleration_from(pos * 2.0, DVec3::ZERO, SUN_MASS, 1.0);
        let ratio = acc.length() / far.length();
        prop_assert!((ratio - 4.0).abs() < 1e-9);
    }

    /// The SIMD batch agrees with the scalar path for arbitrary populations.
    #[test]
    fn prop_batch_matches_scalar(
        coords in prop::collection::vec(
            (-400.0f64..400.0, -30.0f64..30.0, -400.0f64..400.0),
            1..11,
        ),
    ) {
        let positions: Vec<DVec3> = coords.iter().map(|&(x, y, z)| DVec3::new(x, y, z)).collect();
        let sources = sun();
        let mut out = vec![DVec3::ZERO; positions.len()];
        compute_accelerations_batch(&positions, &sources, 1.0, &mut out);

        for (pos, batch) in positions.iter().zip(&out) {
            let scalar = acceleration_from(*pos, DVec3::ZERO, SUN_MASS, 1.0);
            prop_assert!((scalar - *batch).length() <= 1e-12 * scalar.length().max(1e-12));
        }
    }
}
