//! Gravity calculation for asteroid physics.
//!
//! Computes gravitational acceleration from the Sun and planets. Positions
//! are in simulation units, accelerations come back in units/day².
//! Asteroids are test particles: they feel the massive bodies but do not
//! pull on anything.

use bevy::math::DVec3;
use wide::f64x4;

use crate::ephemeris::GravitySource;
use crate::types::{G, METERS_PER_UNIT, MIN_GRAVITY_DISTANCE_M, SECONDS_PER_DAY};

/// Factor turning `mass / r³` (kg, units) into units/day² along the separation vector.
///
/// a = G·M/(rU)² m/s², times D²/U for units/day², times δ/r for direction,
/// which collapses to δ·G·M·D²/(U³·r³).
#[inline]
fn strength(mass: f64, multiplier: f64) -> f64 {
    G * multiplier * mass * SECONDS_PER_DAY * SECONDS_PER_DAY
        / (METERS_PER_UNIT * METERS_PER_UNIT * METERS_PER_UNIT)
}

/// Acceleration of a test particle at `pos` due to a single perturber.
///
/// Zero when the separation is under 1,000 km.
#[inline]
pub fn acceleration_from(
    pos: DVec3,
    source_pos: DVec3,
    source_mass: f64,
    multiplier: f64,
) -> DVec3 {
    let delta = source_pos - pos;
    let r = delta.length();
    if r * METERS_PER_UNIT < MIN_GRAVITY_DISTANCE_M {
        return DVec3::ZERO;
    }
    delta * (strength(source_mass, multiplier) / (r * r * r))
}

/// Sum of accelerations from all gravity sources.
///
/// # Arguments
/// * `pos` - Position in simulation units
/// * `sources` - Pre-fetched massive bodies for the current tick
/// * `multiplier` - Scales G (1.0 is physical gravity)
#[inline]
pub fn compute_acceleration(pos: DVec3, sources: &[GravitySource], multiplier: f64) -> DVec3 {
    sources
        .iter()
        .map(|s| acceleration_from(pos, s.pos, s.mass, multiplier))
        .sum()
}

/// Accelerations for many test particles at once, four lanes at a time.
///
/// Writes one acceleration per position into `out`. Lanes closer than
/// 1,000 km to a source get no contribution from that source, exactly like
/// [`acceleration_from`].
pub fn compute_accelerations_batch(
    positions: &[DVec3],
    sources: &[GravitySource],
    multiplier: f64,
    out: &mut [DVec3],
) {
    debug_assert_eq!(positions.len(), out.len());
    let min_r = MIN_GRAVITY_DISTANCE_M / METERS_PER_UNIT;

    for (chunk, out_chunk) in positions.chunks(4).zip(out.chunks_mut(4)) {
        let lanes = chunk.len();
        let mut xs = [0.0; 4];
        let mut ys = [0.0; 4];
        let mut zs = [0.0; 4];
        for (lane, p) in chunk.iter().enumerate() {
            xs[lane] = p.x;
            ys[lane] = p.y;
            zs[lane] = p.z;
        }
        let (px, py, pz) = (f64x4::new(xs), f64x4::new(ys), f64x4::new(zs));

        let mut ax = f64x4::splat(0.0);
        let mut ay = f64x4::splat(0.0);
        let mut az = f64x4::splat(0.0);

        for source in sources {
            let dx = f64x4::splat(source.pos.x) - px;
            let dy = f64x4::splat(source.pos.y) - py;
            let dz = f64x4::splat(source.pos.z) - pz;
            let r2 = dx * dx + dy * dy + dz * dz;
            let r = r2.sqrt();

            // Per-lane floor: masked lanes divide by 1 and are zeroed
            let r_arr = r.to_array();
            let mut mask = [0.0; 4];
            let mut r3 = [1.0; 4];
            for lane in 0..lanes {
                if r_arr[lane] >= min_r {
                    mask[lane] = 1.0;
                    r3[lane] = r_arr[lane] * r_arr[lane] * r_arr[lane];
                }
            }

            let k = f64x4::splat(strength(source.mass, multiplier)) * f64x4::new(mask)
                / f64x4::new(r3);
            ax += dx * k;
            ay += dy * k;
            az += dz * k;
        }

        let (ax, ay, az) = (ax.to_array(), ay.to_array(), az.to_array());
        for (lane, acc) in out_chunk.iter_mut().enumerate() {
            *acc = DVec3::new(ax[lane], ay[lane], az[lane]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::{CelestialBodyId, Ephemeris};
    use crate::types::{AU_SCALE, AU_TO_METERS, GM_SUN, SUN_MASS};
    use approx::assert_relative_eq;

    fn sun_only() -> [GravitySource; 1] {
        [GravitySource {
            id: CelestialBodyId::Sun,
            pos: DVec3::ZERO,
            mass: SUN_MASS,
        }]
    }

    #[test]
    fn test_acceleration_at_earth_distance() {
        let pos = DVec3::new(AU_SCALE, 0.0, 0.0);
        let acc = compute_acceleration(pos, &sun_only(), 1.0);

        assert!(acc.x < 0.0, "Acceleration should be toward Sun");

        // GM_sun / r² in m/s², converted to units/day²
        let expected_m_s2 = GM_SUN / (AU_TO_METERS * AU_TO_METERS);
        let expected = expected_m_s2 * SECONDS_PER_DAY * SECONDS_PER_DAY / METERS_PER_UNIT;
        assert_relative_eq!(acc.length(), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_force_inside_floor() {
        // 500 km from the Sun's center
        let pos = DVec3::new(5.0e5 / METERS_PER_UNIT, 0.0, 0.0);
        let acc = compute_acceleration(pos, &sun_only(), 1.0);
        assert_eq!(acc, DVec3::ZERO);
        assert_eq!(compute_acceleration(DVec3::ZERO, &sun_only(), 1.0), DVec3::ZERO);
    }

    #[test]
    fn test_multiplier_scales_linearly() {
        let pos = DVec3::new(0.0, 3.0, 70.0);
        let a1 = compute_acceleration(pos, &sun_only(), 1.0);
        let a3 = compute_acceleration(pos, &sun_only(), 3.0);
        assert_relative_eq!(a3.length(), 3.0 * a1.length(), max_relative = 1e-12);
        assert_eq!(compute_acceleration(pos, &sun_only(), 0.0), DVec3::ZERO);
    }

    #[test]
    fn test_planet_gravity_contributes() {
        let eph = Ephemeris::new();
        let sources = eph.gravity_sources(0.0);
        let jupiter = sources[5];
        assert_eq!(jupiter.id, CelestialBodyId::Jupiter);

        // 0.05 AU outward from Jupiter
        let offset = jupiter.pos.normalize() * 0.05 * AU_SCALE;
        let pos = jupiter.pos + offset;

        let with_planets = compute_acceleration(pos, &sources, 1.0);
        let sun = compute_acceleration(pos, &sources[..1], 1.0);
        let pull = with_planets - sun;
        // Jupiter pulls back toward itself
        assert!(pull.dot(-offset) > 0.0);
    }

    #[test]
    fn test_batch_matches_scalar() {
        let eph = Ephemeris::new();
        let sources = eph.gravity_sources(42.0);
        let positions = vec![
            DVec3::new(80.0, 1.0, -20.0),
            DVec3::new(-100.0, 5.0, 30.0),
            DVec3::ZERO,
            DVec3::new(0.0, 0.0, 210.0),
            DVec3::new(12.0, -4.0, 45.0),
        ];
        let mut out = vec![DVec3::ZERO; positions.len()];
        compute_accelerations_batch(&positions, &sources, 1.0, &mut out);

        for (pos, batch) in positions.iter().zip(&out) {
            let scalar = compute_acceleration(*pos, &sources, 1.0);
            assert!(
                (scalar - *batch).length() <= 1e-12 * scalar.length().max(1e-12),
                "batch {:?} vs scalar {:?} at {:?}",
                batch,
                scalar,
                pos
            );
        }
        // Sun lane is floored, only planets contribute
        assert!(out[2].is_finite());
    }
}
