//! Kinetic impactor momentum transfer and mission easing curves.
//!
//! Delta-v = m_impactor × v_impact / M_asteroid, with no ejecta
//! enhancement. The push is applied against the asteroid's motion.

use bevy::math::DVec3;
use bevy::prelude::Resource;

use crate::types::{SECONDS_PER_DAY, m_s_to_units_per_day};

/// Direction used when the asteroid has no velocity to push against.
const FALLBACK_DEFLECTION: DVec3 = DVec3::new(0.002, 0.001, -0.003);

/// Days over which the displacement estimate is quoted.
pub const DISPLACEMENT_HORIZON_DAYS: f64 = 30.0;

/// Kinetic impactor spacecraft.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct KineticImpactorConfig {
    /// Impactor mass (kg)
    pub mass_kg: f64,
    /// Closing speed at impact (m/s)
    pub impact_speed_m_s: f64,
}

impl Default for KineticImpactorConfig {
    fn default() -> Self {
        // DART-class spacecraft
        Self {
            mass_kg: 600.0,
            impact_speed_m_s: 6500.0,
        }
    }
}

impl KineticImpactorConfig {
    /// Momentum delivered (kg·m/s).
    pub fn momentum(&self) -> f64 {
        self.mass_kg * self.impact_speed_m_s
    }

    /// Speed change of an asteroid of the given mass (m/s).
    pub fn delta_v_m_s(&self, asteroid_mass: f64) -> f64 {
        if asteroid_mass <= 0.0 {
            return 0.0;
        }
        self.momentum() / asteroid_mass
    }

    /// Velocity change in units/day plus the report for it.
    pub fn deflect(&self, asteroid_mass: f64, asteroid_vel: DVec3) -> (DVec3, DeflectionReport) {
        let delta_v = self.delta_v_m_s(asteroid_mass);
        let direction = (-asteroid_vel)
            .try_normalize()
            .unwrap_or_else(|| FALLBACK_DEFLECTION.normalize());
        let impulse = direction * m_s_to_units_per_day(delta_v);

        let report = DeflectionReport {
            impactor_mass_kg: self.mass_kg,
            impact_speed_m_s: self.impact_speed_m_s,
            momentum: self.momentum(),
            delta_v_m_s: delta_v,
            displacement_km: delta_v * DISPLACEMENT_HORIZON_DAYS * SECONDS_PER_DAY / 1000.0,
        };
        (impulse, report)
    }
}

/// Outcome of a kinetic impact.
#[derive(Clone, Debug, PartialEq)]
pub struct DeflectionReport {
    pub impactor_mass_kg: f64,
    pub impact_speed_m_s: f64,
    /// Momentum transfer (kg·m/s)
    pub momentum: f64,
    /// Speed change of the asteroid (m/s)
    pub delta_v_m_s: f64,
    /// Straight-line drift after [`DISPLACEMENT_HORIZON_DAYS`] (km)
    pub displacement_km: f64,
}

impl DeflectionReport {
    /// Momentum in kN·s.
    pub fn momentum_kns(&self) -> f64 {
        self.momentum / 1000.0
    }

    /// Speed change in mm/s.
    pub fn delta_v_mm_s(&self) -> f64 {
        self.delta_v_m_s * 1000.0
    }
}

/// Quadratic ease-in-out on `[0, 1]`.
pub fn ease_in_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::units_per_day_to_m_s;
    use approx::assert_relative_eq;

    #[test]
    fn test_delta_v_from_momentum() {
        let config = KineticImpactorConfig::default();
        assert_relative_eq!(config.momentum(), 3.9e6);
        assert_relative_eq!(config.delta_v_m_s(3.9e9), 1e-3, max_relative = 1e-12);
        assert_eq!(config.delta_v_m_s(0.0), 0.0);
    }

    #[test]
    fn test_impulse_is_retrograde() {
        let config = KineticImpactorConfig::default();
        let vel = DVec3::new(0.0, 0.0, 0.6);
        let (impulse, report) = config.deflect(3.9e9, vel);
        assert!(impulse.z < 0.0);
        assert_relative_eq!(impulse.x, 0.0);
        assert_relative_eq!(
            units_per_day_to_m_s(impulse.length()),
            report.delta_v_m_s,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_fallback_direction_when_at_rest() {
        let (impulse, _) = KineticImpactorConfig::default().deflect(1e9, DVec3::ZERO);
        assert!(impulse.length() > 0.0);
        assert!(impulse.x > 0.0 && impulse.z < 0.0);
    }

    #[test]
    fn test_report_units() {
        let (_, report) = KineticImpactorConfig::default().deflect(3.9e9, DVec3::X);
        assert_relative_eq!(report.momentum_kns(), 3900.0);
        assert_relative_eq!(report.delta_v_mm_s(), 1.0, max_relative = 1e-12);
        // 1 mm/s for 30 days
        assert_relative_eq!(report.displacement_km, 2.592, max_relative = 1e-12);
    }

    #[test]
    fn test_easing_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert_eq!(ease_in_out_quad(1.0), 1.0);
        assert_relative_eq!(ease_in_out_quad(0.5), 0.5);
        assert_relative_eq!(ease_in_out_quad(0.25), 0.125);
        assert_relative_eq!(ease_in_out_quad(0.75), 0.875);
        assert_eq!(ease_in_out_quad(2.0), 1.0);
    }
}
