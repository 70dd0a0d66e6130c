//! User-edited orbits.
//!
//! An override replaces some of `(a, e, i)` for one asteroid. The remaining
//! elements (node, periapsis, epoch anomaly) are always taken from the
//! canonical orbit. Keplerian propagation and orbit paths read through
//! [`OrbitOverrides::effective_elements`], so clearing an override puts the
//! asteroid straight back on its catalog orbit. Values that would not give
//! a bound ellipse are rejected before they reach the store.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::ephemeris::OrbitalElements;

/// Why an override edit was refused.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum OverrideError {
    #[error("semi-major axis {0} must be a positive finite number of AU")]
    InvalidSemiMajorAxis(f64),

    #[error("eccentricity {0} is outside [0, 1)")]
    InvalidEccentricity(f64),

    #[error("inclination {0} is not a finite angle")]
    InvalidInclination(f64),
}

/// Edited subset of an asteroid's orbital elements.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrbitOverride {
    /// Semi-major axis (AU)
    pub semi_major_axis: Option<f64>,
    /// Eccentricity, `0 <= e < 1`
    pub eccentricity: Option<f64>,
    /// Inclination (radians)
    pub inclination: Option<f64>,
}

impl OrbitOverride {
    pub fn with_semi_major_axis(mut self, a: f64) -> Self {
        self.semi_major_axis = Some(a);
        self
    }

    pub fn with_eccentricity(mut self, e: f64) -> Self {
        self.eccentricity = Some(e);
        self
    }

    pub fn with_inclination_deg(mut self, degrees: f64) -> Self {
        self.inclination = Some(degrees.to_radians());
        self
    }

    /// Check every set field describes a bound orbit.
    pub fn validate(&self) -> Result<(), OverrideError> {
        if let Some(a) = self.semi_major_axis
            && !(a.is_finite() && a > 0.0)
        {
            return Err(OverrideError::InvalidSemiMajorAxis(a));
        }
        if let Some(e) = self.eccentricity
            && !(0.0..1.0).contains(&e)
        {
            return Err(OverrideError::InvalidEccentricity(e));
        }
        if let Some(i) = self.inclination
            && !i.is_finite()
        {
            return Err(OverrideError::InvalidInclination(i));
        }
        Ok(())
    }

    /// Overlay this override on canonical elements.
    ///
    /// When `a` changes, the period follows Kepler's third law:
    /// `P' = P · (a'/a)^1.5`.
    pub fn apply(&self, canonical: &OrbitalElements) -> OrbitalElements {
        let mut elements = canonical.clone();
        if let Some(a) = self.semi_major_axis {
            let ratio = a / canonical.semi_major_axis;
            elements.period_days = canonical.period_days * ratio.powf(1.5);
            elements.semi_major_axis = a;
        }
        if let Some(e) = self.eccentricity {
            elements.eccentricity = e;
        }
        if let Some(i) = self.inclination {
            elements.inclination = i;
        }
        elements
    }
}

/// Store of overrides keyed by asteroid designation.
#[derive(Resource, Default, Debug)]
pub struct OrbitOverrides {
    by_id: HashMap<String, OrbitOverride>,
}

impl OrbitOverrides {
    /// Insert or replace the override for `id`.
    ///
    /// An invalid override leaves the store untouched.
    pub fn upsert(&mut self, id: &str, orbit: OrbitOverride) -> Result<(), OverrideError> {
        orbit.validate()?;
        debug!("Orbit override set for {}", id);
        self.by_id.insert(id.to_string(), orbit);
        Ok(())
    }

    /// Modify the override for `id`, starting from an empty one if needed.
    ///
    /// The edit is applied to a copy and only stored if it validates.
    pub fn edit(
        &mut self,
        id: &str,
        f: impl FnOnce(&mut OrbitOverride),
    ) -> Result<(), OverrideError> {
        let mut orbit = self.by_id.get(id).cloned().unwrap_or_default();
        f(&mut orbit);
        self.upsert(id, orbit)
    }

    pub fn get(&self, id: &str) -> Option<&OrbitOverride> {
        self.by_id.get(id)
    }

    /// Delete the override for `id`. Returns whether one existed.
    pub fn remove(&mut self, id: &str) -> bool {
        self.by_id.remove(id).is_some()
    }

    pub fn clear(&mut self) {
        self.by_id.clear();
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Elements to propagate with: the override applied to the canonical orbit,
    /// or the canonical orbit itself.
    pub fn effective_elements(&self, id: &str, canonical: &OrbitalElements) -> OrbitalElements {
        match self.by_id.get(id) {
            Some(orbit) => orbit.apply(canonical),
            None => canonical.clone(),
        }
    }
}
