//! Asteroid entities, catalog ingestion and spawning.
//!
//! Asteroids are test particles: they are pulled by the Sun and planets but
//! never pull on anything. Their canonical orbit comes from the catalog; the
//! live kinematic state lives in [`BodyState`].

mod data;

pub use data::builtin_catalog;

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use bevy::prelude::*;

use crate::ephemeris::OrbitalElements;
use crate::types::{BodyState, BodyView, SimulationClock};

/// Bulk density assumed when a catalog entry has no mass (kg/m³).
pub const ASTEROID_DENSITY: f64 = 3000.0;

/// Marker component identifying an entity as a simulated asteroid.
#[derive(Component, Default)]
pub struct Asteroid;

/// Catalog designation (`pdes`), unique per asteroid.
#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AsteroidId(pub String);

/// Asteroid has been coated by a surface-alteration mission and feels a
/// constant Yarkovsky push in N-body mode.
#[derive(Component, Default)]
pub struct SurfaceAltered;

/// Asteroid has hit Earth. It is hidden and no longer propagated.
#[derive(Component, Default)]
pub struct Impacted;

/// One row of the small-body catalog, as delivered.
///
/// Fields use the database column names. Entries missing `a`, `diameter` or
/// `per_y` are rejected at ingestion.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogEntry {
    /// Primary designation, used as the asteroid id
    pub pdes: String,
    pub name: Option<String>,
    pub full_name: Option<String>,
    /// Absolute magnitude
    pub h: Option<f64>,
    /// Diameter (km)
    pub diameter: Option<f64>,
    pub albedo: Option<f64>,
    /// Mass (kg); derived from the diameter when absent
    pub mass: Option<f64>,
    /// Semi-major axis (AU)
    pub a: Option<f64>,
    pub e: f64,
    /// Perihelion distance (AU), informational
    pub q: Option<f64>,
    /// Inclination (deg)
    pub i: f64,
    /// Longitude of ascending node (deg)
    pub om: f64,
    /// Argument of perihelion (deg)
    pub w: f64,
    /// Mean anomaly at epoch (deg)
    pub ma: f64,
    /// Orbital period (years)
    pub per_y: Option<f64>,
}

/// Why a catalog entry was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("asteroid {id}: missing or non-positive semi-major axis")]
    InvalidSemiMajorAxis { id: String },

    #[error("asteroid {id}: missing or non-positive diameter")]
    InvalidDiameter { id: String },

    #[error("asteroid {id}: missing or non-positive orbital period")]
    InvalidPeriod { id: String },

    #[error("asteroid {id}: eccentricity {e} is not a bound orbit")]
    InvalidEccentricity { id: String, e: f64 },

    #[error("asteroid {id}: duplicate designation")]
    DuplicateId { id: String },
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Mass of a uniform sphere of the given diameter at [`ASTEROID_DENSITY`].
pub fn mass_from_diameter(diameter_km: f64) -> f64 {
    let radius_m = diameter_km * 1000.0 / 2.0;
    (4.0 / 3.0) * PI * radius_m.powi(3) * ASTEROID_DENSITY
}

/// Unscaled display size: grows logarithmically with diameter.
pub fn base_size(diameter_km: f64) -> f64 {
    0.3 + (diameter_km + 1.0).ln() * 0.3
}

/// Static, validated description of an asteroid.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct AsteroidRecord {
    pub name: String,
    pub full_name: Option<String>,
    pub diameter_km: f64,
    pub albedo: Option<f64>,
    pub absolute_magnitude: Option<f64>,
    /// Canonical orbit (angles already in radians)
    pub elements: OrbitalElements,
    /// Display size before the global visual scale is applied
    pub base_size: f64,
}

impl AsteroidRecord {
    /// Display radius in simulation units.
    pub fn visual_radius(&self, scale: &AsteroidScale) -> f64 {
        self.base_size * scale.visual_scale
    }
}

impl CatalogEntry {
    /// Validate the entry and convert it into a record plus mass (kg).
    pub fn to_record(&self) -> Result<(AsteroidRecord, f64), CatalogError> {
        let id = || self.pdes.clone();

        let a = positive(self.a)
            .ok_or_else(|| CatalogError::InvalidSemiMajorAxis { id: id() })?;
        let diameter =
            positive(self.diameter).ok_or_else(|| CatalogError::InvalidDiameter { id: id() })?;
        let per_y =
            positive(self.per_y).ok_or_else(|| CatalogError::InvalidPeriod { id: id() })?;
        if !(0.0..1.0).contains(&self.e) {
            return Err(CatalogError::InvalidEccentricity { id: id(), e: self.e });
        }

        let elements =
            OrbitalElements::from_degrees(a, self.e, self.i, self.om, self.w, self.ma, per_y);
        let mass = positive(self.mass).unwrap_or_else(|| mass_from_diameter(diameter));

        let record = AsteroidRecord {
            name: self.name.clone().unwrap_or_else(|| self.pdes.clone()),
            full_name: self.full_name.clone(),
            diameter_km: diameter,
            albedo: self.albedo,
            absolute_magnitude: self.h,
            elements,
            base_size: base_size(diameter),
        };
        Ok((record, mass))
    }
}

/// An accepted catalog entry, ready to spawn.
#[derive(Clone, Debug)]
pub struct IngestedAsteroid {
    pub id: AsteroidId,
    pub record: AsteroidRecord,
    pub mass: f64,
}

/// Validate a catalog, skipping (and logging) rejected entries.
pub fn ingest_catalog(entries: &[CatalogEntry]) -> Vec<IngestedAsteroid> {
    let mut seen = HashSet::new();
    let mut accepted = Vec::with_capacity(entries.len());

    for entry in entries {
        let result = if seen.contains(&entry.pdes) {
            Err(CatalogError::DuplicateId { id: entry.pdes.clone() })
        } else {
            entry.to_record()
        };

        match result {
            Ok((record, mass)) => {
                seen.insert(entry.pdes.clone());
                accepted.push(IngestedAsteroid {
                    id: AsteroidId(entry.pdes.clone()),
                    record,
                    mass,
                });
            }
            Err(err) => warn!("Skipping catalog entry: {}", err),
        }
    }

    info!(
        "Ingested {} of {} catalog entries",
        accepted.len(),
        entries.len()
    );
    accepted
}

/// Global display scale for asteroids.
#[derive(Resource, Clone, Debug)]
pub struct AsteroidScale {
    pub visual_scale: f64,
}

impl Default for AsteroidScale {
    fn default() -> Self {
        Self { visual_scale: 5.0 }
    }
}

/// Lookup from designation to entity.
#[derive(Resource, Default, Debug)]
pub struct AsteroidIndex {
    by_id: HashMap<String, Entity>,
}

impl AsteroidIndex {
    pub fn get(&self, id: &str) -> Option<Entity> {
        self.by_id.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn insert(&mut self, id: &str, entity: Entity) {
        self.by_id.insert(id.to_string(), entity);
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Entity)> + '_ {
        self.by_id.iter().map(|(id, e)| (id.as_str(), *e))
    }
}

/// Spawn one ingested asteroid at its Keplerian position for the current day.
///
/// The N-body velocity is seeded here once and never recomputed.
/// Returns `None` when the id is already present.
pub fn spawn_asteroid(world: &mut World, asteroid: IngestedAsteroid) -> Option<Entity> {
    if world.resource::<AsteroidIndex>().contains(&asteroid.id.0) {
        warn!("Asteroid {} already spawned", asteroid.id.0);
        return None;
    }

    let sim_day = world.resource::<SimulationClock>().sim_day;
    let radius = asteroid.record.visual_radius(world.resource::<AsteroidScale>());

    let elements = &asteroid.record.elements;
    let pos = elements.position_at(sim_day);
    let vel = elements.initial_velocity(pos);

    let id = asteroid.id.0.clone();
    let entity = world
        .spawn((
            Asteroid,
            Name::new(asteroid.record.name.clone()),
            BodyState::new(pos, vel, asteroid.mass),
            BodyView {
                translation: pos.as_vec3(),
                radius: radius as f32,
                visible: true,
            },
            asteroid.record,
            asteroid.id,
        ))
        .id();

    world.resource_mut::<AsteroidIndex>().insert(&id, entity);
    Some(entity)
}

/// Ingest and spawn a whole catalog. Returns the spawned entities.
pub fn spawn_catalog(world: &mut World, entries: &[CatalogEntry]) -> Vec<Entity> {
    ingest_catalog(entries)
        .into_iter()
        .filter_map(|asteroid| spawn_asteroid(world, asteroid))
        .collect()
}

/// Registers asteroid resources.
pub struct AsteroidPlugin;

impl Plugin for AsteroidPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AsteroidIndex>()
            .init_resource::<AsteroidScale>();
    }
}
