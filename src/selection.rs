//! Which asteroid is being tracked.
//!
//! At most one asteroid is tracked at a time. Only the tracked asteroid is
//! checked for Earth impact and only it can be the target of a mission.

use bevy::prelude::*;

use crate::asteroid::{AsteroidIndex, Impacted};
use crate::collision::ImpactState;
use crate::overrides::OrbitOverrides;

/// The tracked asteroid's designation and entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackedTarget {
    pub id: String,
    pub entity: Entity,
}

/// Currently tracked asteroid, if any.
#[derive(Resource, Default, Debug, Clone)]
pub struct TrackedAsteroid {
    target: Option<TrackedTarget>,
}

impl TrackedAsteroid {
    pub fn get(&self) -> Option<&TrackedTarget> {
        self.target.as_ref()
    }

    pub fn entity(&self) -> Option<Entity> {
        self.target.as_ref().map(|t| t.entity)
    }

    pub fn id(&self) -> Option<&str> {
        self.target.as_ref().map(|t| t.id.as_str())
    }

    pub fn is_tracking(&self) -> bool {
        self.target.is_some()
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no asteroid with designation {0}")]
    UnknownAsteroid(String),
}

/// Track the asteroid with designation `id`.
///
/// Selecting a different asteroid first releases the current one as
/// [`clear_selection`] does. Re-selecting the tracked asteroid is a no-op.
pub fn select_asteroid(world: &mut World, id: &str) -> Result<Entity, SelectionError> {
    let entity = world
        .resource::<AsteroidIndex>()
        .get(id)
        .ok_or_else(|| SelectionError::UnknownAsteroid(id.to_string()))?;

    if world.resource::<TrackedAsteroid>().id() == Some(id) {
        return Ok(entity);
    }
    clear_selection(world);

    world.resource_mut::<TrackedAsteroid>().target = Some(TrackedTarget {
        id: id.to_string(),
        entity,
    });
    info!("Tracking asteroid {}", id);
    Ok(entity)
}

/// Stop tracking.
///
/// Deletes the released asteroid's orbit override, re-arms the impact
/// detector and lets an impacted asteroid move again.
pub fn clear_selection(world: &mut World) {
    let Some(target) = world.resource_mut::<TrackedAsteroid>().target.take() else {
        return;
    };

    world.resource_mut::<OrbitOverrides>().remove(&target.id);
    world.resource_mut::<ImpactState>().rearm();
    if let Ok(mut entity) = world.get_entity_mut(target.entity) {
        entity.remove::<Impacted>();
    }
    info!("Released asteroid {}", target.id);
}
