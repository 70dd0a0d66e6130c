//! Position synchronization between physics and rendering.
//!
//! Copies [`BodyState`] positions into [`BodyView`] after propagation and
//! detection have run. Nothing here writes back into physics state.

use bevy::prelude::*;

use crate::asteroid::{Asteroid, AsteroidRecord, AsteroidScale, Impacted};
use crate::ephemeris::CelestialBody;
use crate::types::{BodyState, BodyView};

/// Sync asteroid views from physics state.
///
/// Impacted asteroids are hidden; the radius follows the current visual scale.
pub fn sync_asteroid_views(
    scale: Res<AsteroidScale>,
    mut query: Query<(&BodyState, &AsteroidRecord, &mut BodyView, Has<Impacted>), With<Asteroid>>,
) {
    for (state, record, mut view, impacted) in &mut query {
        view.translation = state.pos.as_vec3();
        view.radius = record.visual_radius(&scale) as f32;
        view.visible = !impacted;
    }
}

/// Sync Sun and planet views from their ephemeris-driven state.
pub fn sync_celestial_views(mut query: Query<(&BodyState, &mut BodyView), With<CelestialBody>>) {
    for (state, mut view) in &mut query {
        view.translation = state.pos.as_vec3();
    }
}
