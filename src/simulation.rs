//! Top-level plugin wiring the whole simulation together.

use bevy::prelude::*;

use crate::asteroid::AsteroidPlugin;
use crate::collision::CollisionPlugin;
use crate::ephemeris::EphemerisPlugin;
use crate::mission::MissionPlugin;
use crate::overrides::OrbitOverrides;
use crate::physics::PhysicsPlugin;
use crate::render::RenderSyncPlugin;
use crate::selection::TrackedAsteroid;
use crate::time::TimePlugin;
use crate::types::SimulationSet;

/// Clock, ephemeris, propagation, impact detection, missions and view sync.
///
/// Needs a `Time` resource (e.g. from `MinimalPlugins`) for missions.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                SimulationSet::Clock,
                SimulationSet::Propagate,
                SimulationSet::Detect,
                SimulationSet::Missions,
                SimulationSet::Sync,
            )
                .chain(),
        )
        .init_resource::<OrbitOverrides>()
        .init_resource::<TrackedAsteroid>()
        .add_plugins((
            TimePlugin,
            EphemerisPlugin,
            AsteroidPlugin,
            PhysicsPlugin,
            CollisionPlugin,
            MissionPlugin,
            RenderSyncPlugin,
        ));
    }
}
