//! Render-facing output of the simulation.
//!
//! This crate does not draw anything itself. It keeps a [`BodyView`] per
//! body up to date and samples orbit paths for whatever front end draws them.
//!
//! [`BodyView`]: crate::types::BodyView

pub mod orbits;
mod sync;

use bevy::prelude::*;

use crate::types::SimulationSet;

pub use self::orbits::{ORBIT_SEGMENTS, asteroid_orbit_path, orbit_path, planet_orbit_path};
pub use self::sync::{sync_asteroid_views, sync_celestial_views};

/// Plugin refreshing body views at the end of each frame.
pub struct RenderSyncPlugin;

impl Plugin for RenderSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (sync_celestial_views, sync_asteroid_views).in_set(SimulationSet::Sync),
        );
    }
}
