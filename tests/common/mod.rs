//! Common test utilities for integration tests.
#![allow(dead_code)]

use bevy::math::DVec3;
use bevy::prelude::*;
use neo_sim::simulation::SimulationPlugin;
use neo_sim::types::{AU_SCALE, BodyState, GM_SUN, METERS_PER_UNIT, SECONDS_PER_DAY};

/// Solar gravitational parameter in units³/day².
pub fn mu_sun() -> f64 {
    GM_SUN * SECONDS_PER_DAY * SECONDS_PER_DAY / METERS_PER_UNIT.powi(3)
}

/// Circular heliocentric orbit starting on +x, moving toward +z.
pub fn circular_orbit(distance_au: f64) -> BodyState {
    let r = distance_au * AU_SCALE;
    let v = (mu_sun() / r).sqrt();
    BodyState::new(DVec3::new(r, 0.0, 0.0), DVec3::new(0.0, 0.0, v), 1.0)
}

/// Specific orbital energy in units²/day².
pub fn orbital_energy(state: &BodyState) -> f64 {
    0.5 * state.vel.length_squared() - mu_sun() / state.pos.length()
}

/// Headless app running the full simulation.
pub fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, SimulationPlugin));
    app.finish();
    app.cleanup();
    app
}

/// Run `frames` updates.
pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

/// Overwrite an entity's kinematic state.
pub fn place_body(app: &mut App, entity: Entity, pos: DVec3, vel: DVec3) {
    let mut state = app
        .world_mut()
        .get_mut::<BodyState>(entity)
        .expect("entity has a BodyState");
    state.pos = pos;
    state.vel = vel;
}
