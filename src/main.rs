//! neo-sim - headless run of the orbital mechanics core.
//!
//! Loads the built-in catalog, tracks one asteroid (first argument, default
//! Vesta) and runs a fixed number of frames with time warp applied.

use bevy::log::LogPlugin;
use bevy::prelude::*;

use neo_sim::asteroid::{AsteroidRecord, builtin_catalog, spawn_catalog};
use neo_sim::collision::ImpactState;
use neo_sim::outcome::{OrbitalDynamics, osculating_orbit};
use neo_sim::selection::{SelectionError, select_asteroid};
use neo_sim::simulation::SimulationPlugin;
use neo_sim::time::{format_sim_time, set_time_warp};
use neo_sim::types::{BodyState, SimulationClock};

/// Frames to run.
const FRAMES: u32 = 5_000;

/// Time warp slider position (one year per second).
const TIME_WARP: u32 = 50;

fn main() -> Result<(), SelectionError> {
    let target = std::env::args().nth(1).unwrap_or_else(|| "4".to_string());

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default(), SimulationPlugin));
    app.finish();
    app.cleanup();

    let spawned = spawn_catalog(app.world_mut(), &builtin_catalog());
    info!("Loaded {} asteroids", spawned.len());

    let entity = select_asteroid(app.world_mut(), &target)?;
    set_time_warp(&mut app.world_mut().resource_mut::<SimulationClock>(), TIME_WARP);

    for _ in 0..FRAMES {
        app.update();
    }

    let world = app.world_mut();
    let sim_day = world.resource::<SimulationClock>().sim_day;
    info!("Simulated {}", format_sim_time(sim_day));

    if let Some(record) = world.get::<AsteroidRecord>(entity) {
        let elements = &record.elements;
        let canonical = OrbitalDynamics::compute(elements.semi_major_axis, elements.eccentricity);
        info!(
            "{}: perihelion speed {:.2} km/s, period {:.2} y, energy {:.4} GJ/kg",
            record.name,
            canonical.perihelion_speed_km_s,
            canonical.period_years,
            canonical.energy_gj_per_kg()
        );
    }
    if let Some(state) = world.get::<BodyState>(entity) {
        let pos = state.pos_au();
        info!(
            "Position ({:.3}, {:.3}, {:.3}) AU, speed {:.2} km/s",
            pos.x,
            pos.y,
            pos.z,
            state.speed_m_s() / 1000.0
        );
        if let Some(orbit) = osculating_orbit(state) {
            info!(
                "Osculating orbit: a = {:.4} AU, e = {:.4}",
                orbit.semi_major_axis_au, orbit.eccentricity
            );
            let message = orbit.classification().message();
            if !message.is_empty() {
                warn!("{}", message);
            }
        }
    }

    match &world.resource::<ImpactState>().last_impact {
        Some(impact) => info!(
            "{} struck Earth after {} at {:.2}°, {:.2}°",
            impact.asteroid_name,
            format_sim_time(impact.sim_day),
            impact.latitude_deg,
            impact.longitude_deg
        ),
        None => info!("No Earth impact"),
    }
    Ok(())
}
