//! neo-sim - Near-Earth Object Simulator
//!
//! Orbital mechanics core for an asteroid and solar-system visualization:
//! Keplerian and N-body propagation, Earth impact detection, orbit editing
//! and deflection missions, packaged as Bevy plugins.

pub mod asteroid;
pub mod collision;
pub mod ephemeris;
pub mod mission;
pub mod outcome;
pub mod overrides;
pub mod physics;
pub mod render;
pub mod selection;
pub mod simulation;
pub mod time;
pub mod types;

#[cfg(test)]
pub mod test_utils;
