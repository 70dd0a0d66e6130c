//! Time advancement system for the orbital mechanics simulator.
//!
//! The clock moves one fixed step per frame: `base_step * speed_multiplier`
//! days, independent of real frame time. The time-warp slider maps onto the
//! speed multiplier piecewise: linear up to 10 days/s, linear up to a year/s,
//! then whole years per second.

use bevy::prelude::*;

use crate::types::{DAYS_PER_YEAR, SimulationClock, SimulationSet};

/// Highest slider position.
pub const MAX_TIME_WARP_SLIDER: u32 = 100;

/// Plugin providing time advancement functionality.
pub struct TimePlugin;

impl Plugin for TimePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationClock>()
            .add_systems(Update, advance_clock.in_set(SimulationSet::Clock));
    }
}

/// Advance the simulation clock by one tick unless paused.
fn advance_clock(mut clock: ResMut<SimulationClock>) {
    clock.tick();
}

/// Speed multiplier for a slider position in `0..=100`.
///
/// Positions above 100 are clamped.
pub fn speed_from_slider(slider: u32) -> f64 {
    let s = f64::from(slider.min(MAX_TIME_WARP_SLIDER));
    if s <= 10.0 {
        1.0 + s * 0.9
    } else if s <= 50.0 {
        let factor = (s - 10.0) / 40.0;
        10.0 + factor * (365.0 - 10.0)
    } else {
        let years = 1.0 + (s - 50.0) / 10.0;
        years * DAYS_PER_YEAR
    }
}

/// Human-readable rate for a slider position.
pub fn speed_label(slider: u32) -> String {
    let s = slider.min(MAX_TIME_WARP_SLIDER);
    let speed = speed_from_slider(s);
    if s <= 10 {
        format!("{:.1} Day/s", speed)
    } else if s <= 50 {
        format!("{} Days/s", speed.round())
    } else {
        format!("{:.1} Year/s", speed / DAYS_PER_YEAR)
    }
}

/// Apply a slider position to the clock.
pub fn set_time_warp(clock: &mut SimulationClock, slider: u32) {
    clock.speed_multiplier = speed_from_slider(slider);
    debug!("Time warp set to {}", speed_label(slider));
}

/// Elapsed time as `"<days>d (<years>y)"`.
pub fn format_sim_time(sim_day: f64) -> String {
    format!("{}d ({:.2}y)", sim_day.floor(), sim_day / DAYS_PER_YEAR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_slider_segments() {
        assert_relative_eq!(speed_from_slider(0), 1.0);
        assert_relative_eq!(speed_from_slider(10), 10.0);
        assert_relative_eq!(speed_from_slider(30), 187.5);
        assert_relative_eq!(speed_from_slider(50), 365.0);
        assert_relative_eq!(speed_from_slider(60), 2.0 * 365.25);
        assert_relative_eq!(speed_from_slider(100), 6.0 * 365.25);
        assert_eq!(speed_from_slider(250), speed_from_slider(100));
    }

    #[test]
    fn test_slider_monotonic() {
        let speeds: Vec<f64> = (0..=MAX_TIME_WARP_SLIDER).map(speed_from_slider).collect();
        assert!(speeds.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_labels() {
        assert_eq!(speed_label(5), "5.5 Day/s");
        assert_eq!(speed_label(30), "188 Days/s");
        assert_eq!(speed_label(70), "3.0 Year/s");
    }

    #[test]
    fn test_set_time_warp() {
        let mut clock = SimulationClock::default();
        set_time_warp(&mut clock, 10);
        let dt = clock.tick().expect("clock advances");
        assert_relative_eq!(dt, clock.base_step * 10.0);
    }

    #[test]
    fn test_format_sim_time() {
        assert_eq!(format_sim_time(730.5), "730d (2.00y)");
    }
}
