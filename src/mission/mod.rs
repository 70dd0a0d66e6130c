//! Deflection missions against the tracked asteroid.
//!
//! A mission is a short real-time sequence that runs while the simulation
//! clock is paused. Progress is driven by wall-clock frame time, and the
//! clock resumes when the mission completes.
//!
//! # Missions
//!
//! - **Kinetic impactor**: spacecraft approaches, then transfers its momentum
//!   at 85% progress (see [`payload::KineticImpactorConfig`]).
//! - **Surface alteration**: reflective coating leaves the asteroid
//!   [`SurfaceAltered`], which adds a Yarkovsky push in N-body mode.
//! - **Crash course**: the asteroid is eased onto Earth's surface and an
//!   impact is recorded.
//!
//! Only one mission runs at a time.

pub mod payload;

use bevy::math::DVec3;
use bevy::prelude::*;

pub use payload::{DeflectionReport, KineticImpactorConfig, ease_in_out_quad};

use crate::asteroid::{Asteroid, AsteroidId, AsteroidRecord, Impacted, SurfaceAltered};
use crate::collision::{ImpactConfig, ImpactEvent, ImpactState, impact_point};
use crate::ephemeris::Ephemeris;
use crate::selection::TrackedAsteroid;
use crate::types::{BodyState, SimulationClock, SimulationSet};

/// Progress at which the kinetic impactor reaches the asteroid.
pub const KINETIC_IMPACT_PROGRESS: f64 = 0.85;

/// Surface alteration: end of the positioning phase.
pub const COATING_START_PROGRESS: f64 = 0.3;

/// Surface alteration: end of the coating phase.
pub const RETREAT_START_PROGRESS: f64 = 0.9;

/// Kind of deflection mission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MissionKind {
    KineticImpactor,
    SurfaceAlteration,
    CrashCourse,
}

impl MissionKind {
    pub const ALL: [MissionKind; 3] = [
        MissionKind::KineticImpactor,
        MissionKind::SurfaceAlteration,
        MissionKind::CrashCourse,
    ];

    /// Real-time length in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        match self {
            MissionKind::KineticImpactor => 3000.0,
            MissionKind::SurfaceAlteration => 4000.0,
            MissionKind::CrashCourse => 2500.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MissionKind::KineticImpactor => "Kinetic Impactor",
            MissionKind::SurfaceAlteration => "Surface Alteration",
            MissionKind::CrashCourse => "Crash Course",
        }
    }

    fn initial_phase(&self) -> MissionPhase {
        match self {
            MissionKind::KineticImpactor => MissionPhase::Approach,
            MissionKind::SurfaceAlteration => MissionPhase::Positioning,
            MissionKind::CrashCourse => MissionPhase::Descent,
        }
    }
}

/// Where a mission is in its sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissionPhase {
    /// Impactor closing on the asteroid
    Approach,
    /// Momentum delivered, spacecraft gone
    Impact,
    /// Coating spacecraft moving into place
    Positioning,
    Coating,
    Retreat,
    /// Asteroid falling toward Earth
    Descent,
    Complete,
}

/// State change requested by [`MissionTask::advance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MissionEffect {
    /// Apply the kinetic impactor's delta-v.
    KineticImpact,
    /// Flag the asteroid as surface-altered.
    SurfaceAltered,
    /// Move the asteroid along the crash path (eased fraction).
    CrashPosition { eased: f64 },
    /// Record the Earth impact.
    CrashImpact,
    Completed,
}

/// One running mission.
#[derive(Clone, Debug, PartialEq)]
pub struct MissionTask {
    pub kind: MissionKind,
    pub target: Entity,
    pub target_id: String,
    /// Start and end of the crash trajectory
    pub crash_path: Option<(DVec3, DVec3)>,
    elapsed_ms: f64,
    phase: MissionPhase,
    impact_delivered: bool,
}

impl MissionTask {
    pub fn new(kind: MissionKind, target: Entity, target_id: impl Into<String>) -> Self {
        Self {
            kind,
            target,
            target_id: target_id.into(),
            crash_path: None,
            elapsed_ms: 0.0,
            phase: kind.initial_phase(),
            impact_delivered: false,
        }
    }

    pub fn phase(&self) -> MissionPhase {
        self.phase
    }

    /// Fraction of the mission elapsed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        (self.elapsed_ms / self.kind.duration_ms()).min(1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.phase == MissionPhase::Complete
    }

    /// Advance by `dt_ms` of real time and return the effects to apply.
    ///
    /// One-shot effects fire exactly once however the time is sliced.
    /// A completed task returns nothing.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<MissionEffect> {
        if self.is_complete() {
            return Vec::new();
        }
        self.elapsed_ms += dt_ms.max(0.0);
        let progress = self.progress();
        let mut effects = Vec::new();

        match self.kind {
            MissionKind::KineticImpactor => {
                if progress >= KINETIC_IMPACT_PROGRESS {
                    if !self.impact_delivered {
                        self.impact_delivered = true;
                        effects.push(MissionEffect::KineticImpact);
                    }
                    self.phase = MissionPhase::Impact;
                }
            }
            MissionKind::SurfaceAlteration => {
                self.phase = if progress < COATING_START_PROGRESS {
                    MissionPhase::Positioning
                } else if progress < RETREAT_START_PROGRESS {
                    MissionPhase::Coating
                } else {
                    MissionPhase::Retreat
                };
            }
            MissionKind::CrashCourse => {
                effects.push(MissionEffect::CrashPosition {
                    eased: ease_in_out_quad(progress),
                });
            }
        }

        if progress >= 1.0 {
            match self.kind {
                MissionKind::SurfaceAlteration => effects.push(MissionEffect::SurfaceAltered),
                MissionKind::CrashCourse => effects.push(MissionEffect::CrashImpact),
                MissionKind::KineticImpactor => {}
            }
            self.phase = MissionPhase::Complete;
            effects.push(MissionEffect::Completed);
        }
        effects
    }
}

/// The running mission, if any.
#[derive(Resource, Default, Debug)]
pub struct ActiveMission {
    task: Option<MissionTask>,
    /// Result of the most recent kinetic impact
    pub last_report: Option<DeflectionReport>,
    /// Missions run to completion
    pub completed: u32,
}

impl ActiveMission {
    pub fn task(&self) -> Option<&MissionTask> {
        self.task.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.task.is_some()
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MissionError {
    #[error("no asteroid is being tracked")]
    NoTrackedAsteroid,
    #[error("a {0} mission is already in progress")]
    AlreadyActive(&'static str),
    #[error("asteroid {0} has already impacted")]
    AlreadyImpacted(String),
}

/// Start a mission against the tracked asteroid and pause the clock.
pub fn launch_mission(world: &mut World, kind: MissionKind) -> Result<Entity, MissionError> {
    let target = world
        .resource::<TrackedAsteroid>()
        .get()
        .cloned()
        .ok_or(MissionError::NoTrackedAsteroid)?;

    if let Some(task) = world.resource::<ActiveMission>().task() {
        return Err(MissionError::AlreadyActive(task.kind.name()));
    }
    if world.get::<Impacted>(target.entity).is_some() {
        return Err(MissionError::AlreadyImpacted(target.id));
    }
    let state = world
        .get::<BodyState>(target.entity)
        .cloned()
        .ok_or(MissionError::NoTrackedAsteroid)?;

    let mut task = MissionTask::new(kind, target.entity, target.id.clone());
    if kind == MissionKind::CrashCourse {
        let sim_day = world.resource::<SimulationClock>().sim_day;
        let ephemeris = world.resource::<Ephemeris>();
        let earth_pos = ephemeris.earth_position(sim_day);
        let earth_vel = ephemeris.earth_velocity(sim_day);
        let earth_radius = world.resource::<ImpactConfig>().earth_radius;
        let end = impact_point(earth_pos, state.pos, state.vel - earth_vel, earth_radius);
        task.crash_path = Some((state.pos, end));
    }

    world.resource_mut::<SimulationClock>().paused = true;
    world.resource_mut::<ActiveMission>().task = Some(task);
    info!("Launched {} mission against {}", kind.name(), target.id);
    Ok(target.entity)
}

/// Plugin running deflection missions.
pub struct MissionPlugin;

impl Plugin for MissionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveMission>()
            .init_resource::<KineticImpactorConfig>()
            .add_systems(Update, run_active_mission.in_set(SimulationSet::Missions));
    }
}

/// Advance the running mission by this frame's real time.
pub fn run_active_mission(
    mut commands: Commands,
    time: Res<Time>,
    impactor: Res<KineticImpactorConfig>,
    impact_config: Res<ImpactConfig>,
    ephemeris: Res<Ephemeris>,
    mut mission: ResMut<ActiveMission>,
    mut clock: ResMut<SimulationClock>,
    mut impacts: ResMut<ImpactState>,
    mut impact_events: MessageWriter<ImpactEvent>,
    mut asteroids: Query<(&AsteroidId, &AsteroidRecord, &mut BodyState), With<Asteroid>>,
) {
    let Some(target) = mission.task().map(|task| task.target) else {
        return;
    };
    let Ok((id, record, mut state)) = asteroids.get_mut(target) else {
        warn!("Mission target is gone, aborting");
        mission.task = None;
        clock.paused = false;
        return;
    };

    let mission = &mut *mission;
    let Some(task) = mission.task.as_mut() else {
        return;
    };
    let mut finished = false;
    let phase = task.phase();
    let effects = task.advance(time.delta_secs_f64() * 1000.0);
    if task.phase() != phase {
        debug!("{} mission: {:?} -> {:?}", task.kind.name(), phase, task.phase());
    }

    for effect in effects {
        match effect {
            MissionEffect::KineticImpact => {
                let (impulse, report) = impactor.deflect(state.mass, state.vel);
                state.vel += impulse;
                info!(
                    "Kinetic impactor hit {}: {:.2} kN·s, Δv {:.3} mm/s, ~{:.1} km shift in 30 days",
                    task.target_id,
                    report.momentum_kns(),
                    report.delta_v_mm_s(),
                    report.displacement_km
                );
                mission.last_report = Some(report);
            }
            MissionEffect::SurfaceAltered => {
                commands.entity(target).insert(SurfaceAltered);
                info!("Surface of {} altered, Yarkovsky drift active", task.target_id);
            }
            MissionEffect::CrashPosition { eased } => {
                if let Some((start, end)) = task.crash_path {
                    state.pos = start.lerp(end, eased);
                }
            }
            MissionEffect::CrashImpact => {
                let event = ImpactEvent::compute(
                    id,
                    record,
                    &state,
                    ephemeris.earth_position(clock.sim_day),
                    ephemeris.earth_velocity(clock.sim_day),
                    clock.sim_day,
                    &impact_config,
                );
                impact_events.write(event.clone());
                impacts.trigger(event);
                commands.entity(target).insert(Impacted);
            }
            MissionEffect::Completed => finished = true,
        }
    }

    if finished {
        info!("{} mission complete", task.kind.name());
        mission.task = None;
        mission.completed += 1;
        clock.paused = false;
    }
}
