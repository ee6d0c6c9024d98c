//! Level session controller
//!
//! A `Session` owns everything for one attempt at a level: the generated
//! platforms, the player, the camera and the HUD counters. Hosts drive it
//! with two cadences:
//! - `tick` once per display frame (physics + camera)
//! - `second` once per wall-clock second (elapsed time + score)
//!
//! Hosts with a single callback can feed frame time to `advance_clock`
//! instead of running a separate 1 Hz timer.

use glam::Vec3;
use thiserror::Error;

use crate::consts::UNITS_PER_METER;
use crate::level::Level;
use crate::sim::{
    CameraState, CameraTracker, GenerateError, InputState, Platform, PlayerState, SessionStats,
    TickOutcome, generate_seeded, tick,
};
use crate::tuning::{Tuning, TuningError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Tuning(#[from] TuningError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// Options for starting a session
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Path seed; a fresh one is drawn when unset
    pub seed: Option<u64>,
    pub tuning: Tuning,
    /// Avatar image for the renderer; never read by the simulation
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionPhase {
    Running,
    Stopped,
}

/// Score for a player at depth `z`: whole meters along the traversal axis
pub fn distance_score(z: f32) -> u32 {
    (z.abs() / UNITS_PER_METER).floor() as u32
}

#[cfg(not(target_arch = "wasm32"))]
fn fresh_seed() -> u64 {
    rand::random()
}

#[cfg(target_arch = "wasm32")]
fn fresh_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

pub struct Session {
    level: Level,
    seed: u64,
    tuning: Tuning,
    platforms: Vec<Platform>,
    player: PlayerState,
    camera: CameraTracker,
    stats: SessionStats,
    phase: SessionPhase,
    /// Wall time not yet converted into whole seconds
    clock_accum: f64,
    ticks: u64,
    respawns: u32,
    avatar_url: Option<String>,
}

impl Session {
    /// Validate the tuning, generate the level and place the player at spawn
    pub fn start(level: &Level, config: SessionConfig) -> Result<Self, SessionError> {
        let tuning = config.tuning;
        tuning.validate()?;
        let seed = config.seed.unwrap_or_else(fresh_seed);
        let platforms = generate_seeded(level, &tuning.path, seed)?;

        log::info!("Session started: level '{}' seed {}", level.id, seed);

        Ok(Self {
            level: level.clone(),
            seed,
            tuning,
            platforms,
            player: PlayerState::new(tuning.physics.spawn),
            camera: CameraTracker::new(Vec3::ZERO, &tuning.camera),
            stats: SessionStats::default(),
            phase: SessionPhase::Running,
            clock_accum: 0.0,
            ticks: 0,
            respawns: 0,
            avatar_url: config.avatar_url,
        })
    }

    /// Advance physics and camera by one frame. Returns `None` once stopped.
    pub fn tick(&mut self, input: &InputState) -> Option<TickOutcome> {
        if self.phase != SessionPhase::Running {
            log::trace!("tick ignored: session stopped");
            return None;
        }

        let outcome = tick(&mut self.player, input, &self.platforms, &self.tuning.physics);
        self.camera.tick(self.player.pos);
        self.ticks += 1;
        if outcome.respawned {
            self.respawns += 1;
        }
        Some(outcome)
    }

    /// 1 Hz bookkeeping: count a second and refresh the score
    pub fn second(&mut self) {
        if self.phase != SessionPhase::Running {
            return;
        }
        self.stats.elapsed_secs += 1;
        self.stats.score = distance_score(self.player.pos.z);
        log::debug!(
            "t={}s score={}m z={:.1}",
            self.stats.elapsed_secs,
            self.stats.score,
            self.player.pos.z
        );
    }

    /// Accumulate wall time and run `second` for each whole second passed.
    /// Returns how many seconds fired.
    pub fn advance_clock(&mut self, dt_secs: f64) -> u32 {
        if self.phase != SessionPhase::Running || !(dt_secs > 0.0) {
            return 0;
        }
        self.clock_accum += dt_secs;
        let mut fired = 0;
        while self.clock_accum >= 1.0 {
            self.clock_accum -= 1.0;
            self.second();
            fired += 1;
        }
        fired
    }

    /// End the session. Further ticks and seconds are ignored.
    pub fn stop(&mut self) -> SessionStats {
        if self.phase == SessionPhase::Running {
            self.phase = SessionPhase::Stopped;
            log::info!(
                "Session stopped: level '{}' score {}m time {} ({} ticks, {} respawns)",
                self.level.id,
                self.stats.score,
                self.stats.clock_label(),
                self.ticks,
                self.respawns
            );
        }
        self.stats
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn camera(&self) -> CameraState {
        self.camera.state()
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn respawns(&self) -> u32 {
        self.respawns
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }
}
