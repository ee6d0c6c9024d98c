//! Data-driven game balance
//!
//! Every physics, path and camera parameter lives here so a level can be
//! re-tuned from JSON without touching the simulation. `Default` reproduces
//! the constants in [`crate::consts`].

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Per-tick kinematics and collision parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    pub gravity: f32,
    pub jump_force: f32,
    pub move_speed: f32,
    /// Horizontal velocity multiplier with no movement input
    pub damping: f32,
    pub collision_margin: f32,
    pub landing_band: f32,
    pub landing_offset: f32,
    pub death_y: f32,
    pub spawn: Vec3,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            move_speed: MOVE_SPEED,
            damping: DAMPING,
            collision_margin: COLLISION_MARGIN,
            landing_band: LANDING_BAND,
            landing_offset: LANDING_OFFSET,
            death_y: DEATH_Y,
            spawn: SPAWN,
        }
    }
}

/// Procedural path parameters
///
/// Delta ranges are half-open `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathTuning {
    pub platform_count: usize,
    pub dx: (f32, f32),
    pub dy: (f32, f32),
    pub dz: (f32, f32),
    pub spawn_half_extent: f32,
    pub path_half_extent: f32,
    pub thickness: f32,
}

impl Default for PathTuning {
    fn default() -> Self {
        Self {
            platform_count: PLATFORM_COUNT,
            dx: (-3.0, 3.0),
            dy: (-0.2, 1.8),
            dz: (-8.0, -4.0),
            spawn_half_extent: SPAWN_HALF_EXTENT,
            path_half_extent: PATH_HALF_EXTENT,
            thickness: PLATFORM_THICKNESS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    pub offset: Vec3,
    pub smoothing: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            offset: CAMERA_OFFSET,
            smoothing: CAMERA_SMOOTHING,
        }
    }
}

/// Complete tuning set for a session
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub physics: PhysicsTuning,
    pub path: PathTuning,
    pub camera: CameraTuning,
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning document and validate it.
    /// Missing fields fall back to the defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let p = &self.physics;
        if !(p.move_speed > 0.0) {
            return Err(TuningError::Invalid(format!("move_speed {} must be > 0", p.move_speed)));
        }
        if !(p.jump_force > 0.0) {
            return Err(TuningError::Invalid(format!("jump_force {} must be > 0", p.jump_force)));
        }
        if !(0.0..1.0).contains(&p.damping) {
            return Err(TuningError::Invalid(format!("damping {} must be in [0, 1)", p.damping)));
        }
        if !(p.landing_band > 0.0) {
            return Err(TuningError::Invalid(format!(
                "landing_band {} must be > 0",
                p.landing_band
            )));
        }

        let path = &self.path;
        for (name, (lo, hi)) in [("dx", path.dx), ("dy", path.dy), ("dz", path.dz)] {
            if !(lo < hi) {
                return Err(TuningError::Invalid(format!("{name} range [{lo}, {hi}) is empty")));
            }
        }
        if !(path.thickness > 0.0) {
            return Err(TuningError::Invalid(format!(
                "platform thickness {} must be > 0",
                path.thickness
            )));
        }

        if !(0.0..=1.0).contains(&self.camera.smoothing) {
            return Err(TuningError::Invalid(format!(
                "camera smoothing {} must be in [0, 1]",
                self.camera.smoothing
            )));
        }
        Ok(())
    }
}
