//! Simulation state and core types
//!
//! Platforms are immutable once generated. The player is the only entity
//! mutated per tick.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::level::Rgb;

/// An axis-aligned platform box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Box centre
    pub center: Vec3,
    pub half_width: f32,
    pub half_depth: f32,
    pub thickness: f32,
    pub color: Rgb,
}

impl Platform {
    /// Full footprint width (x)
    pub fn width(&self) -> f32 {
        self.half_width * 2.0
    }

    /// Full footprint depth (z)
    pub fn depth(&self) -> f32 {
        self.half_depth * 2.0
    }

    /// Whether `pos` lies over the footprint grown by `margin` on every side
    pub fn footprint_contains(&self, pos: Vec3, margin: f32) -> bool {
        (pos.x - self.center.x).abs() < self.half_width + margin
            && (pos.z - self.center.z).abs() < self.half_depth + margin
    }
}

/// Player kinematic state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Grounded flag; set only by landing on a platform
    pub can_jump: bool,
}

impl PlayerState {
    pub fn new(spawn: Vec3) -> Self {
        Self {
            pos: spawn,
            vel: Vec3::ZERO,
            can_jump: false,
        }
    }

    /// Teleport back to spawn with zero velocity
    pub fn respawn(&mut self, spawn: Vec3) {
        self.pos = spawn;
        self.vel = Vec3::ZERO;
    }
}

/// Logical input actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Forward,
        Action::Backward,
        Action::Left,
        Action::Right,
        Action::Jump,
    ];
}

/// Held state of every action for a single tick
///
/// Unset flags read as "not pressed".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl InputState {
    pub fn set(&mut self, action: Action, pressed: bool) {
        match action {
            Action::Forward => self.forward = pressed,
            Action::Backward => self.backward = pressed,
            Action::Left => self.left = pressed,
            Action::Right => self.right = pressed,
            Action::Jump => self.jump = pressed,
        }
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        match action {
            Action::Forward => self.forward,
            Action::Backward => self.backward,
            Action::Left => self.left,
            Action::Right => self.right,
            Action::Jump => self.jump,
        }
    }

    /// Release everything (focus loss, session exit)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Camera pose derived from the player each tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraState {
    pub pos: Vec3,
    pub look_at: Vec3,
}

/// Score and time shown on the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionStats {
    /// Meters along the traversal axis
    pub score: u32,
    pub elapsed_secs: u32,
}

impl SessionStats {
    /// Elapsed time as `m:ss`
    pub fn clock_label(&self) -> String {
        format!("{}:{:02}", self.elapsed_secs / 60, self.elapsed_secs % 60)
    }
}

/// RNG seed wrapper so a level can be regenerated from its seed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform(center: Vec3, half: f32) -> Platform {
        Platform {
            center,
            half_width: half,
            half_depth: half,
            thickness: 0.5,
            color: Rgb::NEUTRAL,
        }
    }

    #[test]
    fn test_platform_geometry() {
        let p = platform(Vec3::new(1.0, 2.0, -3.0), 1.25);
        assert_eq!(p.width(), 2.5);
        assert_eq!(p.depth(), 2.5);
    }

    #[test]
    fn test_footprint_margin() {
        let p = platform(Vec3::ZERO, 1.25);
        assert!(p.footprint_contains(Vec3::new(1.7, 0.0, 0.0), 0.5));
        assert!(!p.footprint_contains(Vec3::new(1.75, 0.0, 0.0), 0.5));
        assert!(!p.footprint_contains(Vec3::new(1.5, 0.0, 0.0), 0.0));
        assert!(p.footprint_contains(Vec3::new(-1.6, 10.0, 1.6), 0.5));
    }

    #[test]
    fn test_input_set_and_clear() {
        let mut input = InputState::default();
        for action in Action::ALL {
            assert!(!input.is_pressed(action));
            input.set(action, true);
            assert!(input.is_pressed(action));
        }
        input.clear();
        assert_eq!(input, InputState::default());
    }

    #[test]
    fn test_clock_label() {
        let stats = SessionStats {
            score: 0,
            elapsed_secs: 125,
        };
        assert_eq!(stats.clock_label(), "2:05");
        assert_eq!(SessionStats::default().clock_label(), "0:00");
    }

    #[test]
    fn test_respawn_resets_kinematics() {
        let mut player = PlayerState::new(Vec3::new(0.0, 2.0, 0.0));
        player.pos = Vec3::new(3.0, -25.0, -40.0);
        player.vel = Vec3::new(0.1, -0.5, -0.12);
        player.respawn(Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(player.pos, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(player.vel, Vec3::ZERO);
    }
}
