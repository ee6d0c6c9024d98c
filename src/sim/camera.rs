//! Trailing follow camera
//!
//! The camera eases toward a fixed offset behind and above the player and
//! always looks straight at the player.

use glam::Vec3;

use super::state::CameraState;
use crate::tuning::CameraTuning;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTracker {
    state: CameraState,
    offset: Vec3,
    smoothing: f32,
}

impl CameraTracker {
    pub fn new(initial: Vec3, tuning: &CameraTuning) -> Self {
        Self {
            state: CameraState {
                pos: initial,
                look_at: Vec3::ZERO,
            },
            offset: tuning.offset,
            smoothing: tuning.smoothing,
        }
    }

    /// Position the camera is easing toward
    pub fn target_for(&self, player_pos: Vec3) -> Vec3 {
        player_pos + self.offset
    }

    /// Move a fraction of the remaining distance toward the target
    pub fn tick(&mut self, player_pos: Vec3) -> CameraState {
        let target = self.target_for(player_pos);
        self.state.pos = self.state.pos.lerp(target, self.smoothing);
        self.state.look_at = player_pos;
        self.state
    }

    pub fn state(&self) -> CameraState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_at_is_unsmoothed() {
        let mut cam = CameraTracker::new(Vec3::ZERO, &CameraTuning::default());
        let player = Vec3::new(3.0, 1.0, -20.0);
        let state = cam.tick(player);
        assert_eq!(state.look_at, player);
    }

    #[test]
    fn test_moves_ten_percent() {
        let mut cam = CameraTracker::new(Vec3::ZERO, &CameraTuning::default());
        let state = cam.tick(Vec3::ZERO);
        // Target is (0, 6, 12); first step covers 10%.
        assert!((state.pos - Vec3::new(0.0, 0.6, 1.2)).length() < 1e-6);
        let state = cam.tick(Vec3::ZERO);
        assert!((state.pos - Vec3::new(0.0, 1.14, 2.28)).length() < 1e-5);
    }

    #[test]
    fn test_converges_without_snapping() {
        let mut cam = CameraTracker::new(Vec3::ZERO, &CameraTuning::default());
        let player = Vec3::new(0.0, 2.0, -10.0);
        let target = cam.target_for(player);
        let mut last = f32::MAX;
        for _ in 0..100 {
            let d = (cam.tick(player).pos - target).length();
            assert!(d < last);
            last = d;
        }
        assert!(last < 1e-3);
        assert_eq!(cam.state().look_at, player);
    }

    #[test]
    fn test_no_smoothing_freezes_camera() {
        let tuning = CameraTuning {
            smoothing: 0.0,
            ..Default::default()
        };
        let mut cam = CameraTracker::new(Vec3::new(1.0, 2.0, 3.0), &tuning);
        assert_eq!(cam.tick(Vec3::new(0.0, 0.0, -50.0)).pos, Vec3::new(1.0, 2.0, 3.0));
    }
}
