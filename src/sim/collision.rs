//! Collision detection and response against platform boxes
//!
//! Only landings are resolved: the player snaps onto a platform when it is
//! over the (margin-grown) footprint, just above the platform centre and not
//! rising. There is no side or ceiling response.
//!
//! Every platform is checked every tick, so cost is O(platforms). That is fine
//! for a few dozen platforms; a much longer course would want a spatial index
//! keyed on z.

use glam::Vec3;

use super::state::{Platform, PlayerState};
use crate::tuning::PhysicsTuning;

/// Result of testing one platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    /// Index into the platform list
    pub index: usize,
    /// Height the player rests at
    pub rest_y: f32,
}

/// Check whether a player at `pos` moving vertically at `vel_y` lands on `platform`.
/// Returns the resting height if so.
pub fn landing_height(
    pos: Vec3,
    vel_y: f32,
    platform: &Platform,
    physics: &PhysicsTuning,
) -> Option<f32> {
    if !platform.footprint_contains(pos, physics.collision_margin) {
        return None;
    }
    let dy = pos.y - platform.center.y;
    if dy > 0.0 && dy < physics.landing_band && vel_y <= 0.0 {
        Some(platform.center.y + physics.landing_offset)
    } else {
        None
    }
}

/// Resolve landings for this tick.
///
/// Platforms are visited in generation order and every qualifying platform
/// re-snaps the player, so the last one in the list wins even if an earlier
/// one is nearer. Later platforms are tested against the already-snapped
/// position. Clears and re-asserts `can_jump`.
pub fn resolve_landing(
    player: &mut PlayerState,
    platforms: &[Platform],
    physics: &PhysicsTuning,
) -> Option<Landing> {
    player.can_jump = false;
    let mut landed = None;

    for (index, platform) in platforms.iter().enumerate() {
        if let Some(rest_y) = landing_height(player.pos, player.vel.y, platform, physics) {
            player.pos.y = rest_y;
            player.vel.y = 0.0;
            player.can_jump = true;
            landed = Some(Landing { index, rest_y });
        }
    }

    landed
}
