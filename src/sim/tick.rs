//! Fixed timestep simulation tick
//!
//! One call advances the player by exactly one step. All quantities are per
//! tick, so there is no `dt`: hosts call this once per display frame.

use super::collision::{Landing, resolve_landing};
use super::state::{InputState, Platform, PlayerState};
use crate::tuning::PhysicsTuning;

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickOutcome {
    /// A jump impulse was applied this tick
    pub jumped: bool,
    /// Platform the player is resting on after collision
    pub landing: Option<Landing>,
    /// Player fell out of the world and was sent back to spawn
    pub respawned: bool,
}

impl TickOutcome {
    pub fn grounded(&self) -> bool {
        self.landing.is_some()
    }
}

/// Set velocity on one horizontal axis from a pair of opposing keys.
///
/// Holding both keys resolves to the positive direction (backward/right).
#[inline]
fn steer(vel: &mut f32, negative: bool, positive: bool, physics: &PhysicsTuning) {
    if positive {
        *vel = physics.move_speed;
    } else if negative {
        *vel = -physics.move_speed;
    } else {
        *vel *= physics.damping;
    }
}

/// Advance the player by one fixed step
pub fn tick(
    player: &mut PlayerState,
    input: &InputState,
    platforms: &[Platform],
    physics: &PhysicsTuning,
) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    // Forward is -z
    steer(&mut player.vel.z, input.forward, input.backward, physics);
    steer(&mut player.vel.x, input.left, input.right, physics);

    // Jump is re-armed only by a landing
    if input.jump && player.can_jump {
        player.vel.y = physics.jump_force;
        player.can_jump = false;
        outcome.jumped = true;
    }

    // Gravity applies even when grounded; collision re-asserts the rest height
    player.vel.y += physics.gravity;
    player.pos += player.vel;

    outcome.landing = resolve_landing(player, platforms, physics);

    if player.pos.y < physics.death_y {
        log::debug!(
            "Player fell at ({:.1}, {:.1}, {:.1}); respawning",
            player.pos.x,
            player.pos.y,
            player.pos.z
        );
        player.respawn(physics.spawn);
        outcome.respawned = true;
    }

    outcome
}
