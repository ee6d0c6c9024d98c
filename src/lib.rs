//! Parkour Run - a browser parkour runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (path generation, physics, collisions, camera)
//! - `session`: Level session lifecycle, scoring and the 1 Hz bookkeeping cadence
//! - `level`: Level descriptors and the built-in catalog
//! - `tuning`: Data-driven physics/path/camera parameters
//! - `settings`: Player preferences (key bindings)
//! - `platform`: Browser/native host glue

pub mod level;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use level::{Difficulty, Level, LevelError, Rgb};
pub use session::{Session, SessionConfig, SessionError};
pub use settings::{KeyBindings, Settings};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// All physics values are per tick; one tick is one display frame.
pub mod consts {
    use glam::Vec3;

    /// Nominal ticks per second (one tick per display refresh)
    pub const TICK_RATE: u32 = 60;

    /// Downward acceleration added to vertical velocity every tick
    pub const GRAVITY: f32 = -0.015;
    /// Vertical velocity set by a jump
    pub const JUMP_FORCE: f32 = 0.35;
    /// Horizontal velocity while a movement key is held
    pub const MOVE_SPEED: f32 = 0.12;
    /// Horizontal velocity multiplier when no movement key is held
    pub const DAMPING: f32 = 0.8;

    /// Extra horizontal slack around a platform footprint (half the avatar width)
    pub const COLLISION_MARGIN: f32 = 0.5;
    /// Player must be within (0, LANDING_BAND) above a platform centre to land
    pub const LANDING_BAND: f32 = 1.0;
    /// Resting height above a platform centre (half thickness + half avatar)
    pub const LANDING_OFFSET: f32 = 0.75;
    /// Falling below this height respawns the player
    pub const DEATH_Y: f32 = -20.0;
    /// Spawn position (above the spawn platform)
    pub const SPAWN: Vec3 = Vec3::new(0.0, 2.0, 0.0);

    /// Path platforms generated per level
    pub const PLATFORM_COUNT: usize = 40;
    /// Spawn platform half-extent (5 x 5 footprint)
    pub const SPAWN_HALF_EXTENT: f32 = 2.5;
    /// Path platform half-extent (2.5 x 2.5 footprint)
    pub const PATH_HALF_EXTENT: f32 = 1.25;
    /// Thickness shared by every platform
    pub const PLATFORM_THICKNESS: f32 = 0.5;

    /// Camera offset from the player
    pub const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 6.0, 12.0);
    /// Fraction of the remaining distance the camera covers each tick
    pub const CAMERA_SMOOTHING: f32 = 0.1;

    /// World units per scored meter
    pub const UNITS_PER_METER: f32 = 2.0;
}
