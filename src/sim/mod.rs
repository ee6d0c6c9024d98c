//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per frame, all constants per tick)
//! - Seeded or injected RNG only
//! - Stable iteration order (platform generation order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod path;
pub mod state;
pub mod tick;

pub use camera::CameraTracker;
pub use collision::{Landing, landing_height, resolve_landing};
pub use path::{GenerateError, generate, generate_seeded};
pub use state::{
    Action, CameraState, InputState, Platform, PlayerState, RngState, SessionStats,
};
pub use tick::{TickOutcome, tick};
