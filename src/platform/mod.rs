//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Keyboard input (key code → action)
//! - Seeds arriving as JS numbers
//! - Frame and 1 Hz scheduling (`web` on wasm32)

#[cfg(target_arch = "wasm32")]
pub mod web;

use std::cell::{Cell, RefCell};

use crate::settings::KeyBindings;
use crate::sim::{Action, InputState};

/// Apply a key press/release to `input`. Unbound codes are ignored.
/// Returns the action that changed, if any.
pub fn apply_key(
    input: &mut InputState,
    bindings: &KeyBindings,
    code: &str,
    pressed: bool,
) -> Option<Action> {
    let action = bindings.action_for(code)?;
    input.set(action, pressed);
    Some(action)
}

/// Largest integer a JS number represents exactly (2^53 - 1)
pub const MAX_JS_SEED: f64 = 9_007_199_254_740_991.0;

/// Path seed from a JS number. Anything but a whole number in
/// `0..=MAX_JS_SEED` is rejected rather than truncated.
pub fn seed_from_js(value: f64) -> Option<u64> {
    ((0.0..=MAX_JS_SEED).contains(&value) && value.fract() == 0.0).then_some(value as u64)
}

/// What `FrameSlot::release` handed back
#[derive(Debug)]
pub enum Released<T> {
    /// Not executing; drop it whenever
    Idle(T),
    /// Released from inside its own run; drop only after that run returns
    InFlight(T),
}

/// Holder for a self-rescheduling frame callback.
///
/// The callback calls out to host code, and that code may tear the loop down
/// while the callback is still on the stack.
pub struct FrameSlot<T> {
    callback: RefCell<Option<T>>,
    running: Cell<bool>,
}

impl<T> Default for FrameSlot<T> {
    fn default() -> Self {
        Self {
            callback: RefCell::new(None),
            running: Cell::new(false),
        }
    }
}

impl<T> FrameSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&self, callback: T) {
        *self.callback.borrow_mut() = Some(callback);
    }

    pub fn is_installed(&self) -> bool {
        self.callback.borrow().is_some()
    }

    /// Run one frame of the callback's body
    pub fn run<R>(&self, body: impl FnOnce() -> R) -> R {
        self.running.set(true);
        let out = body();
        self.running.set(false);
        out
    }

    /// Borrow the installed callback, e.g. to schedule it again
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.callback.borrow().as_ref().map(f)
    }

    /// Take the callback out of the slot
    pub fn release(&self) -> Option<Released<T>> {
        let callback = self.callback.borrow_mut().take()?;
        Some(if self.running.get() {
            Released::InFlight(callback)
        } else {
            Released::Idle(callback)
        })
    }
}
