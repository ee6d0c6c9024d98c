//! Player settings and preferences
//!
//! Persisted in LocalStorage on the web.

use serde::{Deserialize, Serialize};

use crate::sim::Action;

/// Key codes (`KeyboardEvent.code`) bound to each action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub forward: Vec<String>,
    pub backward: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub jump: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: vec!["KeyW".into()],
            backward: vec!["KeyS".into()],
            left: vec!["KeyA".into()],
            right: vec!["KeyD".into()],
            jump: vec!["Space".into()],
        }
    }
}

impl KeyBindings {
    pub fn codes(&self, action: Action) -> &[String] {
        match action {
            Action::Forward => &self.forward,
            Action::Backward => &self.backward,
            Action::Left => &self.left,
            Action::Right => &self.right,
            Action::Jump => &self.jump,
        }
    }

    fn codes_mut(&mut self, action: Action) -> &mut Vec<String> {
        match action {
            Action::Forward => &mut self.forward,
            Action::Backward => &mut self.backward,
            Action::Left => &mut self.left,
            Action::Right => &mut self.right,
            Action::Jump => &mut self.jump,
        }
    }

    /// Action bound to `code`, if any. First match in `Action::ALL` order.
    pub fn action_for(&self, code: &str) -> Option<Action> {
        Action::ALL
            .into_iter()
            .find(|&a| self.codes(a).iter().any(|c| c == code))
    }

    /// Bind `code` to `action`, removing it from any other action
    pub fn rebind(&mut self, action: Action, code: &str) {
        for a in Action::ALL {
            self.codes_mut(a).retain(|c| c != code);
        }
        self.codes_mut(action).push(code.to_string());
    }

    /// Add arrow keys alongside the letter keys
    pub fn with_arrows(mut self) -> Self {
        self.forward.push("ArrowUp".into());
        self.backward.push("ArrowDown".into());
        self.left.push("ArrowLeft".into());
        self.right.push("ArrowRight".into());
        self
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bindings: KeyBindings,
    /// Also accept the arrow keys for movement
    pub arrow_keys: bool,

    // === HUD ===
    /// Show the elapsed-time panel
    pub show_timer: bool,
    /// Show the movement/jump key hints
    pub show_controls: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bindings: KeyBindings::default(),
            arrow_keys: false,
            show_timer: true,
            show_controls: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "parkour_run_settings";

    /// Bindings a level should listen to
    pub fn active_bindings(&self) -> KeyBindings {
        if self.arrow_keys {
            self.bindings.clone().with_arrows()
        } else {
            self.bindings.clone()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring corrupt settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let b = KeyBindings::default();
        assert_eq!(b.action_for("KeyW"), Some(Action::Forward));
        assert_eq!(b.action_for("KeyS"), Some(Action::Backward));
        assert_eq!(b.action_for("KeyA"), Some(Action::Left));
        assert_eq!(b.action_for("KeyD"), Some(Action::Right));
        assert_eq!(b.action_for("Space"), Some(Action::Jump));
        assert_eq!(b.action_for("KeyQ"), None);
        assert_eq!(b.action_for("ArrowUp"), None);
    }

    #[test]
    fn test_arrow_keys_setting() {
        let mut s = Settings::default();
        assert_eq!(s.active_bindings(), s.bindings);
        assert_eq!(s.active_bindings().action_for("ArrowLeft"), None);

        s.arrow_keys = true;
        let active = s.active_bindings();
        assert_eq!(active.action_for("ArrowUp"), Some(Action::Forward));
        assert_eq!(active.action_for("ArrowDown"), Some(Action::Backward));
        assert_eq!(active.action_for("ArrowLeft"), Some(Action::Left));
        assert_eq!(active.action_for("ArrowRight"), Some(Action::Right));
        assert_eq!(active.action_for("KeyW"), Some(Action::Forward));
        // Stored bindings stay as the player set them.
        assert_eq!(s.bindings, KeyBindings::default());

        let json = s.to_json().unwrap();
        assert!(Settings::from_json(&json).unwrap().arrow_keys);
    }

    #[test]
    fn test_rebind_moves_code() {
        let mut b = KeyBindings::default();
        b.rebind(Action::Jump, "KeyW");
        assert_eq!(b.action_for("KeyW"), Some(Action::Jump));
        assert!(b.forward.is_empty());
        assert_eq!(b.action_for("Space"), Some(Action::Jump));
    }

    #[test]
    fn test_settings_json() {
        let s = Settings::default();
        let json = s.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), s);

        let partial = Settings::from_json(r#"{ "show_timer": false }"#).unwrap();
        assert!(!partial.show_timer);
        assert_eq!(partial.bindings, KeyBindings::default());
    }
}
