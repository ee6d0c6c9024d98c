//! Browser host
//!
//! `WebGame` is the JS-facing handle. While a level is running it holds a
//! `HostLoop`, which owns the animation-frame callback, the 1 Hz interval and
//! the keyboard/focus listeners. Dropping the `HostLoop` unregisters all of
//! them, so nothing keeps firing after the player leaves the level.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{KeyboardEvent, Window};

use super::{FrameSlot, Released, apply_key, seed_from_js};
use crate::level;
use crate::session::{Session, SessionConfig};
use crate::settings::{KeyBindings, Settings};
use crate::sim::{Action, InputState};

/// Milliseconds between score/time updates
const BOOKKEEPING_INTERVAL_MS: i32 = 1000;

struct Shared {
    session: Session,
    input: InputState,
    render_hook: Option<js_sys::Function>,
}

type FrameCallback = Rc<FrameSlot<Closure<dyn FnMut()>>>;

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// One simulation frame. Returns the pose for the render hook.
fn step(shared: &Rc<RefCell<Shared>>) -> Option<(js_sys::Function, [f32; 9])> {
    let mut s = shared.borrow_mut();
    let input = s.input;
    s.session.tick(&input)?;

    let p = s.session.player().pos;
    let cam = s.session.camera();
    let pose = [
        p.x,
        p.y,
        p.z,
        cam.pos.x,
        cam.pos.y,
        cam.pos.z,
        cam.look_at.x,
        cam.look_at.y,
        cam.look_at.z,
    ];
    s.render_hook.clone().map(|hook| (hook, pose))
}

/// Every browser registration for one running session
struct HostLoop {
    window: Window,
    raf_id: Rc<Cell<Option<i32>>>,
    frame: FrameCallback,
    interval_id: Option<i32>,
    second: Closure<dyn FnMut()>,
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
    keyup: Closure<dyn FnMut(KeyboardEvent)>,
    blur: Closure<dyn FnMut(web_sys::Event)>,
}

impl HostLoop {
    fn install(
        window: Window,
        shared: &Rc<RefCell<Shared>>,
        bindings: &KeyBindings,
    ) -> Result<Self, JsValue> {
        // Animation frame loop: one tick per frame, re-requested from inside
        let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let frame: FrameCallback = Rc::new(FrameSlot::new());
        {
            let shared = shared.clone();
            let slot = frame.clone();
            let raf = raf_id.clone();
            let win = window.clone();
            frame.install(Closure::<dyn FnMut()>::new(move || {
                raf.set(None);
                // The hook runs after the borrow is released so it may read
                // back through WebGame, or exit/restart the level.
                slot.run(|| {
                    if let Some((hook, pose)) = step(&shared) {
                        let array = js_sys::Float32Array::from(&pose[..]);
                        if let Err(e) = hook.call1(&JsValue::NULL, &array) {
                            log::error!("render hook failed: {e:?}");
                        }
                    }
                });
                // Empty once the hook has released the loop
                match slot.with(|cb| win.request_animation_frame(cb.as_ref().unchecked_ref())) {
                    Some(Ok(id)) => raf.set(Some(id)),
                    Some(Err(e)) => log::error!("requestAnimationFrame failed: {e:?}"),
                    None => {}
                }
            }));
        }

        // 1 Hz bookkeeping
        let second = {
            let shared = shared.clone();
            Closure::<dyn FnMut()>::new(move || {
                shared.borrow_mut().session.second();
            })
        };

        let key_handler = |pressed: bool| {
            let shared = shared.clone();
            let bindings = bindings.clone();
            Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
                let mut s = shared.borrow_mut();
                if apply_key(&mut s.input, &bindings, &event.code(), pressed).is_some() {
                    event.prevent_default();
                }
            })
        };
        let keydown = key_handler(true);
        let keyup = key_handler(false);

        // Release held keys when focus leaves the page
        let blur = {
            let shared = shared.clone();
            Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                shared.borrow_mut().input.clear();
            })
        };

        // Registrations happen only once the guard exists, so an error
        // part-way through still unwinds everything already registered.
        let mut host = Self {
            window,
            raf_id,
            frame,
            interval_id: None,
            second,
            keydown,
            keyup,
            blur,
        };
        let first_frame = host
            .frame
            .with(|cb| host.window.request_animation_frame(cb.as_ref().unchecked_ref()));
        host.raf_id.set(first_frame.transpose()?);
        host.interval_id = Some(
            host.window.set_interval_with_callback_and_timeout_and_arguments_0(
                host.second.as_ref().unchecked_ref(),
                BOOKKEEPING_INTERVAL_MS,
            )?,
        );
        for (event, callback) in host.listeners() {
            host.window
                .add_event_listener_with_callback(event, callback.unchecked_ref())?;
        }

        Ok(host)
    }

    fn listeners(&self) -> [(&'static str, &JsValue); 3] {
        [
            ("keydown", self.keydown.as_ref()),
            ("keyup", self.keyup.as_ref()),
            ("blur", self.blur.as_ref()),
        ]
    }
}

impl Drop for HostLoop {
    fn drop(&mut self) {
        if let Some(id) = self.raf_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        if let Some(id) = self.interval_id.take() {
            self.window.clear_interval_with_handle(id);
        }
        for (event, callback) in self.listeners() {
            let _ = self
                .window
                .remove_event_listener_with_callback(event, callback.unchecked_ref());
        }
        // Breaks the frame closure's reference to itself
        match self.frame.release() {
            Some(Released::InFlight(callback)) => {
                // Released from the render hook: the closure is still running,
                // so free it from a later task.
                let deferred = Closure::once_into_js(move || drop(callback));
                if let Err(e) = self
                    .window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(
                        deferred.unchecked_ref(),
                        0,
                    )
                {
                    log::warn!("could not schedule frame release, leaking it: {e:?}");
                }
            }
            Some(Released::Idle(callback)) => drop(callback),
            None => {}
        }
        log::info!("Host loop released");
    }
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Parkour Run (web) starting...");
}

/// JS-facing game handle
#[wasm_bindgen]
pub struct WebGame {
    settings: Settings,
    shared: Option<Rc<RefCell<Shared>>>,
    host: Option<HostLoop>,
    render_hook: Option<js_sys::Function>,
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        Self {
            settings: Settings::load(),
            shared: None,
            host: None,
            render_hook: None,
        }
    }

    /// Built-in levels as JSON
    pub fn levels_json() -> Result<String, JsValue> {
        serde_json::to_string(&level::catalog()).map_err(js_err)
    }

    /// Receives a Float32Array `[player xyz, camera xyz, look-at xyz]` after
    /// every tick. The hook may call `exit` or `start`.
    pub fn set_render_hook(&mut self, hook: Option<js_sys::Function>) {
        if let Some(shared) = &self.shared {
            shared.borrow_mut().render_hook = hook.clone();
        }
        self.render_hook = hook;
    }

    /// Enter a level. Any running level is exited first.
    ///
    /// `seed` must be a whole number in `0..=2^53 - 1`.
    pub fn start(
        &mut self,
        level_id: &str,
        avatar_url: Option<String>,
        seed: Option<f64>,
    ) -> Result<(), JsValue> {
        let level = level::find(level_id).map_err(js_err)?;
        let seed = seed
            .map(|s| {
                seed_from_js(s).ok_or_else(|| {
                    JsValue::from_str(&format!("seed {s} is not a whole number in 0..=2^53-1"))
                })
            })
            .transpose()?;

        self.exit();

        let session = Session::start(
            &level,
            SessionConfig {
                seed,
                avatar_url,
                ..Default::default()
            },
        )
        .map_err(js_err)?;

        let shared = Rc::new(RefCell::new(Shared {
            session,
            input: InputState::default(),
            render_hook: self.render_hook.clone(),
        }));
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let host = HostLoop::install(window, &shared, &self.settings.active_bindings())?;

        self.shared = Some(shared);
        self.host = Some(host);
        Ok(())
    }

    /// Leave the level. Scheduling is released before this returns.
    /// Returns `[score, elapsed_secs]` of the finished run.
    pub fn exit(&mut self) -> Option<Vec<u32>> {
        self.host.take();
        let shared = self.shared.take()?;
        let stats = shared.borrow_mut().session.stop();
        Some(vec![stats.score, stats.elapsed_secs])
    }

    pub fn is_running(&self) -> bool {
        self.host.is_some()
    }

    pub fn score(&self) -> u32 {
        self.with_session(|s| s.stats().score).unwrap_or(0)
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.with_session(|s| s.stats().elapsed_secs).unwrap_or(0)
    }

    /// Elapsed time as `m:ss`
    pub fn clock_label(&self) -> String {
        self.with_session(|s| s.stats().clock_label())
            .unwrap_or_else(|| "0:00".into())
    }

    pub fn avatar_url(&self) -> Option<String> {
        self.with_session(|s| s.avatar_url().map(str::to_string))
            .flatten()
    }

    /// Scene background as `#rrggbb`
    pub fn background_color(&self) -> Option<String> {
        self.with_session(|s| s.level().background_color.to_hex())
    }

    /// Platforms flattened as `[cx, cy, cz, width, thickness, depth, 0xRRGGBB]` per box
    pub fn platforms(&self) -> Vec<f32> {
        self.with_session(|s| {
            s.platforms()
                .iter()
                .flat_map(|p| {
                    [
                        p.center.x,
                        p.center.y,
                        p.center.z,
                        p.width(),
                        p.thickness,
                        p.depth(),
                        p.color.0 as f32,
                    ]
                })
                .collect()
        })
        .unwrap_or_default()
    }

    pub fn show_timer(&self) -> bool {
        self.settings.show_timer
    }

    pub fn set_show_timer(&mut self, show: bool) {
        self.settings.show_timer = show;
        self.settings.save();
    }

    pub fn show_controls(&self) -> bool {
        self.settings.show_controls
    }

    pub fn set_show_controls(&mut self, show: bool) {
        self.settings.show_controls = show;
        self.settings.save();
    }

    pub fn arrow_keys(&self) -> bool {
        self.settings.arrow_keys
    }

    /// Accept the arrow keys too. Takes effect on the next `start`.
    pub fn set_arrow_keys(&mut self, enabled: bool) {
        self.settings.arrow_keys = enabled;
        self.settings.save();
    }

    /// Persist a new key for an action (`forward`, `backward`, `left`, `right`, `jump`).
    /// Takes effect on the next `start`.
    pub fn rebind(&mut self, action: &str, code: &str) -> Result<(), JsValue> {
        let action: Action = serde_json::from_value(serde_json::Value::String(capitalize(action)))
            .map_err(js_err)?;
        self.settings.bindings.rebind(action, code);
        self.settings.save();
        Ok(())
    }
}

impl WebGame {
    fn with_session<T>(&self, f: impl FnOnce(&Session) -> T) -> Option<T> {
        self.shared.as_ref().map(|shared| f(&shared.borrow().session))
    }
}

impl Drop for WebGame {
    fn drop(&mut self) {
        self.exit();
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
