pub mod runner;

pub use runner::PinballRunner;

use std::cell::RefCell;

use pinball_core::glam::Vec2;
use pinball_core::{ConfigError, InputEvent};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<PinballRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the live runner. Before a successful init, returns `R::default()`.
fn with_runner<R: Default>(f: impl FnOnce(&mut PinballRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => {
            log::warn!("pinball: not initialized, call pinball_init() first");
            R::default()
        }
    })
}

fn install(result: Result<PinballRunner, ConfigError>, table: &str) -> bool {
    match result {
        Ok(runner) => {
            RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
            log::info!("pinball: table '{}' initialized", table);
            true
        }
        Err(err) => {
            log::error!("pinball: cannot build table '{}': {}", table, err);
            false
        }
    }
}

fn init_logging() {
    console_error_panic_hook::set_once();
    // A second init fails because the logger is already set; that is fine.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Build a preset table (`"classic"` or `"wide"`) centered in a `width` x `height` viewport.
/// Returns false, and logs why, when the table cannot be built.
#[wasm_bindgen]
pub fn pinball_init(table: &str, width: f32, height: f32) -> bool {
    init_logging();
    install(PinballRunner::from_preset(table, Vec2::new(width, height)), table)
}

/// Like `pinball_init`, but from a JSON table definition.
#[wasm_bindgen]
pub fn pinball_init_json(json: &str, width: f32, height: f32) -> bool {
    init_logging();
    install(PinballRunner::from_json(json, Vec2::new(width, height)), "<json>")
}

#[wasm_bindgen]
pub fn pinball_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn pinball_key_down(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
}

#[wasm_bindgen]
pub fn pinball_key_up(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
}

/// Rebind the flipper keys from JSON (`{"left": [..], "right": [..]}` of DOM key codes).
/// Returns false, and logs why, when the JSON is malformed; the old bindings stay.
#[wasm_bindgen]
pub fn pinball_set_key_bindings(json: &str) -> bool {
    with_runner(|r| match r.set_bindings_json(json) {
        Ok(()) => true,
        Err(err) => {
            log::error!("pinball: bad key bindings: {}", err);
            false
        }
    })
}

#[wasm_bindgen]
pub fn pinball_reset_ball() {
    with_runner(|r| r.push_input(InputEvent::ResetBall));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    RUNNER.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |r| r.instances_ptr())
    })
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count())
}

/// Floats per render instance, so the page can compute its stride.
#[wasm_bindgen]
pub fn get_instance_floats() -> u32 {
    pinball_core::RenderInstance::FLOATS as u32
}

#[wasm_bindgen]
pub fn get_drain_count() -> u32 {
    with_runner(|r| r.drain_count())
}

/// Background color as `[r, g, b]` in 0..1.
#[wasm_bindgen]
pub fn get_background_color() -> js_sys::Float32Array {
    let rgb = with_runner(|r| r.background_color());
    js_sys::Float32Array::from(&rgb[..])
}
