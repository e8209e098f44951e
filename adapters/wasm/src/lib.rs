#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Browser bridge exposing the Polygon Defence engine through `wasm-bindgen`.
//!
//! The host calls [`initialize`] once, then drives the engine with
//! [`step`] from its animation loop and forwards pointer input to
//! [`handle_click`]. Drawing, sound and logging flow back through the
//! callbacks the host places in the global scope (`drawRect`,
//! `playTowerShoot`, `logString`, ...). Calls made before [`initialize`]
//! are ignored.

mod host;
mod log;

use std::cell::RefCell;

use polygon_defence_simulation::Engine;
use wasm_bindgen::prelude::*;

use self::host::{HostSound, HostSurface};

type HostEngine = Engine<HostSurface, HostSound>;

thread_local! {
    static ENGINE: RefCell<Option<HostEngine>> = const { RefCell::new(None) };
}

fn with_engine<R>(fallback: R, action: impl FnOnce(&mut HostEngine) -> R) -> R {
    ENGINE.with(|slot| match slot.try_borrow_mut() {
        Ok(mut engine) => match engine.as_mut() {
            Some(engine) => action(engine),
            None => fallback,
        },
        Err(_) => fallback,
    })
}

/// Creates the engine for a `width` by `height` play area, waiting in the menu.
#[wasm_bindgen]
pub fn initialize(width: f32, height: f32) {
    log::install();
    let engine = Engine::new(width, height, HostSurface, HostSound);
    ENGINE.with(|slot| {
        if let Ok(mut current) = slot.try_borrow_mut() {
            *current = Some(engine);
        }
    });
}

/// Starts a fresh run immediately.
#[wasm_bindgen(js_name = resetGame)]
pub fn reset_game() {
    with_engine((), HostEngine::reset_game);
}

/// Advances the simulation by `delta_seconds` and draws the frame.
#[wasm_bindgen]
pub fn step(delta_seconds: f32) {
    with_engine((), |engine| engine.step(delta_seconds));
}

/// Forwards a click or tap in logical coordinates.
#[wasm_bindgen(js_name = handleClick)]
pub fn handle_click(x: f32, y: f32) {
    with_engine((), |engine| engine.handle_click(x, y));
}

/// Toggles between playing and paused.
#[wasm_bindgen(js_name = togglePause)]
pub fn toggle_pause() {
    with_engine((), HostEngine::toggle_pause);
}

/// Selects the tower kind for code `id`; unknown codes clear the selection.
#[wasm_bindgen(js_name = selectTowerType)]
pub fn select_tower_type(id: i32) {
    with_engine((), |engine| engine.select_tower_type(id));
}

/// Reports whether a click at `(x, y)` would build the selected tower.
#[wasm_bindgen(js_name = canPlaceTower)]
pub fn can_place_tower(x: f32, y: f32) -> bool {
    with_engine(false, |engine| engine.can_place_tower(x, y))
}

/// Range of the selected tower kind for the placement preview.
#[wasm_bindgen(js_name = getTowerRange)]
pub fn get_tower_range() -> f32 {
    with_engine(0.0, |engine| engine.tower_range())
}
