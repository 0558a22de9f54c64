//! Canvas Tetris core crate.
//!
//! The engine (`engine`) is plain Rust and runs anywhere. The canvas host
//! wires it to a page through `start_game()`, and `Game` exposes the same
//! engine to JS callers that render on their own.

use wasm_bindgen::prelude::*;

pub mod bindings;
pub mod config;
pub mod engine;
pub mod input;

mod canvas;

pub use bindings::Game;
pub use config::{ConfigError, GameConfig, HostConfig};
pub use engine::{Command, Engine, Outcome, Snapshot};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Mount the game on the default page layout (`#tetris`, `#score`, `#startBtn`).
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    canvas::mount(HostConfig::default())
}

/// Like `start_game`, with a camelCase JSON config; missing fields keep
/// their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = HostConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    canvas::mount(config)
}

/// JSON snapshot of the mounted game, or `undefined` before `start_game`.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn game_snapshot() -> Result<Option<String>, JsValue> {
    canvas::snapshot()
        .map(|snap| serde_json::to_string(&snap))
        .transpose()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
