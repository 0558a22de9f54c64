// Browser smoke tests; run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use canvas_tetris::{Game, start_game};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn game_class_runs_in_wasm() {
    let mut game = Game::new();
    game.on_start();
    assert_eq!(game.grid().len(), 200);
    assert!(!game.on_tick(500.0));
    assert!(game.on_tick(501.0));
    assert_eq!(game.piece_y(), 1);
}

#[wasm_bindgen_test]
fn start_game_creates_a_sized_canvas() {
    start_game().unwrap();
    let doc = web_sys::window().unwrap().document().unwrap();
    let canvas: web_sys::HtmlCanvasElement = doc
        .get_element_by_id("tetris")
        .expect("canvas created")
        .dyn_into()
        .unwrap();
    assert_eq!((canvas.width(), canvas.height()), (300, 600));
    // mounting twice restarts instead of failing
    start_game().unwrap();
}
