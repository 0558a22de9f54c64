//! `Game`: the engine as a JS class, for pages that bring their own renderer
//! and input handling instead of using `start_game`.
use crate::config::GameConfig;
use crate::engine::{Engine, Outcome};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct Game {
    engine: Engine,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Game {
    /// Classic 10×20 game; call `onStart` before anything else.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Game {
        Self {
            engine: Engine::new(GameConfig::default()),
        }
    }

    #[wasm_bindgen(js_name = onStart)]
    pub fn on_start(&mut self) {
        self.engine.start();
    }

    /// Returns true when the tick forced a descent.
    #[wasm_bindgen(js_name = onTick)]
    pub fn on_tick(&mut self, elapsed_ms: f64) -> bool {
        self.engine.tick(elapsed_ms).is_some()
    }

    /// Returns true when the piece moved.
    #[wasm_bindgen(js_name = onMoveHorizontal)]
    pub fn on_move_horizontal(&mut self, direction: i32) -> bool {
        self.engine.move_horizontal(direction) == Outcome::Moved
    }

    /// Returns the number of rows cleared if the piece locked, else undefined.
    #[wasm_bindgen(js_name = onHardDrop)]
    pub fn on_hard_drop(&mut self) -> Option<u32> {
        match self.engine.drop_once() {
            Outcome::Locked { rows_cleared } | Outcome::ToppedOut { rows_cleared } => {
                Some(rows_cleared)
            }
            _ => None,
        }
    }

    /// Returns true when the piece turned.
    #[wasm_bindgen(js_name = onRotate)]
    pub fn on_rotate(&mut self, direction: i32) -> bool {
        self.engine.rotate(direction) == Outcome::Moved
    }

    #[wasm_bindgen(js_name = getScore)]
    pub fn score(&self) -> u32 {
        self.engine.score()
    }

    /// Arena cells, row-major.
    #[wasm_bindgen(js_name = getGrid)]
    pub fn grid(&self) -> Vec<u8> {
        self.engine.arena().to_flat()
    }

    #[wasm_bindgen(js_name = gridWidth)]
    pub fn grid_width(&self) -> usize {
        self.engine.arena().width()
    }

    #[wasm_bindgen(js_name = gridHeight)]
    pub fn grid_height(&self) -> usize {
        self.engine.arena().height()
    }

    #[wasm_bindgen(js_name = pieceX)]
    pub fn piece_x(&self) -> i32 {
        self.engine.player().pos.x
    }

    #[wasm_bindgen(js_name = pieceY)]
    pub fn piece_y(&self) -> i32 {
        self.engine.player().pos.y
    }

    #[wasm_bindgen(js_name = pieceWidth)]
    pub fn piece_width(&self) -> usize {
        self.engine.player().matrix.width()
    }

    #[wasm_bindgen(js_name = pieceHeight)]
    pub fn piece_height(&self) -> usize {
        self.engine.player().matrix.height()
    }

    /// Falling piece cells, row-major, `pieceWidth` per row.
    #[wasm_bindgen(js_name = pieceMatrix)]
    pub fn piece_matrix(&self) -> Vec<u8> {
        self.engine.player().matrix.to_flat()
    }
}
