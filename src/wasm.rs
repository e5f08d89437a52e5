//! WebAssembly bindings for Maze Evolver.
//!
//! Provides a thin wrapper around `EvolutionController` for browser
//! front-ends. The page owns rendering, the "next step" button, cell
//! clicks and the replay timer; this module only forwards those events.

use wasm_bindgen::prelude::*;

use crate::{
    compute::evolution::EvolutionController,
    schema::{EvolutionConfig, MazeConfig},
};

/// Initialize WASM module with panic hook and logging.
#[wasm_bindgen(start)]
pub fn init() {
    // Set panic hook for better error messages in browser
    console_error_panic_hook::set_once();

    // Initialize WASM logger
    wasm_logger::init(wasm_logger::Config::default());
}

/// WebAssembly wrapper for one maze run.
#[wasm_bindgen]
pub struct WasmMazeRun {
    controller: EvolutionController,
}

#[wasm_bindgen]
impl WasmMazeRun {
    /// Start a run from JSON configuration.
    ///
    /// # Arguments
    /// * `maze_json` - JSON string containing MazeConfig
    /// * `config_json` - JSON string containing EvolutionConfig (empty for defaults)
    #[wasm_bindgen(constructor)]
    pub fn new(maze_json: &str, config_json: &str) -> Result<WasmMazeRun, JsValue> {
        let maze: MazeConfig = serde_json::from_str(maze_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid maze JSON: {e}")))?;

        let config: EvolutionConfig = if config_json.trim().is_empty() {
            EvolutionConfig::default()
        } else {
            serde_json::from_str(config_json)
                .map_err(|e| JsValue::from_str(&format!("Invalid config JSON: {e}")))?
        };

        let controller = EvolutionController::initialize(&maze, config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(WasmMazeRun { controller })
    }

    /// Advance one phase and return its payload.
    #[wasm_bindgen]
    pub fn advance(&mut self) -> Result<JsValue, JsValue> {
        let result = self.controller.advance();
        serde_wasm_bindgen::to_value(&result)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Show the next replay frame; returns `null` when the replay is done.
    #[wasm_bindgen]
    pub fn tick(&mut self) -> Result<JsValue, JsValue> {
        let frame = self.controller.tick();
        serde_wasm_bindgen::to_value(&frame)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Toggle a wall. Returns false when the edit was ignored.
    #[wasm_bindgen(js_name = editCell)]
    pub fn edit_cell(&mut self, row: usize, col: usize) -> bool {
        self.controller.edit_cell(row, col)
    }

    /// Get the full run state as a JS object.
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.controller.snapshot())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Milliseconds the page should wait between replay frames.
    #[wasm_bindgen(js_name = frameInterval)]
    pub fn frame_interval(&self) -> u32 {
        u32::try_from(self.controller.config().animation.frame_interval_ms).unwrap_or(u32::MAX)
    }

    #[wasm_bindgen(js_name = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.controller.is_animating()
    }

    #[wasm_bindgen(js_name = reachedGoal)]
    pub fn reached_goal(&self) -> bool {
        self.controller.reached_goal()
    }

    /// Current generation, as a JS number.
    #[wasm_bindgen]
    pub fn generation(&self) -> f64 {
        self.controller.generation() as f64
    }
}
