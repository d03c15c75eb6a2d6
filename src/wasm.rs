//! WebAssembly bindings: the collaborator contract exposed to a JS
//! rendering layer. Structured values cross the boundary as JSON strings.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::camera::Point;
use crate::doc::{ElementId, PartialElement};
use crate::engine::{Action, Engine};
use crate::input::InputEvent;

#[cfg(test)]
#[path = "wasm_test.rs"]
mod wasm_test;

/// Result of an insert: the new id plus the actions it produced.
#[derive(Serialize)]
struct Inserted {
    id: ElementId,
    actions: Vec<Action>,
}

#[wasm_bindgen]
pub struct WasmEngine {
    engine: Engine,
}

#[wasm_bindgen]
impl WasmEngine {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self { engine: Engine::new() }
    }

    /// Add an element by type name and select it. Returns the new id; use
    /// `addElementActions` when the insert's actions are needed too.
    #[wasm_bindgen(js_name = addElement)]
    pub fn add_element(&mut self, type_name: &str, subtype: Option<String>, content: Option<String>) -> String {
        let (id, actions) = self.engine.add_element_named(type_name, subtype.as_deref(), content.as_deref());
        tracing::debug!(%id, actions = actions.len(), "element added from js");
        id.to_string()
    }

    /// Add an element by type name and select it. Returns
    /// `{"id": ..., "actions": [...]}` as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if the result cannot be encoded.
    #[wasm_bindgen(js_name = addElementActions)]
    pub fn add_element_actions(
        &mut self,
        type_name: &str,
        subtype: Option<String>,
        content: Option<String>,
    ) -> Result<String, String> {
        let (id, actions) = self.engine.add_element_named(type_name, subtype.as_deref(), content.as_deref());
        serde_json::to_string(&Inserted { id, actions }).map_err(|e| e.to_string())
    }

    /// Apply a JSON-encoded partial update. Returns the resulting actions as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string for a malformed id or patch, or an unknown element.
    #[wasm_bindgen(js_name = updateElement)]
    pub fn update_element(&mut self, id: &str, fields_json: &str) -> Result<String, String> {
        let id = parse_id(id)?;
        let fields: PartialElement = serde_json::from_str(fields_json).map_err(|e| e.to_string())?;
        let actions = self.engine.update_element(id, &fields).map_err(|e| e.to_string())?;
        encode(&actions)
    }

    /// # Errors
    ///
    /// Returns an error string for a malformed or unknown id.
    pub fn select(&mut self, id: &str) -> Result<String, String> {
        let actions = self.engine.select(parse_id(id)?).map_err(|e| e.to_string())?;
        encode(&actions)
    }

    /// # Errors
    ///
    /// Returns an error string for a malformed or unknown id.
    #[wasm_bindgen(js_name = requestEdit)]
    pub fn request_edit(&mut self, id: &str, anchor_x: f64, anchor_y: f64) -> Result<String, String> {
        let actions = self
            .engine
            .request_edit(parse_id(id)?, Point::new(anchor_x, anchor_y))
            .map_err(|e| e.to_string())?;
        encode(&actions)
    }

    /// # Errors
    ///
    /// Returns an error string if the actions cannot be encoded.
    #[wasm_bindgen(js_name = canvasBackgroundClicked)]
    pub fn canvas_background_clicked(&mut self) -> Result<String, String> {
        encode(&self.engine.canvas_background_clicked())
    }

    /// Feed one JSON-encoded input event; returns the actions as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if the event cannot be decoded.
    #[wasm_bindgen(js_name = handleEvent)]
    pub fn handle_event(&mut self, event_json: &str) -> Result<String, String> {
        let event: InputEvent = serde_json::from_str(event_json).map_err(|e| e.to_string())?;
        encode(&self.engine.handle(&event))
    }

    /// # Errors
    ///
    /// Returns an error string for a malformed id or a non-text element.
    #[wasm_bindgen(js_name = editText)]
    pub fn edit_text(&mut self, id: &str, text: &str) -> Result<String, String> {
        let actions = self.engine.edit_text(parse_id(id)?, text).map_err(|e| e.to_string())?;
        encode(&actions)
    }

    /// # Errors
    ///
    /// Returns an error string for a malformed id, a non-table element or a
    /// cell outside the grid.
    #[wasm_bindgen(js_name = editCell)]
    pub fn edit_cell(&mut self, id: &str, row: usize, col: usize, value: &str) -> Result<String, String> {
        let actions = self.engine.edit_cell(parse_id(id)?, row, col, value).map_err(|e| e.to_string())?;
        encode(&actions)
    }

    /// # Errors
    ///
    /// Returns an error string if the actions cannot be encoded.
    #[wasm_bindgen(js_name = clickOutsideToolbar)]
    pub fn click_outside_toolbar(&mut self) -> Result<String, String> {
        encode(&self.engine.click_outside_toolbar())
    }

    /// # Errors
    ///
    /// Returns an error string if the actions cannot be encoded.
    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&mut self) -> Result<String, String> {
        encode(&self.engine.zoom_in())
    }

    /// # Errors
    ///
    /// Returns an error string if the actions cannot be encoded.
    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&mut self) -> Result<String, String> {
        encode(&self.engine.zoom_out())
    }

    /// # Errors
    ///
    /// Returns an error string if the actions cannot be encoded.
    #[wasm_bindgen(js_name = resetView)]
    pub fn reset_view(&mut self) -> Result<String, String> {
        encode(&self.engine.reset_view())
    }

    /// Release any pointer capture before the view unmounts.
    ///
    /// # Errors
    ///
    /// Returns an error string if the actions cannot be encoded.
    pub fn detach(&mut self) -> Result<String, String> {
        encode(&self.engine.detach())
    }

    /// # Errors
    ///
    /// Returns an error string if the snapshot cannot be encoded.
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, String> {
        serde_json::to_string(&self.engine.snapshot()).map_err(|e| e.to_string())
    }

    /// # Errors
    ///
    /// Returns an error string if the render list cannot be encoded.
    #[wasm_bindgen(js_name = renderListJson)]
    pub fn render_list_json(&self) -> Result<String, String> {
        serde_json::to_string(&self.engine.render_list()).map_err(|e| e.to_string())
    }
}

impl Default for WasmEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_id(raw: &str) -> Result<ElementId, String> {
    ElementId::parse_str(raw).map_err(|e| e.to_string())
}

fn encode(actions: &[Action]) -> Result<String, String> {
    serde_json::to_string(actions).map_err(|e| e.to_string())
}
