//! Handle returned to the page

use std::cell::RefCell;
use std::rc::Rc;

use lumen_backdrop::PresetId;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::runtime::Runtime;

/// Control surface for a running backdrop
///
/// Every method is a no-op after `dispose()`. Dropping the handle (`free()`
/// from JS) disposes the backdrop.
#[wasm_bindgen]
pub struct BackdropHandle {
    runtime: Rc<RefCell<Runtime>>,
}

impl BackdropHandle {
    pub(crate) fn new(runtime: Rc<RefCell<Runtime>>) -> Self {
        Self { runtime }
    }
}

#[wasm_bindgen]
impl BackdropHandle {
    /// Select the preset to blend toward (e.g. "medical"). Unknown names
    /// resolve to the hero preset.
    #[wasm_bindgen(js_name = setTargetState)]
    pub fn set_target_state(&self, name: &str) {
        if let Ok(mut runtime) = self.runtime.try_borrow_mut() {
            runtime.set_target_state(name);
        }
    }

    /// Kick the decaying bloom/particle pulse
    #[wasm_bindgen]
    pub fn pulse(&self, strength: f32) {
        if let Ok(mut runtime) = self.runtime.try_borrow_mut() {
            runtime.pulse(strength);
        }
    }

    /// Stop the loop, remove listeners and the canvas, release the GPU
    #[wasm_bindgen]
    pub fn dispose(&self) {
        if let Ok(mut runtime) = self.runtime.try_borrow_mut() {
            runtime.dispose();
        }
    }

    /// Lifecycle state, e.g. "running" or "paused-hidden"
    #[wasm_bindgen]
    pub fn lifecycle(&self) -> String {
        self.runtime.borrow().lifecycle().as_str().to_string()
    }

    /// Id of the preset currently targeted
    #[wasm_bindgen(js_name = targetState)]
    pub fn target_state(&self) -> String {
        self.runtime
            .borrow()
            .controller()
            .engine()
            .target()
            .id()
            .to_string()
    }

    /// Current animation vector as JSON
    #[wasm_bindgen(js_name = currentJson)]
    pub fn current_json(&self) -> String {
        let runtime = self.runtime.borrow();
        serde_json::to_string(runtime.controller().engine().current())
            .unwrap_or_else(|_| "{}".to_string())
    }
}

impl Drop for BackdropHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[derive(Serialize)]
struct PresetEntry {
    id: &'static str,
    name: &'static str,
}

/// All presets as JSON
/// Returns: [{ "id": "hero", "name": "Hero" }, ...]
pub fn presets_json() -> String {
    let presets: Vec<PresetEntry> = PresetId::all()
        .iter()
        .map(|preset| PresetEntry {
            id: preset.id(),
            name: preset.name(),
        })
        .collect();
    serde_json::to_string(&presets).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_json_lists_catalogue() {
        let json = presets_json();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 6);
        assert_eq!(parsed[0]["id"], "hero");
        assert_eq!(parsed[5]["id"], "medical");
        assert_eq!(parsed[5]["name"], "Medical");
    }
}
