//! Browser smoke tests
//!
//! Run with `wasm-pack test --headless --chrome crates/lumen-web`.

#![cfg(target_arch = "wasm32")]

use lumen_web::{available_presets, initialize, CANVAS_ID};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas_present() -> bool {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CANVAS_ID))
        .is_some()
}

#[wasm_bindgen_test]
fn test_available_presets_is_json() {
    let presets: Vec<serde_json::Value> = serde_json::from_str(&available_presets()).unwrap();
    assert_eq!(presets.len(), 6);
    assert_eq!(presets[0]["id"], "hero");
}

#[wasm_bindgen_test]
async fn test_initialize_and_dispose() {
    match initialize(Some(r#"{"seed": 7, "streamCount": 16}"#.to_string())).await {
        Ok(handle) => {
            assert!(canvas_present());
            assert_ne!(handle.lifecycle(), "disposed");

            handle.set_target_state("Medical");
            assert_eq!(handle.target_state(), "medical");
            assert!(handle.current_json().starts_with('{'));

            handle.dispose();
            assert_eq!(handle.lifecycle(), "disposed");
            assert!(!canvas_present());

            handle.dispose();
            handle.set_target_state("value");
            assert_eq!(handle.target_state(), "medical");
        }
        // No GPU in this browser: the canvas must not be left behind
        Err(_) => assert!(!canvas_present()),
    }
}
