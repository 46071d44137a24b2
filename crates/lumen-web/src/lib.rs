//! Browser host for the lumen backdrop
//!
//! Injects a full-window canvas behind the page, builds the wgpu renderer
//! and drives [`lumen_backdrop::BackdropController`] from
//! `requestAnimationFrame`.
//!
//! ## Module Structure
//!
//! - `dom` - Canvas injection, anchor lookup, window metrics
//! - `listeners` - Self-removing DOM event listeners
//! - `runtime` - Frame loop, scheduler/clock adapters, event wiring
//! - `handle` - The `BackdropHandle` returned to JS
//! - `util` - Console logger, config parsing, seeding
//!
//! ## Usage
//!
//! ```js
//! import init, { initialize } from "./pkg/lumen_web.js";
//! await init();
//! try {
//!   const backdrop = await initialize(JSON.stringify({ pauseOnBlur: true }));
//!   backdrop.setTargetState("medical");
//! } catch (e) {
//!   document.documentElement.classList.add("no-three");
//! }
//! ```

mod dom;
mod handle;
mod listeners;
mod runtime;
mod util;

use lumen_backdrop::background::BackgroundRenderer;
use lumen_backdrop::{BackdropEngine, Viewport};
use wasm_bindgen::prelude::*;

pub use dom::CANVAS_ID;
pub use handle::BackdropHandle;

use crate::dom::Host;
use crate::runtime::Runtime;
use crate::util::to_js_error;

/// Start the backdrop.
///
/// `config` is an optional JSON object of `BackdropConfig` overrides. The
/// promise rejects only when the GPU or the page host is unavailable; the
/// caller is expected to show a static fallback then.
#[wasm_bindgen]
pub async fn initialize(config: Option<String>) -> Result<BackdropHandle, JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    util::init_logging();

    let mut config = util::parse_config(config.as_deref());
    let host = Host::acquire().map_err(to_js_error)?;

    if config.seed.is_none() {
        config.seed = Some(util::random_seed());
    }
    if !config.reduced_motion && dom::prefers_reduced_motion(&host.window) {
        log::info!("[backdrop] prefers-reduced-motion detected");
        config.reduced_motion = true;
    }

    let (width, height, device_pixel_ratio) = dom::window_metrics(&host.window);
    let engine = BackdropEngine::new(config, Viewport::new(width, height, device_pixel_ratio));
    let canvas = dom::inject_canvas(&host.document, &host.body, engine.viewport())?;

    let renderer = match BackgroundRenderer::new(canvas.clone(), &engine).await {
        Ok(renderer) => renderer,
        Err(e) => {
            log::error!("[renderer] initialization failed: {}", e);
            canvas.remove();
            return Err(to_js_error(e));
        }
    };

    let runtime = match Runtime::start(host, canvas.clone(), engine, renderer) {
        Ok(runtime) => runtime,
        Err(e) => {
            canvas.remove();
            return Err(e);
        }
    };
    log::info!("[backdrop] initialized");
    Ok(BackdropHandle::new(runtime))
}

/// All presets as JSON
/// Returns: [{ "id": "hero", "name": "Hero" }, ...]
#[wasm_bindgen(js_name = availablePresets)]
pub fn available_presets() -> String {
    handle::presets_json()
}
