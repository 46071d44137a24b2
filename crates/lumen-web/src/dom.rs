//! Canvas injection and DOM queries

use lumen_backdrop::{BackdropError, ScreenRect, Viewport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Id given to the injected canvas
pub const CANVAS_ID: &str = "lumen-backdrop";

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Browser globals the host needs
pub struct Host {
    pub window: web_sys::Window,
    pub document: web_sys::Document,
    pub body: web_sys::HtmlElement,
}

impl Host {
    pub fn acquire() -> Result<Self, BackdropError> {
        let window = web_sys::window().ok_or(BackdropError::MissingHost("window"))?;
        let document = window
            .document()
            .ok_or(BackdropError::MissingHost("document"))?;
        let body = document.body().ok_or(BackdropError::MissingHost("body"))?;
        Ok(Self {
            window,
            document,
            body,
        })
    }
}

/// Window size in CSS pixels and the device pixel ratio
pub fn window_metrics(window: &web_sys::Window) -> (f32, f32, f32) {
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    (
        dimension(window.inner_width()),
        dimension(window.inner_height()),
        window.device_pixel_ratio() as f32,
    )
}

/// Fixed, full-window canvas behind the page, prepended to `body`
pub fn inject_canvas(
    document: &web_sys::Document,
    body: &web_sys::HtmlElement,
    viewport: &Viewport,
) -> Result<web_sys::HtmlCanvasElement, JsValue> {
    let canvas: web_sys::HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_id(CANVAS_ID);
    canvas.set_attribute("aria-hidden", "true")?;

    let style = canvas.style();
    style.set_property("position", "fixed")?;
    style.set_property("inset", "0")?;
    style.set_property("width", "100vw")?;
    style.set_property("height", "100vh")?;
    style.set_property("z-index", "-1")?;
    style.set_property("pointer-events", "none")?;
    style.set_property("display", "block")?;

    apply_canvas_size(&canvas, viewport);
    body.prepend_with_node_1(&canvas)?;
    Ok(canvas)
}

/// Match the drawing buffer to the viewport's physical size
pub fn apply_canvas_size(canvas: &web_sys::HtmlCanvasElement, viewport: &Viewport) {
    let (width, height) = viewport.physical_size();
    if canvas.width() != width {
        canvas.set_width(width);
    }
    if canvas.height() != height {
        canvas.set_height(height);
    }
}

/// Bounding box of the first element matching `selector`
pub fn anchor_rect(document: &web_sys::Document, selector: &str) -> Option<ScreenRect> {
    let element = document.query_selector(selector).ok()??;
    let rect = element.get_bounding_client_rect();
    Some(ScreenRect {
        left: rect.left() as f32,
        top: rect.top() as f32,
        width: rect.width() as f32,
        height: rect.height() as f32,
    })
}

pub fn prefers_reduced_motion(window: &web_sys::Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false)
}
