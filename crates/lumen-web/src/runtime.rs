//! Animation-frame loop and event wiring
//!
//! The [`Runtime`] lives behind `Rc<RefCell<_>>`. Every callback (the frame
//! closure and each DOM listener) holds only a `Weak` reference, so dropping
//! the handle's `Rc` frees the whole graph. Callbacks use `try_borrow_mut`
//! and drop the event if the runtime is already borrowed.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use lumen_backdrop::background::{BackgroundRenderer, GpuSurface};
use lumen_backdrop::{
    BackdropController, BackdropEngine, Clock, Effects, FrameScheduler, FrameSkipped, InputEvent,
    LifecycleState,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::dom::{self, Host};
use crate::listeners::EventListener;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` with a single outstanding request
pub struct RafScheduler {
    window: web_sys::Window,
    callback: FrameCallback,
    /// Id of the pending request; cleared by the frame closure when it fires
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) {
        if self.pending.get().is_some() {
            return;
        }
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => self.pending.set(Some(id)),
            Err(e) => log::warn!("[backdrop] requestAnimationFrame failed: {:?}", e),
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(id) = self.pending.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
    }

    fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }
}

/// `performance.now()` in seconds
pub struct PerformanceClock {
    performance: Option<web_sys::Performance>,
}

impl PerformanceClock {
    pub fn new(window: &web_sys::Window) -> Self {
        Self {
            performance: window.performance(),
        }
    }
}

impl Clock for PerformanceClock {
    fn now_seconds(&self) -> f64 {
        let millis = match &self.performance {
            Some(performance) => performance.now(),
            None => js_sys::Date::now(),
        };
        millis / 1000.0
    }
}

pub type Controller = BackdropController<RafScheduler, PerformanceClock>;

/// Everything the running backdrop owns in the page
pub struct Runtime {
    controller: Controller,
    renderer: Option<BackgroundRenderer>,
    window: web_sys::Window,
    document: web_sys::Document,
    canvas: web_sys::HtmlCanvasElement,
    anchor_selector: String,
    frame: FrameCallback,
    listeners: Vec<EventListener>,
}

impl Runtime {
    /// Wire the frame loop and DOM listeners, then request the first frame
    pub fn start(
        host: Host,
        canvas: web_sys::HtmlCanvasElement,
        engine: BackdropEngine,
        renderer: BackgroundRenderer,
    ) -> Result<Rc<RefCell<Self>>, JsValue> {
        let Host {
            window, document, ..
        } = host;

        let frame: FrameCallback = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));
        let scheduler = RafScheduler {
            window: window.clone(),
            callback: Rc::clone(&frame),
            pending: Rc::clone(&pending),
        };
        let clock = PerformanceClock::new(&window);
        let anchor_selector = engine.config().stencil_anchor.clone();

        let runtime = Rc::new(RefCell::new(Self {
            controller: BackdropController::new(engine, scheduler, clock),
            renderer: Some(renderer),
            window,
            document,
            canvas,
            anchor_selector,
            frame: Rc::clone(&frame),
            listeners: Vec::new(),
        }));

        let weak = Rc::downgrade(&runtime);
        *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending.set(None);
            let mut rebuild = false;
            with_runtime(&weak, |rt| rebuild = rt.frame());
            if rebuild {
                restore_renderer(weak.clone());
            }
        }) as Box<dyn FnMut()>));

        let listeners = install_listeners(&runtime)?;
        {
            let mut rt = runtime.borrow_mut();
            rt.listeners = listeners;
            let hidden = rt.document.hidden();
            if hidden {
                rt.dispatch(InputEvent::VisibilityChanged { hidden });
            }
            rt.controller.start();
        }
        Ok(runtime)
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn set_target_state(&mut self, name: &str) {
        self.controller.set_target_state(name);
    }

    pub fn pulse(&mut self, strength: f32) {
        self.controller.pulse(strength);
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.controller.lifecycle()
    }

    /// One animation frame: step the simulation, then draw it
    ///
    /// Returns true when the GPU device was lost and the renderer must be
    /// rebuilt.
    fn frame(&mut self) -> bool {
        if self.renderer.as_ref().is_some_and(|r| r.is_device_lost()) {
            return self.device_lost();
        }

        let (document, selector) = (&self.document, &self.anchor_selector);
        let Some(report) = self
            .controller
            .on_animation_frame(|| dom::anchor_rect(document, selector))
        else {
            return false;
        };

        let Some(renderer) = self.renderer.as_mut() else {
            return false;
        };
        match renderer.render(self.controller.engine(), &report) {
            Ok(()) => {}
            Err(FrameSkipped::OutOfMemory) => {
                log::warn!("[renderer] {}", FrameSkipped::OutOfMemory)
            }
            Err(skipped) => log::debug!("[renderer] {}", skipped),
        }
        false
    }

    /// WebGPU device loss: no restore event follows, so go through the
    /// lost and restored transitions at once and let the caller rebuild.
    fn device_lost(&mut self) -> bool {
        self.renderer = None;
        self.dispatch(InputEvent::ContextLost);
        self.dispatch(InputEvent::ContextRestored);
        log::warn!("[renderer] device lost, rebuilding");
        self.lifecycle().accepts_renderer()
    }

    /// Feed an event to the controller and carry out what the host owns
    fn dispatch(&mut self, event: InputEvent) -> Effects {
        let effects = self.controller.dispatch(event);
        if effects.reset_after_sleep {
            self.sync_viewport();
        }
        effects
    }

    /// Re-read the window size into the engine and resize the canvas
    fn sync_viewport(&mut self) {
        let (width, height, device_pixel_ratio) = dom::window_metrics(&self.window);
        self.controller.dispatch(InputEvent::Resized {
            width,
            height,
            device_pixel_ratio,
        });
        dom::apply_canvas_size(&self.canvas, self.controller.engine().viewport());
    }

    /// Tear down the loop. Safe to call more than once.
    pub fn dispose(&mut self) {
        let effects = self.controller.dispose();
        if effects.release_resources {
            self.release();
        }
    }

    fn release(&mut self) {
        self.listeners.clear();
        if let Some(renderer) = self.renderer.take() {
            renderer.release();
        }
        self.canvas.remove();
        self.frame.borrow_mut().take();
        log::info!("[backdrop] resources released");
    }

    fn context_lost(&mut self, event: &web_sys::Event) {
        let effects = self.dispatch(InputEvent::ContextLost);
        if effects.prevent_default {
            event.prevent_default();
        }
        if self.renderer.take().is_some() {
            log::warn!("[renderer] context lost, renderer dropped");
        }
    }

    fn attach_renderer(&mut self, connected: GpuSurface) {
        let renderer = BackgroundRenderer::build(connected, self.controller.engine());
        let state = self.controller.lifecycle();
        if !state.accepts_renderer() {
            log::info!("[renderer] rebuilt renderer discarded while {}", state);
            renderer.release();
            return;
        }
        self.renderer = Some(renderer);
        log::info!("[renderer] rebuilt after context restore");
    }
}

/// Rebuild the renderer on the restored context
///
/// The runtime is only borrowed before and after the await, never across it.
fn restore_renderer(runtime: Weak<RefCell<Runtime>>) {
    wasm_bindgen_futures::spawn_local(async move {
        let (canvas, (width, height)) = {
            let Some(rt) = runtime.upgrade() else {
                return;
            };
            let rt = rt.borrow();
            (
                rt.canvas.clone(),
                rt.controller.engine().viewport().physical_size(),
            )
        };

        match BackgroundRenderer::connect(canvas, width, height).await {
            Ok(connected) => {
                if let Some(rt) = runtime.upgrade() {
                    rt.borrow_mut().attach_renderer(connected);
                }
            }
            Err(e) => log::error!("[renderer] failed to rebuild after context restore: {}", e),
        }
    });
}

/// Call `f` with the runtime if it is still alive and not borrowed
fn with_runtime(runtime: &Weak<RefCell<Runtime>>, f: impl FnOnce(&mut Runtime)) {
    if let Some(runtime) = runtime.upgrade() {
        if let Ok(mut runtime) = runtime.try_borrow_mut() {
            f(&mut runtime);
        }
    }
}

fn install_listeners(runtime: &Rc<RefCell<Runtime>>) -> Result<Vec<EventListener>, JsValue> {
    let rt = runtime.borrow();
    let window: &web_sys::EventTarget = rt.window.as_ref();
    let document: &web_sys::EventTarget = rt.document.as_ref();
    let canvas: &web_sys::EventTarget = rt.canvas.as_ref();
    let config = rt.controller.engine().config();
    let mut listeners = Vec::new();

    let weak = Rc::downgrade(runtime);
    listeners.push(EventListener::passive(window, "pointermove", move |event| {
        let Some(event) = event.dyn_ref::<web_sys::MouseEvent>() else {
            return;
        };
        let (x, y) = (event.client_x() as f32, event.client_y() as f32);
        with_runtime(&weak, |rt| {
            rt.dispatch(InputEvent::PointerMoved { x, y });
        });
    })?);

    let weak = Rc::downgrade(runtime);
    listeners.push(EventListener::passive(window, "resize", move |_| {
        with_runtime(&weak, |rt| rt.sync_viewport());
    })?);

    let weak = Rc::downgrade(runtime);
    listeners.push(EventListener::new(document, "visibilitychange", move |_| {
        with_runtime(&weak, |rt| {
            let hidden = rt.document.hidden();
            rt.dispatch(InputEvent::VisibilityChanged { hidden });
        });
    })?);

    let weak = Rc::downgrade(runtime);
    listeners.push(EventListener::new(window, "focus", move |_| {
        with_runtime(&weak, |rt| {
            rt.dispatch(InputEvent::FocusGained);
        });
    })?);

    let weak = Rc::downgrade(runtime);
    listeners.push(EventListener::new(window, "blur", move |_| {
        with_runtime(&weak, |rt| {
            rt.dispatch(InputEvent::FocusLost);
        });
    })?);

    let weak = Rc::downgrade(runtime);
    listeners.push(EventListener::new(canvas, "webglcontextlost", move |event| {
        with_runtime(&weak, |rt| rt.context_lost(&event));
    })?);

    let weak = Rc::downgrade(runtime);
    listeners.push(EventListener::new(canvas, "webglcontextrestored", move |_| {
        let mut restored = false;
        with_runtime(&weak, |rt| {
            restored = rt.lifecycle() == LifecycleState::ContextLost;
            rt.dispatch(InputEvent::ContextRestored);
        });
        if restored {
            restore_renderer(weak.clone());
        }
    })?);

    let weak = Rc::downgrade(runtime);
    listeners.push(EventListener::new(window, &config.modal_open_event, move |_| {
        with_runtime(&weak, |rt| {
            rt.dispatch(InputEvent::ModalOpened);
        });
    })?);

    let weak = Rc::downgrade(runtime);
    listeners.push(EventListener::new(window, &config.modal_close_event, move |_| {
        with_runtime(&weak, |rt| {
            rt.dispatch(InputEvent::ModalClosed);
        });
    })?);

    log::debug!("[backdrop] {} listeners installed", listeners.len());
    Ok(listeners)
}
