use crate::overlay;
use crate::panel::DomControlPanel;
use crate::WebRuntime;
use scene_core::{Clock, LoopControl, TransitionSignal};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub runtime: Rc<RefCell<WebRuntime>>,
    pub clock: Clock,
    pub document: web::Document,
    pub panel: Option<DomControlPanel>,
}

impl FrameContext {
    pub fn frame(&mut self) -> LoopControl {
        let outcome = self.runtime.borrow_mut().frame(self.clock.elapsed());
        for signal in outcome.signals {
            if overlay::apply_signal(&self.document, signal) {
                continue;
            }
            match signal {
                TransitionSignal::PanelDue => self.build_panel(),
                TransitionSignal::FadeStarted => log::debug!("[frame] fade started"),
                TransitionSignal::Transparent => log::debug!("[frame] overlay transparent"),
                _ => {}
            }
        }
        outcome.control
    }

    fn build_panel(&mut self) {
        let mut panel = match DomControlPanel::new(&self.document) {
            Ok(p) => p,
            Err(e) => {
                log::error!("[frame] control panel: {:?}", e);
                return;
            }
        };
        match self.runtime.borrow_mut().bind_controls(&mut panel) {
            Ok(n) => {
                log::info!("[frame] control panel ready ({} controls)", n);
                self.panel = Some(panel);
            }
            Err(e) => log::error!("[frame] control panel: {}", e),
        }
    }
}

/// Handle to a running animation-frame loop.
#[derive(Clone)]
pub struct LoopHandle {
    pending: Rc<Cell<Option<i32>>>,
    runtime: Rc<RefCell<WebRuntime>>,
}

impl LoopHandle {
    /// Stop the scene and cancel the frame already requested, if any.
    pub fn stop(&self) {
        self.runtime.borrow_mut().teardown();
        if let (Some(id), Some(w)) = (self.pending.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
    }
}

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_frame(tick: &TickSlot) -> Option<i32> {
    let w = web::window()?;
    let slot = tick.borrow();
    let cb = slot.as_ref()?;
    w.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> LoopHandle {
    let pending: Rc<Cell<Option<i32>>> = Rc::default();
    let handle = LoopHandle {
        pending: Rc::clone(&pending),
        runtime: Rc::clone(&frame_ctx.borrow().runtime),
    };

    let tick: TickSlot = Rc::new(RefCell::new(None));
    let tick_clone = Rc::clone(&tick);
    let pending_tick = Rc::clone(&pending);
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        pending_tick.set(None);
        match frame_ctx.borrow_mut().frame() {
            LoopControl::Continue => pending_tick.set(request_frame(&tick_clone)),
            LoopControl::Stop => log::info!("[frame] loop stopped"),
        }
    }) as Box<dyn FnMut()>));
    pending.set(request_frame(&tick));
    handle
}
