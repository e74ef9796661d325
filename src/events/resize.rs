use crate::dom;
use crate::WebRuntime;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Re-run the viewport update on every window resize. The whole update
/// happens inside this callback, between two animation frames.
pub fn wire_resize(runtime: &Rc<RefCell<WebRuntime>>) {
    let runtime = Rc::clone(runtime);
    let closure = Closure::wrap(Box::new(move || {
        let (w, h, dpr) = dom::window_metrics();
        runtime.borrow_mut().resize(w, h, dpr);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
