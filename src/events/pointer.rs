use crate::constants::WHEEL_DEADZONE_PX;
use crate::WebRuntime;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Default)]
struct DragState {
    active: bool,
    pointer_id: i32,
    last: (f64, f64),
}

#[derive(Clone)]
struct OrbitWiring {
    canvas: web::HtmlCanvasElement,
    runtime: Rc<RefCell<WebRuntime>>,
    drag: Rc<RefCell<DragState>>,
}

/// Pointer drag orbits the camera, the wheel zooms. Input only accumulates
/// deltas; the damped camera move happens in the frame loop.
pub fn wire_orbit_input(canvas: &web::HtmlCanvasElement, runtime: &Rc<RefCell<WebRuntime>>) {
    let w = OrbitWiring {
        canvas: canvas.clone(),
        runtime: Rc::clone(runtime),
        drag: Rc::default(),
    };
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
}

fn wire_pointerdown(w: &OrbitWiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mut drag = w.drag.borrow_mut();
        drag.active = true;
        drag.pointer_id = ev.pointer_id();
        drag.last = (ev.client_x() as f64, ev.client_y() as f64);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = target.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &OrbitWiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let (dx, dy) = {
            let mut drag = w.drag.borrow_mut();
            if !drag.active || drag.pointer_id != ev.pointer_id() {
                return;
            }
            let pos = (ev.client_x() as f64, ev.client_y() as f64);
            let delta = (pos.0 - drag.last.0, pos.1 - drag.last.1);
            drag.last = pos;
            delta
        };
        let height = w.canvas.client_height() as f32;
        w.runtime
            .borrow_mut()
            .context_mut()
            .controls
            .rotate(dx as f32, dy as f32, height);
    }) as Box<dyn FnMut(_)>);
    _ = target.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &OrbitWiring) {
    for event in ["pointerup", "pointercancel"] {
        let w = w.clone();
        let target = w.canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let mut drag = w.drag.borrow_mut();
            if drag.active && drag.pointer_id == ev.pointer_id() {
                drag.active = false;
                _ = w.canvas.release_pointer_capture(ev.pointer_id());
            }
        }) as Box<dyn FnMut(_)>);
        _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn wire_wheel(w: &OrbitWiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let dy = ev.delta_y();
        if dy.abs() < WHEEL_DEADZONE_PX {
            return;
        }
        w.runtime
            .borrow_mut()
            .context_mut()
            .controls
            .zoom(dy as f32);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = target.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
