use crate::constants::LOADER_SELECTOR;
use scene_core::TransitionSignal;
use wasm_bindgen::JsCast;
use web_sys as web;

fn loader(document: &web::Document) -> Option<web::HtmlElement> {
    document
        .query_selector(LOADER_SELECTOR)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

#[inline]
pub fn show_loader(document: &web::Document) {
    if let Some(el) = loader(document) {
        _ = el.style().set_property("display", "block");
    }
}

#[inline]
pub fn hide_loader(document: &web::Document) {
    if let Some(el) = loader(document) {
        _ = el.style().set_property("display", "none");
    }
}

/// Carry out the DOM side of a transition signal. Returns `true` for
/// signals this module handled.
pub fn apply_signal(document: &web::Document, signal: TransitionSignal) -> bool {
    match signal {
        TransitionSignal::LoaderShown => show_loader(document),
        TransitionSignal::LoaderHidden => hide_loader(document),
        _ => return false,
    }
    true
}
