use crate::constants::QUERY_KEYS;
use scene_core::SceneConfig;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

/// Logical window size and raw device pixel ratio.
pub fn window_metrics() -> (u32, u32, f32) {
    match web::window() {
        Some(w) => {
            let width = w
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(1.0);
            let height = w
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(1.0);
            (width as u32, height as u32, w.device_pixel_ratio() as f32)
        }
        None => (1, 1, 1.0),
    }
}

/// Defaults overridden by the page's query string.
pub fn config_from_location(window: &web::Window) -> SceneConfig {
    let mut config = SceneConfig::default();
    let Some(search) = window.location().search().ok() else {
        return config;
    };
    let Ok(params) = web::UrlSearchParams::new_with_str(&search) else {
        return config;
    };
    for key in QUERY_KEYS {
        if let Some(value) = params.get(key) {
            if config.apply_override(key, &value) {
                log::info!("[config] {}={}", key, value);
            }
        }
    }
    config
}
