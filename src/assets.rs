use crate::WebRuntime;
use scene_core::mesh_loader::decode_obj;
use scene_core::{AssetLoadFailure, AssetLoadTracker, AssetOutcome, AssetTicket};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("HTTP {}", resp.status());
    }
    let buf = JsFuture::from(resp.array_buffer().map_err(|e| anyhow::anyhow!("{:?}", e))?)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

async fn load_one(url: &str, runtime: &Rc<RefCell<WebRuntime>>) -> AssetOutcome {
    let bytes = fetch_bytes(url)
        .await
        .map_err(|e| AssetLoadFailure::new(url, format!("{:#}", e)))?;
    let node = decode_obj(url, &bytes)?;
    runtime.borrow_mut().attach_loaded(node);
    Ok(())
}

/// Start every registered fetch. Each one attaches its mesh (on success)
/// and then reports to the tracker exactly once.
pub fn spawn_fetches(
    tickets: Vec<AssetTicket>,
    tracker: &Rc<RefCell<AssetLoadTracker>>,
    runtime: &Rc<RefCell<WebRuntime>>,
) {
    for ticket in tickets {
        let tracker = Rc::clone(tracker);
        let runtime = Rc::clone(runtime);
        spawn_local(async move {
            let url = ticket.url().to_string();
            let outcome = load_one(&url, &runtime).await;
            if outcome.is_ok() {
                log::info!("[assets] loaded {}", url);
            }
            tracker.borrow_mut().resolve(ticket, outcome);
        });
    }
}
