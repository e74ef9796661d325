#![cfg(target_arch = "wasm32")]
use scene_core::{connect_tracker, AssetLoadTracker, Clock, OrbitControls, SceneRuntime};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod constants;
mod dom;
mod events;
mod frame;
mod overlay;
mod panel;
mod render;

pub(crate) type WebRuntime = SceneRuntime<render::GpuState, OrbitControls>;

thread_local! {
    static LOOP: RefCell<Option<frame::LoopHandle>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("knot-scene starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Stop the render loop and pending transition timers.
#[wasm_bindgen]
pub fn teardown() {
    LOOP.with(|slot| {
        if let Some(handle) = slot.borrow_mut().take() {
            handle.stop();
        }
    });
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, constants::CANVAS_ID)?;
    let config = dom::config_from_location(&window);

    let clock = Clock::start();
    let gpu = render::GpuState::new(&canvas).await?;
    let (width, height, dpr) = dom::window_metrics();
    let runtime: Rc<RefCell<WebRuntime>> = Rc::new(RefCell::new(SceneRuntime::new(
        &config,
        gpu,
        OrbitControls::new(),
        width,
        height,
        dpr,
    )));

    // register the whole batch before any fetch is issued
    let tracker = Rc::new(RefCell::new(AssetLoadTracker::new()));
    connect_tracker(&mut tracker.borrow_mut(), &runtime, move || clock.elapsed());
    let mut tickets = Vec::with_capacity(config.model_urls.len());
    for url in &config.model_urls {
        tickets.push(tracker.borrow_mut().register(url.as_str())?);
    }
    tracker.borrow_mut().activate();
    assets::spawn_fetches(tickets, &tracker, &runtime);

    events::wire_resize(&runtime);
    events::wire_orbit_input(&canvas, &runtime);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        runtime,
        clock,
        document,
        panel: None,
    }));
    let handle = frame::start_loop(frame_ctx);
    LOOP.with(|slot| *slot.borrow_mut() = Some(handle));
    Ok(())
}
