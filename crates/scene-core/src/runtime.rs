//! Composition of the scene lifecycle: loading, entry transition, control
//! panel and the per-frame loop.

use crate::camera::{CameraControls, OrbitControls};
use crate::config::SceneConfig;
use crate::context::SceneContext;
use crate::device::RenderDevice;
use crate::error::{Result, SceneError};
use crate::loading::{AssetLoadTracker, LoadEvent};
use crate::overlay::{OverlayState, OverlayTransition, Signals};
use crate::panel::{ControlPanel, ControlPanelBinder};
use crate::params::{ShadingParameterStore, ShadingUniforms};
use crate::render_loop::{LoopControl, RenderLoop};
use crate::scene::{ProgramHandle, Scene, SceneNode};
use crate::viewport::{ViewportController, ViewportState};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

pub type SharedStore = Rc<RefCell<ShadingParameterStore<ShadingUniforms>>>;

/// Result of one frame, for the platform layer to act on.
#[derive(Debug)]
pub struct FrameOutcome {
    pub signals: Signals,
    pub control: LoopControl,
}

pub struct SceneRuntime<D: RenderDevice, C: CameraControls = OrbitControls> {
    ctx: SceneContext<D, C>,
    store: SharedStore,
    overlay: OverlayTransition,
    binder: ControlPanelBinder,
    render_loop: RenderLoop,
    viewport: ViewportController,
    // signals raised outside a frame (progress hooks), flushed by the next one
    queued: Signals,
}

impl<D: RenderDevice, C: CameraControls> SceneRuntime<D, C> {
    pub fn new(
        config: &SceneConfig,
        device: D,
        controls: C,
        width: u32,
        height: u32,
        device_pixel_ratio: f32,
    ) -> Self {
        let viewport = ViewportController {
            pixel_ratio_cap: config.pixel_ratio_cap,
        };
        let scene = Scene::with_default_objects(ProgramHandle(0));
        let ctx = SceneContext::new(
            scene,
            controls,
            device,
            &viewport,
            width,
            height,
            device_pixel_ratio,
        );
        let store = ShadingParameterStore::new(config.shading, ShadingUniforms::default());
        Self {
            ctx,
            store: Rc::new(RefCell::new(store)),
            overlay: OverlayTransition::new(config.transition),
            binder: ControlPanelBinder::new(),
            render_loop: RenderLoop::new(),
            viewport,
            queued: Signals::new(),
        }
    }

    pub fn context(&self) -> &SceneContext<D, C> {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut SceneContext<D, C> {
        &mut self.ctx
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn overlay(&self) -> &OverlayTransition {
        &self.overlay
    }

    pub fn overlay_state(&self) -> OverlayState {
        self.overlay.state()
    }

    pub fn render_loop(&self) -> &RenderLoop {
        &self.render_loop
    }

    pub fn on_loading_started(&mut self, items_total: u32) {
        log::debug!("[runtime] loading {} assets", items_total);
        let signals = self.overlay.on_loading_started(items_total);
        self.queued.extend(signals);
    }

    pub fn on_progress(&mut self, event: &LoadEvent) {
        log::debug!(
            "[runtime] progress {}/{} ({})",
            event.items_loaded,
            event.items_total,
            event.asset_url
        );
        let signals = self.overlay.on_progress();
        self.queued.extend(signals);
    }

    pub fn on_load_complete(&mut self, now: Duration) {
        self.overlay.on_load_complete(now);
    }

    /// Attach a decoded hierarchy; it is drawn from the next frame on.
    pub fn attach_loaded(&mut self, node: SceneNode) -> usize {
        self.ctx.scene.attach_loaded(node)
    }

    pub fn resize(&mut self, width: u32, height: u32, device_pixel_ratio: f32) -> ViewportState {
        self.viewport
            .apply(&mut self.ctx, width, height, device_pixel_ratio)
    }

    /// Advance the transition to `now` (time since scene start), then
    /// update and draw.
    pub fn frame(&mut self, now: Duration) -> FrameOutcome {
        let mut signals = std::mem::take(&mut self.queued);
        signals.extend(self.overlay.update(now));
        let store = self.store.borrow();
        let control = self.render_loop.tick(
            &mut self.ctx,
            store.sink(),
            self.overlay.alpha(),
            now.as_secs_f32(),
        );
        FrameOutcome { signals, control }
    }

    /// Build the control panel. Refused until the panel delay after load
    /// completion has elapsed, and on every call after the first.
    pub fn bind_controls(&mut self, panel: &mut dyn ControlPanel) -> Result<usize> {
        if !self.overlay.panel_due() {
            return Err(SceneError::PanelNotDue);
        }
        self.binder.construct(panel, &self.store)
    }

    /// Stop the loop and drop every pending transition timer.
    pub fn teardown(&mut self) {
        self.render_loop.stop();
        self.overlay.cancel_all();
    }
}

/// Route a tracker's hooks into `runtime`; completion is stamped with
/// whatever `now` returns when the last asset resolves.
///
/// The hooks borrow the runtime mutably, so the tracker must not be
/// resolved while the runtime is already borrowed.
pub fn connect_tracker<D, C>(
    tracker: &mut AssetLoadTracker,
    runtime: &Rc<RefCell<SceneRuntime<D, C>>>,
    now: impl Fn() -> Duration + 'static,
) where
    D: RenderDevice + 'static,
    C: CameraControls + 'static,
{
    let rt = Rc::clone(runtime);
    tracker.on_activate(move |total| rt.borrow_mut().on_loading_started(total));
    let rt = Rc::clone(runtime);
    tracker.on_progress(move |event| rt.borrow_mut().on_progress(event));
    let rt = Rc::clone(runtime);
    tracker.on_all_complete(move || rt.borrow_mut().on_load_complete(now()));
}
