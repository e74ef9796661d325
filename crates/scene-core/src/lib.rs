pub mod camera;
pub mod clock;
pub mod config;
pub mod constants;
pub mod context;
pub mod device;
pub mod error;
pub mod geometry;
pub mod loading;
pub mod mesh_loader;
pub mod overlay;
pub mod panel;
pub mod params;
pub mod render_loop;
pub mod runtime;
pub mod scene;
pub mod timeline;
pub mod viewport;

pub static SHADING_WGSL: &str = include_str!("../shaders/shading.wgsl");
pub static OVERLAY_WGSL: &str = include_str!("../shaders/overlay.wgsl");

pub use camera::{Camera, CameraControls, OrbitControls};
pub use clock::Clock;
pub use config::SceneConfig;
pub use context::SceneContext;
pub use device::{FrameInputs, RenderDevice};
pub use error::{AssetLoadFailure, Result, SceneError};
pub use loading::{AssetLoadTracker, AssetOutcome, AssetTicket, LoadEvent};
pub use overlay::{OverlayState, OverlayTransition, TransitionConfig, TransitionSignal};
pub use panel::{ControlPanel, ControlPanelBinder};
pub use params::{
    ParamField, ParamValue, Rgb, ShadingBlock, ShadingParameterStore, ShadingParameters,
    ShadingUniforms, UniformSink, UniformSlot,
};
pub use render_loop::{LoopControl, RenderLoop};
pub use runtime::{connect_tracker, FrameOutcome, SceneRuntime, SharedStore};
pub use scene::{Scene, SceneNode};
pub use viewport::{ViewportController, ViewportState};
