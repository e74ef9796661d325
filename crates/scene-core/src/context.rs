use crate::camera::{Camera, CameraControls, OrbitControls};
use crate::device::RenderDevice;
use crate::scene::Scene;
use crate::viewport::{ViewportController, ViewportState};

/// Everything the frame loop and the viewport controller touch, owned in
/// one place and passed by `&mut` to whoever needs it.
pub struct SceneContext<D: RenderDevice, C: CameraControls = OrbitControls> {
    pub scene: Scene,
    pub camera: Camera,
    pub controls: C,
    pub viewport: ViewportState,
    pub device: D,
}

impl<D: RenderDevice, C: CameraControls> SceneContext<D, C> {
    /// Build a context and run the initial viewport update, so the camera
    /// and device agree on size before the first frame.
    pub fn new(
        scene: Scene,
        controls: C,
        device: D,
        viewport: &ViewportController,
        width: u32,
        height: u32,
        device_pixel_ratio: f32,
    ) -> Self {
        let initial = viewport.measure(width, height, device_pixel_ratio);
        let mut ctx = Self {
            scene,
            camera: Camera::new(initial.aspect()),
            controls,
            viewport: initial,
            device,
        };
        viewport.apply(&mut ctx, width, height, device_pixel_ratio);
        ctx
    }
}
