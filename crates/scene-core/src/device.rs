use crate::camera::Camera;
use crate::params::ShadingUniforms;
use crate::scene::Scene;

/// Everything one draw needs.
pub struct FrameInputs<'a> {
    pub scene: &'a Scene,
    pub camera: &'a Camera,
    pub shading: &'a ShadingUniforms,
    /// Overlay plane opacity; `0.0` means the overlay can be skipped.
    pub overlay_alpha: f32,
}

/// The rendering backend as seen by the frame loop and viewport controller.
pub trait RenderDevice {
    /// Resize the render surface to `width` x `height` logical pixels.
    fn set_size(&mut self, width: u32, height: u32);
    fn set_pixel_ratio(&mut self, ratio: f32);
    /// Draw the whole scene through `frame.camera`.
    fn render(&mut self, frame: &FrameInputs<'_>) -> anyhow::Result<()>;
}
