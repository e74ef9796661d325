//! Window geometry and the updates that must follow it.

use crate::camera::CameraControls;
use crate::constants::PIXEL_RATIO_CAP;
use crate::context::SceneContext;
use crate::device::RenderDevice;

/// Latest window geometry; no history is kept.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
}

impl ViewportState {
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Backing-store size in device pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        (
            ((self.width as f32 * self.pixel_ratio).round() as u32).max(1),
            ((self.height as f32 * self.pixel_ratio).round() as u32).max(1),
        )
    }
}

/// Recomputes [`ViewportState`] and pushes it into camera and device.
#[derive(Clone, Copy, Debug)]
pub struct ViewportController {
    pub pixel_ratio_cap: f32,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self {
            pixel_ratio_cap: PIXEL_RATIO_CAP,
        }
    }
}

impl ViewportController {
    pub fn measure(&self, width: u32, height: u32, device_pixel_ratio: f32) -> ViewportState {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        ViewportState {
            width: width.max(1),
            height: height.max(1),
            pixel_ratio: dpr.min(self.pixel_ratio_cap),
        }
    }

    /// Camera aspect and projection first, then surface size, then pixel
    /// ratio. Runs inside one callback, so no frame sees a partial update.
    pub fn apply<D, C>(
        &self,
        ctx: &mut SceneContext<D, C>,
        width: u32,
        height: u32,
        device_pixel_ratio: f32,
    ) -> ViewportState
    where
        D: RenderDevice,
        C: CameraControls,
    {
        let state = self.measure(width, height, device_pixel_ratio);
        ctx.viewport = state;
        ctx.camera.set_aspect(state.aspect());
        ctx.device.set_size(state.width, state.height);
        ctx.device.set_pixel_ratio(state.pixel_ratio);
        log::debug!(
            "[viewport] {}x{} @{:.2} (aspect {:.3})",
            state.width,
            state.height,
            state.pixel_ratio,
            state.aspect()
        );
        state
    }
}
