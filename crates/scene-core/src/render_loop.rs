//! Per-frame update: spin, controls, draw.

use crate::camera::CameraControls;
use crate::context::SceneContext;
use crate::device::{FrameInputs, RenderDevice};
use crate::params::ShadingUniforms;

/// Whether the platform should schedule another frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

#[derive(Debug)]
pub struct RenderLoop {
    running: bool,
    frames: u64,
    failed_frames: u64,
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self {
            running: true,
            frames: 0,
            failed_frames: 0,
        }
    }
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// One frame. Rotation is computed from `elapsed_sec` alone, so
    /// dropped frames never accumulate drift. Render errors are logged and
    /// the loop keeps going.
    pub fn tick<D, C>(
        &mut self,
        ctx: &mut SceneContext<D, C>,
        shading: &ShadingUniforms,
        overlay_alpha: f32,
        elapsed_sec: f32,
    ) -> LoopControl
    where
        D: RenderDevice,
        C: CameraControls,
    {
        if !self.running {
            return LoopControl::Stop;
        }
        ctx.scene.apply_rotation(elapsed_sec);
        ctx.controls.update(&mut ctx.camera);

        let frame = FrameInputs {
            scene: &ctx.scene,
            camera: &ctx.camera,
            shading,
            overlay_alpha,
        };
        if let Err(e) = ctx.device.render(&frame) {
            self.failed_frames += 1;
            // avoid flooding the console on a persistent device error
            if self.failed_frames.is_power_of_two() {
                log::error!("[loop] render error (#{}): {:?}", self.failed_frames, e);
            }
        }
        self.frames += 1;
        LoopControl::Continue
    }

    /// Stop scheduling frames. Idempotent.
    pub fn stop(&mut self) {
        if self.running {
            log::info!("[loop] stopped after {} frames", self.frames);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn failed_frames(&self) -> u64 {
        self.failed_frames
    }
}
