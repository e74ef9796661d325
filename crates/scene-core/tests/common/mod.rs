#![allow(dead_code)]

use scene_core::panel::{ColorCallback, ControlPanel, ToggleCallback};
use scene_core::{FrameInputs, RenderDevice, Rgb, SceneConfig, SceneRuntime, UniformSlot};
use std::time::Duration;

/// What a frame looked like when it reached the device.
#[derive(Clone, Debug)]
pub struct DrawRecord {
    pub draw_items: usize,
    pub loaded: usize,
    pub aspect: f32,
    pub overlay_alpha: f32,
    pub directional_on: bool,
    pub color: [f32; 3],
    pub rotation: [f32; 2],
}

#[derive(Clone, Debug, PartialEq)]
pub enum DeviceCall {
    SetSize(u32, u32),
    SetPixelRatio(f32),
    Render,
}

/// Render device that remembers every call.
#[derive(Default)]
pub struct RecordingDevice {
    pub calls: Vec<DeviceCall>,
    pub draws: Vec<DrawRecord>,
    pub fail_renders: bool,
}

impl RenderDevice for RecordingDevice {
    fn set_size(&mut self, width: u32, height: u32) {
        self.calls.push(DeviceCall::SetSize(width, height));
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        self.calls.push(DeviceCall::SetPixelRatio(ratio));
    }

    fn render(&mut self, frame: &FrameInputs<'_>) -> anyhow::Result<()> {
        self.calls.push(DeviceCall::Render);
        let color = match frame.shading.read(UniformSlot::Color) {
            scene_core::params::SlotValue::Color(c) => c,
            other => panic!("color slot holds {:?}", other),
        };
        let rotation = frame
            .scene
            .statics()
            .first()
            .map(|n| [n.transform().rotation.x, n.transform().rotation.y])
            .unwrap_or_default();
        self.draws.push(DrawRecord {
            draw_items: frame.scene.draw_list().len(),
            loaded: frame.scene.loaded().len(),
            aspect: frame.camera.aspect(),
            overlay_alpha: frame.overlay_alpha,
            directional_on: frame.shading.block().directional_light_on != 0,
            color,
            rotation,
        });
        if self.fail_renders {
            anyhow::bail!("surface lost");
        }
        Ok(())
    }
}

/// Control panel that keeps the registered callbacks so tests can play
/// the user.
#[derive(Default)]
pub struct RecordingPanel {
    pub labels: Vec<String>,
    pub colors: Vec<(String, Rgb, ColorCallback)>,
    pub toggles: Vec<(String, bool, ToggleCallback)>,
}

impl RecordingPanel {
    pub fn pick_color(&mut self, label: &str, value: Rgb) {
        let entry = self
            .colors
            .iter_mut()
            .find(|(l, _, _)| l == label)
            .unwrap_or_else(|| panic!("no color control {label}"));
        (entry.2)(value);
    }

    pub fn flip(&mut self, label: &str, value: bool) {
        let entry = self
            .toggles
            .iter_mut()
            .find(|(l, _, _)| l == label)
            .unwrap_or_else(|| panic!("no toggle control {label}"));
        (entry.2)(value);
    }

    pub fn seeded_toggle(&self, label: &str) -> Option<bool> {
        self.toggles
            .iter()
            .find(|(l, _, _)| l == label)
            .map(|(_, v, _)| *v)
    }

    pub fn seeded_color(&self, label: &str) -> Option<Rgb> {
        self.colors
            .iter()
            .find(|(l, _, _)| l == label)
            .map(|(_, v, _)| *v)
    }
}

impl ControlPanel for RecordingPanel {
    fn add_color(&mut self, label: &str, current: Rgb, on_change: ColorCallback) {
        self.labels.push(label.to_string());
        self.colors.push((label.to_string(), current, on_change));
    }

    fn add_toggle(&mut self, label: &str, current: bool, on_change: ToggleCallback) {
        self.labels.push(label.to_string());
        self.toggles.push((label.to_string(), current, on_change));
    }
}

pub fn runtime(width: u32, height: u32) -> SceneRuntime<RecordingDevice> {
    SceneRuntime::new(
        &SceneConfig::default(),
        RecordingDevice::default(),
        Default::default(),
        width,
        height,
        1.0,
    )
}

pub fn secs(s: f32) -> Duration {
    Duration::from_secs_f32(s)
}
