use crate::constants::*;
use glam::{Mat3, Mat4};
use scene_core::constants::{CLEAR_COLOR, DIRECTIONAL_LIGHT_POSITION, POINT_LIGHT_POSITION};
use scene_core::geometry::{GeometryId, MeshData};
use scene_core::{FrameInputs, RenderDevice, Rgb, ViewportState};
use std::collections::HashMap;
use web_sys as web;
use wgpu::util::DeviceExt;

mod helpers;
mod targets;
use targets::RenderTargets;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct GlobalUniform {
    view_proj: [[f32; 4]; 4],
    camera_position: [f32; 4],
    directional_light_position: [f32; 4],
    point_light_position: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ObjectConstants {
    model: [[f32; 4]; 4],
    normal: [[f32; 4]; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct OverlayUniform {
    alpha: f32,
    _pad: [f32; 3],
}

struct MeshBuffers {
    vertex: wgpu::Buffer,
    index: wgpu::Buffer,
    index_count: u32,
}

impl MeshBuffers {
    fn upload(device: &wgpu::Device, mesh: &MeshData) -> Self {
        let vertex = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vertices"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_indices"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex,
            index,
            index_count: mesh.indices.len() as u32,
        }
    }
}

/// Per-draw uniform buffer; one per draw slot so every object keeps its
/// own matrices within a single submit.
struct ObjectSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct GpuState {
    canvas: web::HtmlCanvasElement,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    sample_count: u32,
    targets: RenderTargets,

    shading_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    shading_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,
    object_slots: Vec<ObjectSlot>,
    meshes: HashMap<GeometryId, MeshBuffers>,
    shading_revision: Option<u64>,

    overlay_pipeline: wgpu::RenderPipeline,
    overlay_buffer: wgpu::Buffer,
    overlay_bind_group: wgpu::BindGroup,

    logical: (u32, u32),
    pixel_ratio: f32,
    size_dirty: bool,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let sample_count = if adapter
            .get_texture_format_features(format)
            .flags
            .sample_count_supported(MSAA_SAMPLES)
        {
            MSAA_SAMPLES
        } else {
            1
        };
        log::info!("[gpu] surface {:?}, {}x msaa", format, sample_count);
        let targets = RenderTargets::new(&device, width, height, format, sample_count);

        // group 0: camera/lights + shading parameters, group 1: per object
        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[
                helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
                helpers::uniform_entry(1, wgpu::ShaderStages::FRAGMENT),
            ],
        });
        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bgl"),
            entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX)],
        });
        let globals_buffer = helpers::uniform_buffer(&device, "globals", GLOBALS_UNIFORM_SIZE);
        let shading_buffer = helpers::uniform_buffer(&device, "shading", SHADING_UNIFORM_SIZE);
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: shading_buffer.as_entire_binding(),
                },
            ],
        });
        let shading_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shading_shader"),
            source: wgpu::ShaderSource::Wgsl(scene_core::SHADING_WGSL.into()),
        });
        let shading_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("shading_pl"),
            bind_group_layouts: &[&globals_layout, &object_layout],
            push_constant_ranges: &[],
        });
        let shading_pipeline = helpers::make_shading_pipeline(
            &device,
            &shading_layout,
            &shading_shader,
            format,
            sample_count,
        );

        let overlay_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("overlay_bgl"),
            entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::FRAGMENT)],
        });
        let overlay_buffer = helpers::uniform_buffer(&device, "overlay", OVERLAY_UNIFORM_SIZE);
        let overlay_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("overlay_bg"),
            layout: &overlay_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: overlay_buffer.as_entire_binding(),
            }],
        });
        let overlay_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("overlay_shader"),
            source: wgpu::ShaderSource::Wgsl(scene_core::OVERLAY_WGSL.into()),
        });
        let overlay_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("overlay_pl"),
            bind_group_layouts: &[&overlay_layout],
            push_constant_ranges: &[],
        });
        let overlay_pipeline = helpers::make_overlay_pipeline(
            &device,
            &overlay_pl,
            &overlay_shader,
            format,
            sample_count,
        );

        let [r, g, b] = Rgb::from_u32(CLEAR_COLOR).to_linear();
        Ok(Self {
            canvas: canvas.clone(),
            surface,
            device,
            queue,
            config,
            sample_count,
            targets,
            shading_pipeline,
            globals_buffer,
            shading_buffer,
            globals_bind_group,
            object_layout,
            object_slots: Vec::new(),
            meshes: HashMap::new(),
            shading_revision: None,
            overlay_pipeline,
            overlay_buffer,
            overlay_bind_group,
            logical: (width, height),
            pixel_ratio: 1.0,
            size_dirty: false,
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
        })
    }

    /// Reconfigure the swapchain and attachments once per batch of size
    /// or ratio changes.
    fn apply_size(&mut self) {
        if !self.size_dirty {
            return;
        }
        self.size_dirty = false;
        let (width, height) = ViewportState {
            width: self.logical.0,
            height: self.logical.1,
            pixel_ratio: self.pixel_ratio,
        }
        .physical_size();
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.targets.recreate(
            &self.device,
            width,
            height,
            self.config.format,
            self.sample_count,
        );
        log::debug!("[gpu] backing store {}x{}", width, height);
    }

    fn ensure_object_slots(&mut self, count: usize) {
        while self.object_slots.len() < count {
            let buffer = helpers::uniform_buffer(&self.device, "object", OBJECT_UNIFORM_SIZE);
            let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("object_bg"),
                layout: &self.object_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });
            self.object_slots.push(ObjectSlot { buffer, bind_group });
        }
    }

    fn write_frame_uniforms(&mut self, frame: &FrameInputs<'_>) {
        let globals = GlobalUniform {
            view_proj: frame.camera.view_projection().to_cols_array_2d(),
            camera_position: frame.camera.eye.extend(1.0).to_array(),
            directional_light_position: with_w(DIRECTIONAL_LIGHT_POSITION),
            point_light_position: with_w(POINT_LIGHT_POSITION),
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let revision = frame.shading.revision();
        if self.shading_revision != Some(revision) {
            self.queue.write_buffer(
                &self.shading_buffer,
                0,
                bytemuck::bytes_of(frame.shading.block()),
            );
            self.shading_revision = Some(revision);
        }

        let overlay = OverlayUniform {
            alpha: frame.overlay_alpha.clamp(0.0, 1.0),
            _pad: [0.0; 3],
        };
        self.queue
            .write_buffer(&self.overlay_buffer, 0, bytemuck::bytes_of(&overlay));
    }
}

#[inline]
fn with_w(v: [f32; 3]) -> [f32; 4] {
    [v[0], v[1], v[2], 1.0]
}

fn mat3_to_3x4(m: Mat3) -> [[f32; 4]; 3] {
    [
        m.x_axis.extend(0.0).to_array(),
        m.y_axis.extend(0.0).to_array(),
        m.z_axis.extend(0.0).to_array(),
    ]
}

fn object_constants(model: Mat4) -> ObjectConstants {
    let normal = Mat3::from_mat4(model).inverse().transpose();
    ObjectConstants {
        model: model.to_cols_array_2d(),
        normal: mat3_to_3x4(normal),
    }
}

impl RenderDevice for GpuState {
    fn set_size(&mut self, width: u32, height: u32) {
        self.logical = (width.max(1), height.max(1));
        let style = self.canvas.style();
        _ = style.set_property("width", &format!("{}px", self.logical.0));
        _ = style.set_property("height", &format!("{}px", self.logical.1));
        self.size_dirty = true;
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        self.pixel_ratio = ratio;
        self.size_dirty = true;
    }

    fn render(&mut self, frame: &FrameInputs<'_>) -> anyhow::Result<()> {
        self.apply_size();
        self.write_frame_uniforms(frame);

        let draws = frame.scene.draw_list();
        for item in &draws {
            let id = item.geometry.id();
            if !self.meshes.contains_key(&id) && !item.geometry.indices.is_empty() {
                self.meshes
                    .insert(id, MeshBuffers::upload(&self.device, &item.geometry));
            }
        }
        self.ensure_object_slots(draws.len());
        for (slot, item) in self.object_slots.iter().zip(&draws) {
            self.queue.write_buffer(
                &slot.buffer,
                0,
                bytemuck::bytes_of(&object_constants(item.model)),
            );
        }

        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                anyhow::bail!("surface reconfigured; frame skipped");
            }
            Err(e) => return Err(anyhow::anyhow!("{:?}", e)),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let (color_view, resolve_target) = self.targets.color_views(&view);
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_pipeline(&self.shading_pipeline);
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            for (slot, item) in self.object_slots.iter().zip(&draws) {
                let Some(mesh) = self.meshes.get(&item.geometry.id()) else {
                    continue;
                };
                rpass.set_bind_group(1, &slot.bind_group, &[]);
                rpass.set_vertex_buffer(0, mesh.vertex.slice(..));
                rpass.set_index_buffer(mesh.index.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }

            if frame.overlay_alpha > 0.0 {
                rpass.set_pipeline(&self.overlay_pipeline);
                rpass.set_bind_group(0, &self.overlay_bind_group, &[]);
                rpass.draw(0..3, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}
