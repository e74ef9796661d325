use super::helpers;

/// Size-dependent attachments: an optional multisampled color target that
/// resolves into the swapchain, and the depth buffer.
pub(crate) struct RenderTargets {
    pub(crate) msaa: Option<(wgpu::Texture, wgpu::TextureView)>,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        color_format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> Self {
        let msaa = (sample_count > 1).then(|| {
            helpers::create_render_texture(
                device,
                "msaa_color",
                width,
                height,
                color_format,
                sample_count,
            )
        });
        let (depth_tex, depth_view) = helpers::create_render_texture(
            device,
            "depth",
            width,
            height,
            helpers::DEPTH_FORMAT,
            sample_count,
        );
        Self {
            msaa,
            depth_tex,
            depth_view,
        }
    }

    pub(crate) fn recreate(
        &mut self,
        device: &wgpu::Device,
        width: u32,
        height: u32,
        color_format: wgpu::TextureFormat,
        sample_count: u32,
    ) {
        self.depth_tex.destroy();
        if let Some((tex, _)) = &self.msaa {
            tex.destroy();
        }
        *self = Self::new(device, width, height, color_format, sample_count);
    }

    /// Attachment view plus resolve target for a frame drawn into
    /// `frame_view`.
    pub(crate) fn color_views<'a>(
        &'a self,
        frame_view: &'a wgpu::TextureView,
    ) -> (&'a wgpu::TextureView, Option<&'a wgpu::TextureView>) {
        match &self.msaa {
            Some((_, view)) => (view, Some(frame_view)),
            None => (frame_view, None),
        }
    }
}
