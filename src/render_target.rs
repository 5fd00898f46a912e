//! Off-screen color and depth attachments.

use glam::UVec2;

use crate::gpu::GpuContext;

/// Depth format used by every [`RenderTarget`].
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Creates a single-sample 2D texture of `size` and its default view.
pub(crate) fn create_attachment(
    device: &wgpu::Device,
    size: UVec2,
    format: wgpu::TextureFormat,
    usage: wgpu::TextureUsages,
    label: &str,
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: size.x,
            height: size.y,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}

/// An off-screen framebuffer: a color texture that can be rendered to and
/// sampled afterwards, plus a matching depth texture.
///
/// A typical use is rendering a scene into the target and then showing it on
/// a [`QuadMesh`](crate::QuadMesh) through [`QuadPass`](crate::QuadPass).
pub struct RenderTarget {
    /// The color texture. Same format as the surface.
    pub color: wgpu::Texture,
    /// View used both as a color attachment and as a shader input.
    pub color_view: wgpu::TextureView,
    pub depth: wgpu::Texture,
    pub depth_view: wgpu::TextureView,
    size: UVec2,
}

impl RenderTarget {
    /// Creates a render target of `size` pixels.
    ///
    /// Zero dimensions are raised to 1, wgpu does not allow empty textures.
    pub fn new(gpu: &GpuContext, size: UVec2, label: &str) -> Self {
        let size = size.max(UVec2::ONE);

        let (color, color_view) = create_attachment(
            &gpu.device,
            size,
            gpu.config.format,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            label,
        );
        let (depth, depth_view) = create_attachment(
            &gpu.device,
            size,
            DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
            &format!("{} Depth", label),
        );

        log::debug!("created render target '{}' ({}x{})", label, size.x, size.y);

        Self {
            color,
            color_view,
            depth,
            depth_view,
            size,
        }
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// Recreates the attachments if `size` differs from the current one.
    ///
    /// Call on window resize. Returns `true` when the textures were replaced,
    /// in which case any bind group holding the old view must be rebuilt.
    pub fn ensure_size(&mut self, gpu: &GpuContext, size: UVec2, label: &str) -> bool {
        if self.size == size.max(UVec2::ONE) {
            return false;
        }
        *self = Self::new(gpu, size, label);
        true
    }

    /// Begins a render pass that clears both attachments.
    pub fn begin_pass<'e>(
        &self,
        encoder: &'e mut wgpu::CommandEncoder,
        clear: wgpu::Color,
    ) -> wgpu::RenderPass<'e> {
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Render Target Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.color_view,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        })
    }
}
