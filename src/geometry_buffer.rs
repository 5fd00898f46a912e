//! Multi-attachment render target for deferred shading.
//!
//! A [`GeometryBuffer`] holds four color attachments (diffuse, normal,
//! position, specular) plus depth. The bundled [`GeometryBuffer::shader`]
//! fills them from [`MeshVertex`](crate::MeshVertex) geometry; a later pass
//! samples all four through [`GeometryBuffer::bind_group`].
//!
//! ```ignore
//! let gbuffer = GeometryBuffer::new(&gpu, gpu.screen_size(), "GBuffer");
//! let shader = GeometryBuffer::shader(&gpu);
//! // pipeline: MeshVertex::LAYOUT, targets: &GeometryBuffer::color_targets()
//!
//! {
//!     let mut pass = gbuffer.begin_pass(&mut encoder, wgpu::Color::TRANSPARENT);
//!     // draw meshes
//! }
//!
//! let layout = GeometryBuffer::bind_group_layout(&gpu.device);
//! let lighting_inputs = gbuffer.bind_group(&gpu.device, &layout, &sampler);
//! ```

use glam::UVec2;

use crate::gpu::GpuContext;
use crate::render_target::{DEPTH_FORMAT, create_attachment};
use crate::shader::Shader;

/// One color attachment of a [`GeometryBuffer`], in attachment order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GBufferAttachment {
    Diffuse,
    Normal,
    Position,
    Specular,
}

impl GBufferAttachment {
    pub const ALL: [GBufferAttachment; 4] = [
        GBufferAttachment::Diffuse,
        GBufferAttachment::Normal,
        GBufferAttachment::Position,
        GBufferAttachment::Specular,
    ];

    /// Color attachment location, and texture binding in
    /// [`GeometryBuffer::bind_group_layout`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn format(self) -> wgpu::TextureFormat {
        match self {
            GBufferAttachment::Diffuse => wgpu::TextureFormat::Rgba8UnormSrgb,
            GBufferAttachment::Normal | GBufferAttachment::Position => {
                wgpu::TextureFormat::Rgba16Float
            }
            GBufferAttachment::Specular => wgpu::TextureFormat::Rgba8Unorm,
        }
    }

    fn name(self) -> &'static str {
        match self {
            GBufferAttachment::Diffuse => "Diffuse",
            GBufferAttachment::Normal => "Normal",
            GBufferAttachment::Position => "Position",
            GBufferAttachment::Specular => "Specular",
        }
    }
}

/// Binding of the sampler in [`GeometryBuffer::bind_group_layout`], after
/// the four textures.
pub const GBUFFER_SAMPLER_BINDING: u32 = 4;

/// Diffuse, normal, position and specular attachments with a shared depth
/// texture, all the same size.
pub struct GeometryBuffer {
    attachments: [(wgpu::Texture, wgpu::TextureView); 4],
    depth: (wgpu::Texture, wgpu::TextureView),
    size: UVec2,
}

impl GeometryBuffer {
    /// Creates a geometry buffer of `size` pixels. Zero dimensions are raised
    /// to 1.
    pub fn new(gpu: &GpuContext, size: UVec2, label: &str) -> Self {
        let size = size.max(UVec2::ONE);

        let attachments = GBufferAttachment::ALL.map(|attachment| {
            create_attachment(
                &gpu.device,
                size,
                attachment.format(),
                wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
                &format!("{} {}", label, attachment.name()),
            )
        });
        let depth = create_attachment(
            &gpu.device,
            size,
            DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
            &format!("{} Depth", label),
        );

        log::debug!("created geometry buffer '{}' ({}x{})", label, size.x, size.y);

        Self {
            attachments,
            depth,
            size,
        }
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// Recreates every attachment if `size` differs from the current one.
    /// Returns `true` when bind groups over the old views must be rebuilt.
    pub fn ensure_size(&mut self, gpu: &GpuContext, size: UVec2, label: &str) -> bool {
        if self.size == size.max(UVec2::ONE) {
            return false;
        }
        *self = Self::new(gpu, size, label);
        true
    }

    pub fn texture(&self, attachment: GBufferAttachment) -> &wgpu::Texture {
        &self.attachments[attachment.index()].0
    }

    pub fn view(&self, attachment: GBufferAttachment) -> &wgpu::TextureView {
        &self.attachments[attachment.index()].1
    }

    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth.1
    }

    /// Color targets matching the attachments, for pipelines that write into
    /// this buffer.
    pub fn color_targets() -> [Option<wgpu::ColorTargetState>; 4] {
        GBufferAttachment::ALL.map(|attachment| {
            Some(wgpu::ColorTargetState {
                format: attachment.format(),
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })
        })
    }

    /// The bundled shader that writes [`MeshVertex`](crate::MeshVertex)
    /// geometry into the four attachments.
    ///
    /// Bind group 0 holds the `mvp` uniform, group 1 the diffuse texture
    /// (binding 0) and its sampler (binding 1). Entry points are `vs` and
    /// `fs`.
    pub fn shader(gpu: &GpuContext) -> Shader {
        Shader::builtin(
            &gpu.device,
            include_str!("shaders/gbuffer.wgsl"),
            "GBuffer Shader",
        )
    }

    /// Begins a pass that clears every attachment to `clear` and depth to 1.
    pub fn begin_pass<'e>(
        &self,
        encoder: &'e mut wgpu::CommandEncoder,
        clear: wgpu::Color,
    ) -> wgpu::RenderPass<'e> {
        let color_attachments = self.attachments.each_ref().map(|(_, view)| {
            Some(wgpu::RenderPassColorAttachment {
                view,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
            })
        });

        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Geometry Buffer Pass"),
            color_attachments: &color_attachments,
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth.1,
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

    /// Layout for sampling all four attachments in a later pass: textures at
    /// bindings 0..4 in [`GBufferAttachment`] order, then a filtering sampler.
    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Geometry Buffer Bind Group Layout"),
            entries: &layout_entries(),
        })
    }

    /// Binds the four attachments and `sampler` for a lighting pass.
    pub fn bind_group(
        &self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        let [diffuse, normal, position, specular] =
            GBufferAttachment::ALL.map(|attachment| self.view(attachment));

        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Geometry Buffer Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(diffuse),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(normal),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(position),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(specular),
                },
                wgpu::BindGroupEntry {
                    binding: GBUFFER_SAMPLER_BINDING,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }
}

fn layout_entries() -> [wgpu::BindGroupLayoutEntry; 5] {
    let texture = |binding: u32| wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    };

    [
        texture(0),
        texture(1),
        texture(2),
        texture(3),
        wgpu::BindGroupLayoutEntry {
            binding: GBUFFER_SAMPLER_BINDING,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachments_are_in_location_order() {
        let indices: Vec<usize> = GBufferAttachment::ALL.iter().map(|a| a.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn color_targets_follow_attachment_formats() {
        let targets = GeometryBuffer::color_targets();
        for (target, attachment) in targets.iter().zip(GBufferAttachment::ALL) {
            let target = target.as_ref().unwrap();
            assert_eq!(target.format, attachment.format());
            assert!(target.blend.is_none());
        }
        assert!(GBufferAttachment::Diffuse.format().is_srgb());
        assert!(!GBufferAttachment::Normal.format().is_srgb());
    }

    #[test]
    fn attachments_fit_default_limits() {
        let limits = wgpu::Limits::default();
        let bytes: u32 = GBufferAttachment::ALL
            .iter()
            .map(|a| a.format().target_pixel_byte_cost().unwrap())
            .sum();
        assert!(bytes <= limits.max_color_attachment_bytes_per_sample);
        assert!(GBufferAttachment::ALL.len() as u32 <= limits.max_color_attachments);
    }

    #[test]
    fn layout_binds_textures_then_sampler() {
        let entries = layout_entries();
        for (i, entry) in entries.iter().take(4).enumerate() {
            assert_eq!(entry.binding, i as u32);
            assert!(matches!(entry.ty, wgpu::BindingType::Texture { .. }));
        }
        assert_eq!(entries[4].binding, GBUFFER_SAMPLER_BINDING);
        assert!(matches!(entries[4].ty, wgpu::BindingType::Sampler(_)));
    }

    #[test]
    fn shader_writes_every_attachment() {
        let source = include_str!("shaders/gbuffer.wgsl");
        for location in 0..GBufferAttachment::ALL.len() {
            assert!(source.contains(&format!("@location({location})")));
        }
    }
}
