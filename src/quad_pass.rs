//! Render pass that shows a texture on a [`QuadMesh`].
//!
//! The usual pairing is a [`RenderTarget`](crate::RenderTarget) rendered
//! earlier in the frame and a fullscreen [`Quad`](crate::Quad):
//!
//! ```ignore
//! let quad = QuadMesh::new(&gpu, Quad::default());
//! let pass = QuadPass::new(&gpu, None);
//!
//! pass.render(&gpu, &mut screen_pass, &quad, &target.color_view, Mat4::IDENTITY);
//! ```

use glam::Mat4;

use crate::gpu::GpuContext;
use crate::shader::Shader;
use crate::line_pass::{depth_state, mvp_bind_group, mvp_bind_group_layout};
use crate::quad::QuadMesh;
use crate::texture::Texture;
use crate::vertex::QuadVertex;

/// Draws a texture view onto a quad with linear filtering.
pub struct QuadPass {
    pipeline: wgpu::RenderPipeline,
    mvp_layout: wgpu::BindGroupLayout,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
}

impl QuadPass {
    pub fn new(gpu: &GpuContext, depth_format: Option<wgpu::TextureFormat>) -> Self {
        let device = &gpu.device;

        let shader = Shader::builtin(device, include_str!("shaders/quad.wgsl"), "Quad Shader");

        let mvp_layout = mvp_bind_group_layout(device);

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Quad Texture Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Quad Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Quad Pipeline Layout"),
            bind_group_layouts: &[&mvp_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Quad Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader.module(),
                entry_point: Some("vs"),
                buffers: &[QuadVertex::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader.module(),
                entry_point: Some("fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                ..Default::default()
            },
            depth_stencil: depth_state(depth_format),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            mvp_layout,
            texture_layout,
            sampler,
        }
    }

    /// Draws `view` onto `quad`, sampled with the pass's linear sampler.
    pub fn render(
        &self,
        gpu: &GpuContext,
        render_pass: &mut wgpu::RenderPass,
        quad: &QuadMesh,
        view: &wgpu::TextureView,
        mvp: Mat4,
    ) {
        self.draw(gpu, render_pass, quad, view, &self.sampler, mvp);
    }

    /// Draws `texture` onto `quad` with the texture's own sampler.
    pub fn render_texture(
        &self,
        gpu: &GpuContext,
        render_pass: &mut wgpu::RenderPass,
        quad: &QuadMesh,
        texture: &Texture,
        mvp: Mat4,
    ) {
        self.draw(gpu, render_pass, quad, texture.view(), texture.sampler(), mvp);
    }

    fn draw(
        &self,
        gpu: &GpuContext,
        render_pass: &mut wgpu::RenderPass,
        quad: &QuadMesh,
        view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
        mvp: Mat4,
    ) {
        let mvp_group = mvp_bind_group(&gpu.device, &self.mvp_layout, mvp);
        let texture_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Quad Texture Bind Group"),
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &mvp_group, &[]);
        render_pass.set_bind_group(1, &texture_group, &[]);
        render_pass.set_vertex_buffer(0, quad.vertices.slice());
        render_pass.set_index_buffer(quad.indices.slice(), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..quad.index_count(), 0, 0..1);
    }
}
