//! Render pass for line geometry.
//!
//! [`LinePass`] draws anything implementing [`Drawable`]: grids, lines and
//! markers. Each [`LineDraw`] carries its own MVP matrix, usually
//! `camera.proj_matrix() * camera.view_matrix() * transform.matrix()`.
//!
//! # Example
//!
//! ```ignore
//! let pass = LinePass::new(&gpu, None);
//! let grid = Grid::new(10, Vec4::splat(0.6), true);
//! let view_proj = camera.proj_matrix() * camera.view_matrix();
//!
//! pass.render(&gpu, &mut render_pass, &[LineDraw::new(&grid, view_proj)]);
//! ```

use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::buffer::{Buffer, BufferKind};
use crate::drawable::{Drawable, LineTopology};
use crate::gpu::GpuContext;
use crate::shader::Shader;
use crate::vertex::ColorVertex;

/// The `mvp` uniform shared by the line and quad shaders.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MvpUniforms {
    pub mvp: [[f32; 4]; 4],
}

impl MvpUniforms {
    pub fn new(mvp: Mat4) -> Self {
        Self {
            mvp: mvp.to_cols_array_2d(),
        }
    }
}

pub(crate) fn mvp_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("MVP Bind Group Layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

/// Uploads `mvp` into a fresh uniform buffer and binds it.
///
/// Queue writes land before the pass executes, so each draw needs its own
/// buffer.
pub(crate) fn mvp_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    mvp: Mat4,
) -> wgpu::BindGroup {
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("MVP Uniforms"),
        contents: bytemuck::cast_slice(&[MvpUniforms::new(mvp)]),
        usage: wgpu::BufferUsages::UNIFORM,
    });

    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("MVP Bind Group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    })
}

pub(crate) fn depth_state(format: Option<wgpu::TextureFormat>) -> Option<wgpu::DepthStencilState> {
    format.map(|format| wgpu::DepthStencilState {
        format,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::LessEqual,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    })
}

/// One drawable with the matrix to draw it with.
pub struct LineDraw<'a> {
    pub drawable: &'a dyn Drawable,
    pub mvp: Mat4,
}

impl<'a> LineDraw<'a> {
    pub fn new(drawable: &'a dyn Drawable, mvp: Mat4) -> Self {
        Self { drawable, mvp }
    }
}

/// Draws [`Drawable`] line geometry with a per-draw MVP matrix.
///
/// Holds one pipeline for line lists and one for line strips. Pipelines are
/// built for the surface format, with a depth test when `depth_format` is
/// given (use it when drawing into a [`RenderTarget`](crate::RenderTarget)).
pub struct LinePass {
    list_pipeline: wgpu::RenderPipeline,
    strip_pipeline: wgpu::RenderPipeline,
    mvp_layout: wgpu::BindGroupLayout,
}

impl LinePass {
    pub fn new(gpu: &GpuContext, depth_format: Option<wgpu::TextureFormat>) -> Self {
        let device = &gpu.device;

        let shader = Shader::builtin(device, include_str!("shaders/line.wgsl"), "Line Shader");

        let mvp_layout = mvp_bind_group_layout(device);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Line Pipeline Layout"),
            bind_group_layouts: &[&mvp_layout],
            push_constant_ranges: &[],
        });

        let create_pipeline = |topology: LineTopology, label: &str| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: shader.module(),
                    entry_point: Some("vs"),
                    buffers: &[ColorVertex::LAYOUT],
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
                    topology: topology.to_wgpu(),
                    ..Default::default()
                },
                depth_stencil: depth_state(depth_format),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        let list_pipeline = create_pipeline(LineTopology::List, "Line List Pipeline");
        let strip_pipeline = create_pipeline(LineTopology::Strip, "Line Strip Pipeline");

        Self {
            list_pipeline,
            strip_pipeline,
            mvp_layout,
        }
    }

    /// Uploads and draws each entry of `draws`.
    ///
    /// Drawables with fewer than two vertices are skipped.
    pub fn render(&self, gpu: &GpuContext, render_pass: &mut wgpu::RenderPass, draws: &[LineDraw]) {
        for draw in draws {
            let vertices = draw.drawable.vertices();
            if vertices.len() < 2 {
                continue;
            }

            let vertex_buffer =
                Buffer::with_data(gpu, BufferKind::Vertex, &vertices, "Line Vertex Buffer");
            let bind_group = mvp_bind_group(&gpu.device, &self.mvp_layout, draw.mvp);

            let pipeline = match draw.drawable.topology() {
                LineTopology::List => &self.list_pipeline,
                LineTopology::Strip => &self.strip_pipeline,
            };

            render_pass.set_pipeline(pipeline);
            render_pass.set_bind_group(0, &bind_group, &[]);
            render_pass.set_vertex_buffer(0, vertex_buffer.slice());
            render_pass.draw(0..vertices.len() as u32, 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniforms_are_column_major() {
        let mvp = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let uniforms = MvpUniforms::new(mvp);
        assert_eq!(uniforms.mvp[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(std::mem::size_of::<MvpUniforms>(), 64);
    }

    #[test]
    fn depth_state_only_when_requested() {
        assert!(depth_state(None).is_none());
        let state = depth_state(Some(wgpu::TextureFormat::Depth32Float)).unwrap();
        assert_eq!(state.format, wgpu::TextureFormat::Depth32Float);
        assert!(state.depth_write_enabled);
    }

    #[test]
    fn topology_maps_to_wgpu() {
        assert_eq!(LineTopology::List.to_wgpu(), wgpu::PrimitiveTopology::LineList);
        assert_eq!(LineTopology::Strip.to_wgpu(), wgpu::PrimitiveTopology::LineStrip);
    }
}
