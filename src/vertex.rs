//! Vertex formats uploaded by the drawables.
//!
//! | Type            | Attribute | Format    | Offset | Location |
//! |-----------------|-----------|-----------|--------|----------|
//! | [`ColorVertex`] | position  | Float32x3 | 0      | 0        |
//! |                 | color     | Float32x4 | 12     | 1        |
//! | [`QuadVertex`]  | position  | Float32x2 | 0      | 0        |
//! |                 | uv        | Float32x2 | 8      | 1        |
//! | [`MeshVertex`]  | position  | Float32x3 | 0      | 0        |
//! |                 | normal    | Float32x3 | 12     | 1        |
//! |                 | uv        | Float32x2 | 24     | 2        |

use glam::{Vec2, Vec3, Vec4};

/// A colored vertex used by all line geometry.
///
/// Each vertex occupies 28 bytes and is laid out with `#[repr(C)]` so it can
/// be cast to bytes with [`bytemuck::cast_slice`].
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 3],
    /// RGBA, each channel in `[0, 1]`.
    pub color: [f32; 4],
}

impl ColorVertex {
    /// The wgpu vertex buffer layout for this vertex type.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<ColorVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            // color
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x4,
            },
        ],
    };

    pub fn new(position: Vec3, color: Vec4) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
        }
    }
}

/// A 2D vertex with texture coordinates, used by [`Quad`](crate::Quad).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl QuadVertex {
    /// The wgpu vertex buffer layout for this vertex type.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<QuadVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            },
            // uv
            wgpu::VertexAttribute {
                offset: 8,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x2,
            },
        ],
    };

    pub fn new(position: Vec2, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            uv: uv.to_array(),
        }
    }
}

/// A lit, textured vertex, written into a
/// [`GeometryBuffer`](crate::GeometryBuffer) by its shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<MeshVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2],
    };

    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_match_struct_sizes() {
        assert_eq!(std::mem::size_of::<ColorVertex>(), 28);
        assert_eq!(ColorVertex::LAYOUT.array_stride, 28);
        assert_eq!(std::mem::size_of::<QuadVertex>(), 16);
        assert_eq!(QuadVertex::LAYOUT.array_stride, 16);
        assert_eq!(std::mem::size_of::<MeshVertex>(), 32);
        assert_eq!(MeshVertex::LAYOUT.array_stride, 32);
    }

    #[test]
    fn mesh_vertex_attributes_are_packed() {
        let offsets: Vec<u64> = MeshVertex::LAYOUT.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 24]);
    }

    #[test]
    fn color_vertex_casts_to_floats() {
        let vertices = [ColorVertex::new(Vec3::new(1.0, 2.0, 3.0), Vec4::new(0.1, 0.2, 0.3, 0.4))];
        let floats: &[f32] = bytemuck::cast_slice(&vertices);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.1, 0.2, 0.3, 0.4]);
    }
}
