//! Axis-aligned textured rectangles.
//!
//! [`Quad`] holds the rectangle and builds its vertices; [`QuadMesh`] owns the
//! GPU buffers for one and rewrites them in place when the rectangle moves.

use glam::Vec2;

use crate::buffer::{Buffer, BufferKind};
use crate::gpu::GpuContext;
use crate::vertex::QuadVertex;

/// A rectangle at `pos` (lower-left corner) spanning `size`.
///
/// The default covers normalized device coordinates, `(-1, -1)` to `(1, 1)`,
/// which makes it a fullscreen quad.
///
/// # Vertex Order
///
/// | Index | Corner       | UV       |
/// |-------|--------------|----------|
/// | 0     | top-left     | `(0, 0)` |
/// | 1     | bottom-left  | `(0, 1)` |
/// | 2     | bottom-right | `(1, 1)` |
/// | 3     | top-right    | `(1, 0)` |
///
/// UVs follow wgpu's convention of `v = 0` at the top row of a texture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    pos: Vec2,
    size: Vec2,
}

impl Default for Quad {
    fn default() -> Self {
        Self::new(Vec2::splat(-1.0), Vec2::splat(2.0))
    }
}

impl Quad {
    /// Two counter-clockwise triangles over [`Quad::vertices`].
    pub const INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

    const UVS: [Vec2; 4] = [
        Vec2::new(0.0, 0.0),
        Vec2::new(0.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(1.0, 0.0),
    ];

    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    pub fn vertices(&self) -> [QuadVertex; 4] {
        let min = self.pos;
        let max = self.pos + self.size;
        let corners = [
            Vec2::new(min.x, max.y),
            Vec2::new(min.x, min.y),
            Vec2::new(max.x, min.y),
            Vec2::new(max.x, max.y),
        ];
        std::array::from_fn(|i| QuadVertex::new(corners[i], Self::UVS[i]))
    }
}

/// GPU-resident vertex and index buffers for a [`Quad`].
#[derive(Debug)]
pub struct QuadMesh {
    pub(crate) vertices: Buffer,
    pub(crate) indices: Buffer,
    quad: Quad,
}

impl QuadMesh {
    pub fn new(gpu: &GpuContext, quad: Quad) -> Self {
        let vertices = Buffer::with_data(
            gpu,
            BufferKind::Vertex,
            &quad.vertices(),
            "Quad Vertex Buffer",
        );
        let indices =
            Buffer::with_data(gpu, BufferKind::Index, &Quad::INDICES, "Quad Index Buffer");

        Self {
            vertices,
            indices,
            quad,
        }
    }

    pub fn quad(&self) -> Quad {
        self.quad
    }

    /// Moves or resizes the quad, rewriting the vertex buffer in place.
    pub fn update(&mut self, gpu: &GpuContext, quad: Quad) {
        if quad == self.quad {
            return;
        }
        self.quad = quad;
        self.vertices.write(gpu, &quad.vertices());
    }

    pub(crate) fn index_count(&self) -> u32 {
        Quad::INDICES.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_fullscreen() {
        let quad = Quad::default();
        let positions: Vec<[f32; 2]> = quad.vertices().iter().map(|v| v.position).collect();
        assert_eq!(
            positions,
            vec![[-1.0, 1.0], [-1.0, -1.0], [1.0, -1.0], [1.0, 1.0]]
        );
    }

    #[test]
    fn corners_follow_pos_and_size() {
        let mut quad = Quad::new(Vec2::new(10.0, 20.0), Vec2::new(4.0, 2.0));
        quad.set_pos(Vec2::new(1.0, 2.0));
        quad.set_size(Vec2::new(3.0, 5.0));

        let v = quad.vertices();
        assert_eq!(v[0].position, [1.0, 7.0]);
        assert_eq!(v[1].position, [1.0, 2.0]);
        assert_eq!(v[2].position, [4.0, 2.0]);
        assert_eq!(v[3].position, [4.0, 7.0]);
    }

    #[test]
    fn uvs_do_not_depend_on_geometry() {
        let a = Quad::default().vertices();
        let b = Quad::new(Vec2::new(5.0, 5.0), Vec2::new(0.5, 8.0)).vertices();
        for (a, b) in a.iter().zip(b.iter()) {
            assert_eq!(a.uv, b.uv);
        }
        assert_eq!(a[0].uv, [0.0, 0.0]);
        assert_eq!(a[2].uv, [1.0, 1.0]);
    }

    #[test]
    fn triangles_wind_counter_clockwise() {
        let v = Quad::default().vertices();
        for tri in Quad::INDICES.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec2::from(v[i as usize].position));
            assert!((b - a).perp_dot(c - a) > 0.0);
        }
    }
}
