//! # glpp
//!
//! **Thin, owned wrappers over wgpu plus the camera and transform math that
//! feeds them.**
//!
//! GPU resources ([`Buffer`], [`Shader`], [`Texture`], [`RenderTarget`],
//! [`GeometryBuffer`], [`QuadMesh`], the render passes) are plain structs
//! that release their wgpu handles when dropped.
//! Drawables ([`Grid`], [`Line`], [`Mark`], [`Markers`], [`LiveMarker`])
//! build their geometry on the CPU and are drawn by [`LinePass`].
//!
//! ## Quick Start
//!
//! ```
//! use glpp::*;
//!
//! let mut camera = Camera::new(UVec2::new(800, 600)).with_fov(90.0);
//! camera.move_dolly(Vec3::new(0.0, 1.0, 5.0));
//!
//! let mut model = Transform::new();
//! model.rotate_euler(Vec3::new(0.0, 0.5, 0.0));
//!
//! let mvp = camera.proj_matrix() * camera.view_matrix() * model.matrix();
//! let grid = Grid::new(10, Vec4::new(0.6, 0.6, 0.6, 1.0), true);
//! let draw = LineDraw::new(&grid, mvp);
//! assert_eq!(draw.drawable.vertices().len(), 84);
//! ```

mod buffer;
mod camera;
mod dolly;
mod drawable;
mod error;
mod geometry_buffer;
mod gpu;
mod grid;
mod input;
mod line;
mod line_pass;
mod marker;
mod quad;
mod quad_pass;
mod render_target;
mod shader;
mod texture;
mod transform;
mod vertex;

pub use buffer::{Buffer, BufferArray, BufferKind};
pub use camera::{Camera, ProjectionMode};
pub use dolly::{DollyConfig, DollyController};
pub use drawable::{Drawable, LineTopology};
pub use error::{BufferError, GpuError, ShaderError, TextureError};
pub use geometry_buffer::{GBUFFER_SAMPLER_BINDING, GBufferAttachment, GeometryBuffer};
pub use gpu::GpuContext;
pub use grid::Grid;
pub use input::Input;
pub use line::{Line, LineMode};
pub use line_pass::{LineDraw, LinePass};
pub use marker::{LiveMarker, Mark, MarkShape, Markers};
pub use quad::{Quad, QuadMesh};
pub use quad_pass::QuadPass;
pub use render_target::{DEPTH_FORMAT, RenderTarget};
pub use shader::{Shader, read_source};
pub use texture::Texture;
pub use transform::Transform;
pub use vertex::{ColorVertex, MeshVertex, QuadVertex};

// Re-export glam math types for convenience
pub use glam::{Mat4, Quat, UVec2, Vec2, Vec3, Vec4};

// Re-export the winit key codes used by the dolly controls
pub use winit::keyboard::KeyCode;
