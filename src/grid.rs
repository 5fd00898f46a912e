use glam::{Vec3, Vec4};

use crate::drawable::Drawable;
use crate::vertex::ColorVertex;

const X_AXIS_COLOR: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
const Z_AXIS_COLOR: Vec4 = Vec4::new(0.0, 0.0, 1.0, 1.0);

/// A square line grid on the XZ plane, centred on the origin.
///
/// Lines sit at every integer offset in `-size..=size` along both axes and
/// span the full width of the grid. With `color_axis` set, the line along
/// the X axis is drawn red and the line along the Z axis blue.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    size: u32,
    color: Vec4,
    color_axis: bool,
}

impl Grid {
    pub fn new(size: u32, color: Vec4, color_axis: bool) -> Self {
        Self {
            size,
            color,
            color_axis,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn set_size(&mut self, size: u32) {
        self.size = size;
    }

    pub fn color(&self) -> Vec4 {
        self.color
    }

    pub fn set_color(&mut self, color: Vec4) {
        self.color = color;
    }

    pub fn color_axis(&self) -> bool {
        self.color_axis
    }

    pub fn set_color_axis(&mut self, color_axis: bool) {
        self.color_axis = color_axis;
    }
}

impl Drawable for Grid {
    fn vertices(&self) -> Vec<ColorVertex> {
        let size = self.size as f32;
        let mut vertices = Vec::with_capacity(4 + 8 * self.size as usize);

        let x_axis = if self.color_axis { X_AXIS_COLOR } else { self.color };
        let z_axis = if self.color_axis { Z_AXIS_COLOR } else { self.color };

        // centre lines
        vertices.push(ColorVertex::new(Vec3::new(size, 0.0, 0.0), x_axis));
        vertices.push(ColorVertex::new(Vec3::new(-size, 0.0, 0.0), x_axis));
        vertices.push(ColorVertex::new(Vec3::new(0.0, 0.0, size), z_axis));
        vertices.push(ColorVertex::new(Vec3::new(0.0, 0.0, -size), z_axis));

        for i in 1..=self.size {
            let i = i as f32;
            for offset in [i, -i] {
                // parallel to X
                vertices.push(ColorVertex::new(Vec3::new(size, 0.0, offset), self.color));
                vertices.push(ColorVertex::new(Vec3::new(-size, 0.0, offset), self.color));
                // parallel to Z
                vertices.push(ColorVertex::new(Vec3::new(offset, 0.0, size), self.color));
                vertices.push(ColorVertex::new(Vec3::new(offset, 0.0, -size), self.color));
            }
        }

        vertices
    }
}
