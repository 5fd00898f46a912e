//! Debug markers drawn as line lists.
//!
//! - [`Mark`] is a shape placed with a [`Transform`].
//! - [`Markers`] draws a set of marks as one batch.
//! - [`LiveMarker`] collects positions during a frame and draws a small cross
//!   at each one, for marking points that move every frame.

use glam::{Quat, Vec3, Vec4};

use crate::drawable::Drawable;
use crate::transform::Transform;
use crate::vertex::ColorVertex;

#[rustfmt::skip]
const AXIS_POINTS: [Vec3; 6] = [
    Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), // X
    Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0), // Y
    Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, 1.0), // Z
];

#[rustfmt::skip]
const DIAMOND_POINTS: [Vec3; 24] = [
    // equator
    Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0),
    Vec3::new(0.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(1.0, 0.0, 0.0),  Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(0.0, 0.0, 1.0),  Vec3::new(-1.0, 0.0, 0.0),
    // top
    Vec3::new(0.0, 1.0, 0.0),  Vec3::new(0.0, 0.0, -1.0),
    Vec3::new(0.0, 1.0, 0.0),  Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),  Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(0.0, 1.0, 0.0),  Vec3::new(-1.0, 0.0, 0.0),
    // bottom
    Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, 0.0, -1.0),
    Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(0.0, -1.0, 0.0), Vec3::new(-1.0, 0.0, 0.0),
];

/// The unit shape drawn by a [`Mark`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MarkShape {
    /// Three unit segments along X, Y and Z.
    #[default]
    Axis,
    /// An octahedron outline with unit radius.
    Diamond,
}

impl MarkShape {
    /// Segment end points of the shape in model space, in pairs.
    pub fn points(self) -> &'static [Vec3] {
        match self {
            MarkShape::Axis => &AXIS_POINTS,
            MarkShape::Diamond => &DIAMOND_POINTS,
        }
    }
}

/// A shape placed in the world with its own transform.
#[derive(Clone, Debug)]
pub struct Mark {
    pub transform: Transform,
    shape: MarkShape,
    color: Vec4,
    visible: bool,
}

impl Mark {
    /// Creates a visible white mark at the identity transform.
    pub fn new(shape: MarkShape) -> Self {
        Self::with_transform(shape, Transform::new())
    }

    pub fn with_transform(shape: MarkShape, transform: Transform) -> Self {
        Self {
            transform,
            shape,
            color: Vec4::ONE,
            visible: true,
        }
    }

    pub fn from_components(shape: MarkShape, position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self::with_transform(shape, Transform::from_components(position, rotation, scale))
    }

    pub fn shape(&self) -> MarkShape {
        self.shape
    }

    pub fn color(&self) -> Vec4 {
        self.color
    }

    pub fn set_color(&mut self, color: Vec4) {
        self.color = color;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// The shape's segment end points moved into world space by the mark's
    /// transform. Hidden marks still report their points.
    pub fn points(&self) -> Vec<Vec3> {
        let matrix = self.transform.matrix();
        self.shape
            .points()
            .iter()
            .map(|&p| matrix.transform_point3(p))
            .collect()
    }
}

impl Drawable for Mark {
    fn vertices(&self) -> Vec<ColorVertex> {
        if !self.visible {
            return Vec::new();
        }
        self.points()
            .into_iter()
            .map(|p| ColorVertex::new(p, self.color))
            .collect()
    }
}

/// A set of [`Mark`]s drawn together in one line list.
///
/// Each mark keeps its own color, and hidden marks are left out of the batch.
#[derive(Clone, Debug, Default)]
pub struct Markers {
    marks: Vec<Mark>,
}

impl Markers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mark and returns its index.
    pub fn add_mark(&mut self, mark: Mark) -> usize {
        self.marks.push(mark);
        self.marks.len() - 1
    }

    pub fn mark(&self, index: usize) -> Option<&Mark> {
        self.marks.get(index)
    }

    pub fn mark_mut(&mut self, index: usize) -> Option<&mut Mark> {
        self.marks.get_mut(index)
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}

impl Drawable for Markers {
    fn vertices(&self) -> Vec<ColorVertex> {
        self.marks.iter().flat_map(|mark| mark.vertices()).collect()
    }
}

/// Per-frame point markers.
///
/// Call [`LiveMarker::add_mark`] while updating, draw, then [`LiveMarker::clear`]
/// before the next frame.
#[derive(Clone, Debug)]
pub struct LiveMarker {
    size: f32,
    color: Vec4,
    marks: Vec<Vec3>,
}

impl Default for LiveMarker {
    fn default() -> Self {
        Self::new(0.1, Vec4::ONE)
    }
}

impl LiveMarker {
    pub fn new(size: f32, color: Vec4) -> Self {
        Self {
            size,
            color,
            marks: Vec::new(),
        }
    }

    /// Full width of each cross.
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn set_size(&mut self, size: f32) {
        self.size = size;
    }

    pub fn color(&self) -> Vec4 {
        self.color
    }

    pub fn set_color(&mut self, color: Vec4) {
        self.color = color;
    }

    pub fn add_mark(&mut self, position: Vec3) {
        self.marks.push(position);
    }

    pub fn marks(&self) -> &[Vec3] {
        &self.marks
    }

    pub fn clear(&mut self) {
        self.marks.clear();
    }
}

impl Drawable for LiveMarker {
    fn vertices(&self) -> Vec<ColorVertex> {
        let s = self.size / 2.0;
        let mut vertices = Vec::with_capacity(self.marks.len() * 6);

        for &pos in &self.marks {
            for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
                vertices.push(ColorVertex::new(pos - axis * s, self.color));
                vertices.push(ColorVertex::new(pos + axis * s, self.color));
            }
        }

        vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn shapes_are_segment_pairs() {
        assert_eq!(MarkShape::Axis.points().len() % 2, 0);
        assert_eq!(MarkShape::Diamond.points().len() % 2, 0);
        assert!(MarkShape::Diamond.points().iter().all(|p| (p.length() - 1.0).abs() < EPS));
    }

    #[test]
    fn mark_points_follow_transform() {
        let mut mark = Mark::new(MarkShape::Axis);
        mark.transform.move_by(Vec3::new(10.0, 0.0, 0.0));
        mark.transform.scale_by(Vec3::splat(2.0));

        let points = mark.points();
        assert!(points[0].abs_diff_eq(Vec3::new(8.0, 0.0, 0.0), EPS));
        assert!(points[1].abs_diff_eq(Vec3::new(12.0, 0.0, 0.0), EPS));
        assert!(points[5].abs_diff_eq(Vec3::new(10.0, 0.0, 2.0), EPS));
    }

    #[test]
    fn mark_rotation_applies() {
        let mark = Mark::from_components(
            MarkShape::Axis,
            Vec3::ZERO,
            Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
            Vec3::ONE,
        );
        // +X end rotates onto +Y
        assert!(mark.points()[1].abs_diff_eq(Vec3::Y, EPS));
    }

    #[test]
    fn hidden_mark_draws_nothing() {
        let mut mark = Mark::new(MarkShape::Diamond);
        assert_eq!(mark.vertices().len(), 24);

        mark.hide();
        assert!(!mark.is_visible());
        assert!(mark.vertices().is_empty());
        assert_eq!(mark.points().len(), 24);

        mark.show();
        assert_eq!(mark.vertices().len(), 24);
    }

    #[test]
    fn markers_batch_visible_marks() {
        let mut markers = Markers::new();
        let a = markers.add_mark(Mark::new(MarkShape::Axis));
        let b = markers.add_mark(Mark::new(MarkShape::Diamond));
        assert_eq!((a, b), (0, 1));
        assert_eq!(markers.vertices().len(), 30);

        let red = Vec4::new(1.0, 0.0, 0.0, 1.0);
        markers.mark_mut(a).unwrap().set_color(red);
        markers.mark_mut(b).unwrap().hide();

        let vertices = markers.vertices();
        assert_eq!(vertices.len(), 6);
        assert!(vertices.iter().all(|v| v.color == red.to_array()));
    }

    #[test]
    fn live_marker_draws_crosses() {
        let mut live = LiveMarker::default();
        live.set_size(2.0);
        live.add_mark(Vec3::new(1.0, 1.0, 1.0));
        live.add_mark(Vec3::ZERO);

        let vertices = live.vertices();
        assert_eq!(vertices.len(), 12);
        assert_eq!(vertices[0].position, [0.0, 1.0, 1.0]);
        assert_eq!(vertices[1].position, [2.0, 1.0, 1.0]);
        assert_eq!(vertices[5].position, [1.0, 1.0, 2.0]);

        live.clear();
        assert!(live.marks().is_empty());
        assert!(live.vertices().is_empty());
    }
}
